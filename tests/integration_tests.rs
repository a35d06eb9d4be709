//! Integration tests for the Backwave API and its typed client.
//!
//! The client tests pin the URL, query and payload each `ApiClient` method
//! constructs against a wiremock server. The end-to-end tests serve the real
//! router on an ephemeral port and drive the full survey lifecycle through
//! the client.

use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use backwave::api::ApiClient;
use backwave::config::Config;
use backwave::ids::CodeGenerator;
use backwave::results::UserType;
use backwave::server::{self, AppState};
use backwave::store::Store;
use backwave::survey::{
    AnswerItem, AnswerValue, CreateSurveyRequest, NewQuestion, ResponseType,
};

// ==================== Test Helpers ====================

fn sample_request(survey_id: Option<&str>) -> CreateSurveyRequest {
    CreateSurveyRequest {
        title: "Customer Satisfaction Survey".to_string(),
        description: Some("Help us improve our service".to_string()),
        questions: vec![
            NewQuestion {
                text: "How satisfied are you with our product?".to_string(),
                response_type: ResponseType::Scale,
                response_scale_max: Some(5),
                creator_answer: AnswerValue::Number(4),
            },
            NewQuestion {
                text: "Would you recommend our product to others?".to_string(),
                response_type: ResponseType::Boolean,
                response_scale_max: None,
                creator_answer: AnswerValue::Bool(true),
            },
            NewQuestion {
                text: "How likely are you to purchase again?".to_string(),
                response_type: ResponseType::Scale,
                response_scale_max: Some(10),
                creator_answer: AnswerValue::Number(8),
            },
            NewQuestion {
                text: "Did you find our customer support helpful?".to_string(),
                response_type: ResponseType::Boolean,
                response_scale_max: None,
                creator_answer: AnswerValue::Bool(true),
            },
        ],
        survey_id: survey_id.map(|id| id.to_string()),
    }
}

fn answer_set(q1: i64, q2: bool, q3: i64, q4: bool) -> Vec<AnswerItem> {
    vec![
        AnswerItem {
            question_id: 1,
            answer: AnswerValue::Number(q1),
        },
        AnswerItem {
            question_id: 2,
            answer: AnswerValue::Bool(q2),
        },
        AnswerItem {
            question_id: 3,
            answer: AnswerValue::Number(q3),
        },
        AnswerItem {
            question_id: 4,
            answer: AnswerValue::Bool(q4),
        },
    ]
}

/// Serve the real router on an ephemeral port and return its base URL.
async fn spawn_app() -> (String, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("backwave_test.db");
    let store = Store::new(db_path.to_str().unwrap()).expect("Failed to create store");
    store.replenish_reserve(25).expect("Failed to stock reserve");

    let config = Config {
        api_base_url: "http://localhost:5001".to_string(),
        base_path: "/".to_string(),
        port: 0,
        database_path: db_path.to_string_lossy().to_string(),
        datacenter_id: 1,
        worker_id: 1,
        min_id_reserve: 25,
    };
    let state = AppState::new(store, CodeGenerator::new(1, 1), config);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (format!("http://{}", addr), temp_dir)
}

// ==================== Client Request Construction Tests ====================

#[tokio::test]
async fn test_create_survey_posts_expected_payload() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "title": "Customer Satisfaction Survey",
        "description": "Help us improve our service",
        "questions": [
            {
                "text": "How satisfied are you with our product?",
                "response_type": "scale",
                "response_scale_max": 5,
                "creator_answer": 4
            },
            {
                "text": "Would you recommend our product to others?",
                "response_type": "boolean",
                "creator_answer": true
            },
            {
                "text": "How likely are you to purchase again?",
                "response_type": "scale",
                "response_scale_max": 10,
                "creator_answer": 8
            },
            {
                "text": "Did you find our customer support helpful?",
                "response_type": "boolean",
                "creator_answer": true
            }
        ],
        "survey_id": "brave-fox-42"
    });

    Mock::given(method("POST"))
        .and(path("/v1/surveys"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "survey_id": "brave-fox-42",
            "share_link": "/brave-fox-42",
            "user_code": 7235264923521_i64
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let response = client
        .create_survey(&sample_request(Some("brave-fox-42")))
        .await
        .expect("Create should succeed");

    assert_eq!(response.survey_id, "brave-fox-42");
    assert_eq!(response.share_link, "/brave-fox-42");
    assert_eq!(response.user_code, 7235264923521);
}

#[tokio::test]
async fn test_get_survey_hits_versioned_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/surveys/brave-fox-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Customer Satisfaction Survey",
            "description": "",
            "questions": [
                {
                    "id": 1,
                    "text": "How satisfied are you with our product?",
                    "response_type": "scale",
                    "response_scale_max": 5
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let survey = client
        .get_survey("brave-fox-42")
        .await
        .expect("Get should succeed");

    assert_eq!(survey.title, "Customer Satisfaction Survey");
    assert_eq!(survey.questions.len(), 1);
    assert_eq!(survey.questions[0].id, 1);
}

#[tokio::test]
async fn test_submit_answers_posts_answer_list() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "answers": [
            { "question_id": 1, "answer": 4 },
            { "question_id": 2, "answer": true }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/surveys/brave-fox-42/answers"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "user_code": 7235264923522_i64
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let answers = vec![
        AnswerItem {
            question_id: 1,
            answer: AnswerValue::Number(4),
        },
        AnswerItem {
            question_id: 2,
            answer: AnswerValue::Bool(true),
        },
    ];
    let response = client
        .submit_answers("brave-fox-42", &answers)
        .await
        .expect("Submit should succeed");

    assert_eq!(response.user_code, 7235264923522);
}

#[tokio::test]
async fn test_survey_results_sends_user_code_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/surveys/brave-fox-42/results"))
        .and(query_param("user_code", "7235264923521"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_type": "creator",
            "survey_id": "brave-fox-42",
            "title": "Customer Satisfaction Survey",
            "total_responses": 0,
            "questions": [],
            "overall_statistics": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let results = client
        .get_survey_results("brave-fox-42", 7235264923521)
        .await
        .expect("Results should succeed");

    assert_eq!(results.user_type, UserType::Creator);
    assert_eq!(results.total_responses, Some(0));
}

#[tokio::test]
async fn test_results_by_code_uses_static_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/surveys/results"))
        .and(query_param("user_code", "7235264923522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_type": "participant",
            "survey_id": "brave-fox-42",
            "title": "Customer Satisfaction Survey",
            "questions": [],
            "overall_statistics": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let results = client
        .get_results_by_user_code(7235264923522)
        .await
        .expect("Lookup should succeed");

    assert_eq!(results.user_type, UserType::Participant);
    assert_eq!(results.survey_id, "brave-fox-42");
    assert!(results.total_responses.is_none());
}

#[tokio::test]
async fn test_get_ids_sends_count_and_preferred_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/ids"))
        .and(query_param("count", "3"))
        .and(query_param("id", "my-dream-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ids": ["my-dream-code", "happy-fox-12", "calm-owl-7"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let suggestions = client
        .get_ids(3, Some("my-dream-code"))
        .await
        .expect("Suggestions should succeed");

    assert_eq!(suggestions.ids.len(), 3);
    assert_eq!(suggestions.ids[0], "my-dream-code");
}

#[tokio::test]
async fn test_check_id_sends_id_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/ids/check"))
        .and(query_param("id", "brave-fox-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "brave-fox-42",
            "available": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let availability = client
        .check_id_availability("brave-fox-42")
        .await
        .expect("Check should succeed");

    assert_eq!(availability.id, "brave-fox-42");
    assert!(!availability.available);
}

#[tokio::test]
async fn test_client_surfaces_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/surveys/calm-owl-7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Survey not found"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri());
    let error = client
        .get_survey("calm-owl-7")
        .await
        .expect_err("Should surface the API error");

    let message = error.to_string();
    assert!(message.contains("404"), "got: {}", message);
    assert!(message.contains("Survey not found"), "got: {}", message);
}

// ==================== End-to-End Tests ====================

#[tokio::test]
async fn test_full_survey_lifecycle() {
    let (base_url, _temp_dir) = spawn_app().await;
    let client = ApiClient::new(&base_url);

    // Pick a survey code
    let suggestions = client
        .get_ids(3, Some("my-team-check"))
        .await
        .expect("suggestions");
    assert_eq!(suggestions.ids.len(), 3);
    assert_eq!(suggestions.ids[0], "my-team-check");

    let availability = client
        .check_id_availability("my-team-check")
        .await
        .expect("check");
    assert!(availability.available);

    // Create the survey
    let created = client
        .create_survey(&sample_request(Some("my-team-check")))
        .await
        .expect("create");
    assert_eq!(created.survey_id, "my-team-check");
    assert_eq!(created.share_link, "/my-team-check");

    // The code is consumed now
    let availability = client
        .check_id_availability("my-team-check")
        .await
        .expect("check");
    assert!(!availability.available);

    // Respondents see the questions without the creator's answers
    let survey = client.get_survey("my-team-check").await.expect("fetch");
    assert_eq!(survey.title, "Customer Satisfaction Survey");
    assert_eq!(survey.questions.len(), 4);

    // Submit the fixed response set
    let sets = [
        (4, true, 7, true),
        (5, true, 9, true),
        (3, false, 6, false),
        (4, true, 8, true),
        (2, false, 5, true),
    ];
    let mut participant_codes = Vec::new();
    for (q1, q2, q3, q4) in sets {
        let submitted = client
            .submit_answers("my-team-check", &answer_set(q1, q2, q3, q4))
            .await
            .expect("submit");
        participant_codes.push(submitted.user_code);
    }

    // Creator view
    let creator_view = client
        .get_survey_results("my-team-check", created.user_code)
        .await
        .expect("creator results");
    assert_eq!(creator_view.user_type, UserType::Creator);
    assert_eq!(creator_view.total_responses, Some(5));
    assert_eq!(creator_view.questions.len(), 4);
    assert_eq!(creator_view.questions[0].average, Some(3.6));
    let distribution = creator_view.questions[0]
        .distribution
        .as_ref()
        .expect("distribution");
    assert_eq!(distribution[&4], 2);
    assert_eq!(distribution[&1], 0);
    assert_eq!(creator_view.questions[1].yes_count, Some(3));
    assert_eq!(creator_view.questions[1].no_count, Some(2));
    assert_eq!(creator_view.questions[2].average, Some(7.0));
    assert_eq!(
        creator_view.questions[0].creator_answer,
        Some(AnswerValue::Number(4))
    );
    let highest = creator_view
        .overall_statistics
        .highest_rated_question
        .as_ref()
        .expect("highest");
    assert_eq!(highest.question_id, 4);
    assert_eq!(highest.score, 0.8);
    let lowest = creator_view
        .overall_statistics
        .lowest_rated_question
        .as_ref()
        .expect("lowest");
    assert_eq!(lowest.question_id, 2);
    assert_eq!(lowest.score, 0.6);

    // Participant view for the first respondent
    let participant_view = client
        .get_survey_results("my-team-check", participant_codes[0])
        .await
        .expect("participant results");
    assert_eq!(participant_view.user_type, UserType::Participant);
    assert!(participant_view.total_responses.is_none());
    assert_eq!(
        participant_view.questions[0].user_score,
        Some(AnswerValue::Number(4))
    );
    assert_eq!(participant_view.questions[0].user_deviation, Some(0.4));
    assert_eq!(participant_view.questions[2].user_deviation, Some(0.0));
    assert!(participant_view.questions[0].creator_answer.is_none());
    assert_eq!(
        participant_view
            .overall_statistics
            .average_deviation_from_aggregate,
        Some(0.2)
    );

    // Unknown codes fall back to the generic participant view
    let generic_view = client
        .get_survey_results("my-team-check", 999_999)
        .await
        .expect("generic results");
    assert_eq!(generic_view.user_type, UserType::Participant);
    assert!(generic_view.questions[0].user_score.is_none());
}

#[tokio::test]
async fn test_results_lookup_by_code_alone() {
    let (base_url, _temp_dir) = spawn_app().await;
    let client = ApiClient::new(&base_url);

    let created = client
        .create_survey(&sample_request(Some("brave-fox-42")))
        .await
        .expect("create");
    let submitted = client
        .submit_answers("brave-fox-42", &answer_set(5, true, 9, false))
        .await
        .expect("submit");

    let creator_view = client
        .get_results_by_user_code(created.user_code)
        .await
        .expect("creator lookup");
    assert_eq!(creator_view.user_type, UserType::Creator);
    assert_eq!(creator_view.survey_id, "brave-fox-42");

    let participant_view = client
        .get_results_by_user_code(submitted.user_code)
        .await
        .expect("participant lookup");
    assert_eq!(participant_view.user_type, UserType::Participant);
    assert_eq!(participant_view.survey_id, "brave-fox-42");
    assert_eq!(
        participant_view.questions[0].user_score,
        Some(AnswerValue::Number(5))
    );

    let error = client
        .get_results_by_user_code(424_242)
        .await
        .expect_err("Unknown code should fail");
    let message = error.to_string();
    assert!(message.contains("404"), "got: {}", message);
    assert!(message.contains("User code not found"), "got: {}", message);
}

#[tokio::test]
async fn test_non_numeric_user_codes_stay_on_json_contract() {
    let (base_url, _temp_dir) = spawn_app().await;
    let client = ApiClient::new(&base_url);
    let http = reqwest::Client::new();

    client
        .create_survey(&sample_request(Some("wise-deer-11")))
        .await
        .expect("create");
    client
        .submit_answers("wise-deer-11", &answer_set(4, true, 7, true))
        .await
        .expect("submit");

    // A typed-in code that was never numeric gets the generic participant view
    let response = http
        .get(format!(
            "{}/v1/surveys/wise-deer-11/results?user_code=my-typed-code",
            base_url
        ))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["user_type"], "participant");
    assert!(body["questions"][0].get("user_score").is_none());

    // The resolve endpoint treats it as any other unknown code
    let response = http
        .get(format!(
            "{}/v1/surveys/results?user_code=my-typed-code",
            base_url
        ))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "got: {}",
        content_type
    );
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "User code not found" }));

    // An unparseable count falls back to the default of one suggestion
    let response = http
        .get(format!("{}/v1/ids?count=abc", base_url))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["ids"].as_array().expect("ids array").len(), 1);
}

#[tokio::test]
async fn test_wire_statuses_and_error_bodies() {
    let (base_url, _temp_dir) = spawn_app().await;
    let http = reqwest::Client::new();

    // Root greeting
    let response = http.get(&base_url).send().await.expect("request");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.expect("body"),
        "Welcome to the Backwave API"
    );

    // Unmatched paths answer JSON 404s
    let response = http
        .get(format!("{}/nope/nothing", base_url))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Not found" }));

    // Invalid create payload
    let response = http
        .post(format!("{}/v1/surveys", base_url))
        .json(&serde_json::json!({ "description": "no title" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Invalid request data" }));

    // Successful create answers 201
    let response = http
        .post(format!("{}/v1/surveys", base_url))
        .json(&sample_request(Some("calm-owl-7")))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 201);

    // Taking the same id again conflicts
    let response = http
        .post(format!("{}/v1/surveys", base_url))
        .json(&sample_request(Some("calm-owl-7")))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 409);

    // Unknown survey fetch
    let response = http
        .get(format!("{}/v1/surveys/wise-bear-9", base_url))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "error": "Survey not found" }));

    // Submission answers 201; out-of-range answers are rejected
    let response = http
        .post(format!("{}/v1/surveys/calm-owl-7/answers", base_url))
        .json(&serde_json::json!({
            "answers": [{ "question_id": 1, "answer": 3 }]
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 201);

    let response = http
        .post(format!("{}/v1/surveys/calm-owl-7/answers", base_url))
        .json(&serde_json::json!({
            "answers": [{ "question_id": 1, "answer": 99 }]
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 400);

    // Survey fetch withholds the creator's answers on the wire
    let response = http
        .get(format!("{}/v1/surveys/calm-owl-7", base_url))
        .send()
        .await
        .expect("request");
    let body: serde_json::Value = response.json().await.expect("json");
    assert!(body["questions"][0].get("creator_answer").is_none());
    assert!(body.get("user_code").is_none());
}

#[tokio::test]
async fn test_concurrent_submissions_get_unique_codes() {
    let (base_url, _temp_dir) = spawn_app().await;
    let client = ApiClient::new(&base_url);

    let created = client
        .create_survey(&sample_request(Some("happy-wolf-3")))
        .await
        .expect("create");

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let base_url = base_url.clone();
        tasks.spawn(async move {
            let client = ApiClient::new(&base_url);
            client
                .submit_answers("happy-wolf-3", &answer_set(3, true, 5, false))
                .await
                .expect("submit")
                .user_code
        });
    }

    let mut codes = Vec::new();
    while let Some(result) = tasks.join_next().await {
        codes.push(result.expect("task"));
    }

    assert_eq!(codes.len(), 20);
    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), 20, "User codes must be unique");
    assert!(!codes.contains(&created.user_code));

    let results = client
        .get_survey_results("happy-wolf-3", created.user_code)
        .await
        .expect("results");
    assert_eq!(results.total_responses, Some(20));
}
