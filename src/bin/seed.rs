//! Seed binary - populates a running Backwave API with a sample survey,
//! submits random answers and prints both result views.
//!
//! Usage:
//!   cargo run --bin seed
//!
//! Optional environment variables:
//! - BACKWAVE_API_URL (defaults to http://localhost:5001)
//! - SEED_RESPONSES (defaults to 10)

use anyhow::Result;
use rand::Rng;
use tracing::info;

use backwave::api::ApiClient;
use backwave::survey::{AnswerItem, AnswerValue, CreateSurveyRequest, NewQuestion, ResponseType};

fn sample_survey_request() -> CreateSurveyRequest {
    CreateSurveyRequest {
        title: "Personal assessment".to_string(),
        description: Some("Help us improve my self awareness".to_string()),
        questions: vec![
            NewQuestion {
                text: "How trustworthy am I?".to_string(),
                response_type: ResponseType::Scale,
                response_scale_max: Some(5),
                creator_answer: AnswerValue::Number(4),
            },
            NewQuestion {
                text: "Am I honest most of the times?".to_string(),
                response_type: ResponseType::Boolean,
                response_scale_max: None,
                creator_answer: AnswerValue::Bool(true),
            },
            NewQuestion {
                text: "Do I take feedback with open arms?".to_string(),
                response_type: ResponseType::Scale,
                response_scale_max: Some(10),
                creator_answer: AnswerValue::Number(8),
            },
            NewQuestion {
                text: "Am I approachable?".to_string(),
                response_type: ResponseType::Boolean,
                response_scale_max: None,
                creator_answer: AnswerValue::Bool(false),
            },
        ],
        survey_id: None,
    }
}

fn random_answers() -> Vec<AnswerItem> {
    let mut rng = rand::thread_rng();
    vec![
        AnswerItem {
            question_id: 1,
            answer: AnswerValue::Number(rng.gen_range(1..=5)),
        },
        AnswerItem {
            question_id: 2,
            answer: AnswerValue::Bool(rng.gen_bool(0.5)),
        },
        AnswerItem {
            question_id: 3,
            answer: AnswerValue::Number(rng.gen_range(1..=10)),
        },
        AnswerItem {
            question_id: 4,
            answer: AnswerValue::Bool(rng.gen_bool(0.5)),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("backwave=info".parse()?),
        )
        .init();

    let base_url = std::env::var("BACKWAVE_API_URL")
        .unwrap_or_else(|_| "http://localhost:5001".to_string());
    let responses: usize = std::env::var("SEED_RESPONSES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    info!("Seeding sample data against {}", base_url);
    let client = ApiClient::new(&base_url);

    let created = client.create_survey(&sample_survey_request()).await?;
    println!("--- Survey created ---");
    println!("{}", serde_json::to_string_pretty(&created)?);

    let mut last_participant_code = None;
    for _ in 0..responses {
        let submitted = client
            .submit_answers(&created.survey_id, &random_answers())
            .await?;
        last_participant_code = Some(submitted.user_code);
    }
    info!("Submitted {} random answer sets", responses);

    let creator_stats = client
        .get_survey_results(&created.survey_id, created.user_code)
        .await?;
    println!("--- Creator results ---");
    println!("{}", serde_json::to_string_pretty(&creator_stats)?);

    if let Some(participant_code) = last_participant_code {
        let participant_stats = client
            .get_survey_results(&created.survey_id, participant_code)
            .await?;
        println!("--- Last participant results ---");
        println!("{}", serde_json::to_string_pretty(&participant_stats)?);
    }

    Ok(())
}
