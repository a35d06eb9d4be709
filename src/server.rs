use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::ids::{self, CodeGenerator};
use crate::results::{self, SurveyResults};
use crate::store::{self, Store};
use crate::survey::{
    CreateSurveyRequest, CreateSurveyResponse, IdAvailability, IdSuggestions, Question,
    SubmitAnswersRequest, SubmitAnswersResponse, Survey, SurveyView,
};

/// Shared handler state: one store, one code generator, the loaded config.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub codes: Arc<CodeGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, codes: CodeGenerator, config: Config) -> Self {
        Self {
            store,
            codes: Arc::new(codes),
            config,
        }
    }
}

/// Build the full application router. All API endpoints live under `/v1`;
/// anything unmatched answers a JSON 404.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/surveys", post(create_survey))
        .route("/surveys/results", get(results_by_user_code))
        .route("/surveys/:survey_id", get(get_survey))
        .route("/surveys/:survey_id/answers", post(submit_answers))
        .route("/surveys/:survey_id/results", get(survey_results))
        .route("/ids", get(suggest_ids))
        .route("/ids/check", get(check_id))
        .with_state(state);

    Router::new()
        .route("/", get(root))
        .nest("/v1", v1)
        .fallback(fallback_not_found)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Welcome to the Backwave API"
}

async fn fallback_not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

fn invalid_request() -> ApiError {
    ApiError::BadRequest("Invalid request data".to_string())
}

// ==================== Survey Handlers ====================

async fn create_survey(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreateSurveyResponse>)> {
    let request: CreateSurveyRequest =
        serde_json::from_slice(&body).map_err(|_| invalid_request())?;

    let questions: Vec<Question> = request
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| Question {
            id: index as i64 + 1,
            text: q.text.clone(),
            response_type: q.response_type,
            response_scale_max: q.response_scale_max,
            creator_answer: q.creator_answer.clone(),
        })
        .collect();

    let valid = !request.title.trim().is_empty()
        && !questions.is_empty()
        && questions
            .iter()
            .all(|q| !q.text.trim().is_empty() && q.accepts(&q.creator_answer));
    if !valid {
        return Err(invalid_request());
    }

    let survey_id = match request.survey_id {
        Some(requested) => {
            if !ids::is_well_formed(&requested) {
                return Err(invalid_request());
            }
            if !state.store.is_id_available(&requested)? || state.store.survey_exists(&requested)? {
                return Err(ApiError::Conflict("Survey id already taken".to_string()));
            }
            requested
        }
        None => {
            let mut drawn = state.store.draw_ids(1, None)?;
            if drawn.is_empty() {
                state.store.replenish_reserve(state.config.min_id_reserve)?;
                drawn = state.store.draw_ids(1, None)?;
            }
            drawn
                .pop()
                .ok_or_else(|| anyhow::anyhow!("Survey code reserve is empty"))?
        }
    };

    let user_code = state.codes.generate()?;
    let survey = Survey {
        survey_id,
        title: request.title,
        description: request.description.unwrap_or_default(),
        questions,
        user_code,
        created_at: Utc::now().to_rfc3339(),
    };

    // The availability checks and the insert take the lock separately; a
    // create that loses the id race answers the same conflict as the checks
    if let Err(err) = state.store.insert_survey(&survey) {
        if store::is_duplicate_survey_id(&err) {
            return Err(ApiError::Conflict("Survey id already taken".to_string()));
        }
        return Err(err.into());
    }
    state.store.add_custom_id(&survey.survey_id)?;
    info!(
        "Created survey '{}' with {} questions",
        survey.survey_id,
        survey.questions.len()
    );

    let response = CreateSurveyResponse {
        share_link: format!("/{}", survey.survey_id),
        survey_id: survey.survey_id,
        user_code,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> ApiResult<Json<SurveyView>> {
    let survey = state
        .store
        .get_survey(&survey_id)?
        .ok_or_else(|| ApiError::NotFound("Survey not found".to_string()))?;
    Ok(Json(SurveyView::from(&survey)))
}

async fn submit_answers(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SubmitAnswersResponse>)> {
    let request: SubmitAnswersRequest =
        serde_json::from_slice(&body).map_err(|_| invalid_request())?;

    let survey = state
        .store
        .get_survey(&survey_id)?
        .ok_or_else(|| ApiError::NotFound("Survey not found".to_string()))?;

    if request.answers.is_empty() {
        return Err(invalid_request());
    }
    let mut seen = HashSet::new();
    for item in &request.answers {
        let Some(question) = survey.question(item.question_id) else {
            return Err(invalid_request());
        };
        if !question.accepts(&item.answer) || !seen.insert(item.question_id) {
            return Err(invalid_request());
        }
    }

    let user_code = state.codes.generate()?;
    state
        .store
        .insert_submission(&survey_id, user_code, &request.answers)?;
    info!(
        "Recorded submission for survey '{}' ({} answers)",
        survey_id,
        request.answers.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitAnswersResponse { user_code }),
    ))
}

// ==================== Results Handlers ====================

#[derive(Debug, Deserialize)]
struct ResultsQuery {
    user_code: Option<String>,
}

impl ResultsQuery {
    /// User codes are numeric; any other query text is an unknown code.
    fn parsed_code(&self) -> Option<i64> {
        self.user_code.as_deref().and_then(|raw| raw.parse().ok())
    }
}

async fn survey_results(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Json<SurveyResults>> {
    let survey = state
        .store
        .get_survey(&survey_id)?
        .ok_or_else(|| ApiError::NotFound("Survey not found".to_string()))?;
    let submissions = state.store.submissions_for_survey(&survey_id)?;

    let user_code = query.parsed_code();
    let payload = if user_code == Some(survey.user_code) {
        results::creator_results(&survey, &submissions)
    } else {
        results::participant_results(&survey, &submissions, user_code)
    };
    Ok(Json(payload))
}

async fn results_by_user_code(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Json<SurveyResults>> {
    let Some(raw) = query.user_code.as_deref() else {
        return Err(ApiError::BadRequest("Missing user_code".to_string()));
    };
    let Ok(user_code) = raw.parse::<i64>() else {
        return Err(ApiError::NotFound("User code not found".to_string()));
    };

    if let Some(survey) = state.store.find_survey_by_creator_code(user_code)? {
        let submissions = state.store.submissions_for_survey(&survey.survey_id)?;
        return Ok(Json(results::creator_results(&survey, &submissions)));
    }

    if let Some(survey_id) = state.store.find_survey_id_by_participant_code(user_code)? {
        let survey = state.store.get_survey(&survey_id)?.ok_or_else(|| {
            anyhow::anyhow!("Submission references missing survey '{}'", survey_id)
        })?;
        let submissions = state.store.submissions_for_survey(&survey_id)?;
        return Ok(Json(results::participant_results(
            &survey,
            &submissions,
            Some(user_code),
        )));
    }

    Err(ApiError::NotFound("User code not found".to_string()))
}

// ==================== Survey Code Handlers ====================

#[derive(Debug, Deserialize)]
struct SuggestIdsQuery {
    count: Option<String>,
    id: Option<String>,
}

async fn suggest_ids(
    State(state): State<AppState>,
    Query(query): Query<SuggestIdsQuery>,
) -> ApiResult<Json<IdSuggestions>> {
    let count = query
        .count
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);
    state
        .store
        .replenish_reserve(state.config.min_id_reserve)?;
    let ids = state.store.draw_ids(count, query.id.as_deref())?;
    Ok(Json(IdSuggestions { ids }))
}

#[derive(Debug, Deserialize)]
struct CheckIdQuery {
    id: Option<String>,
}

async fn check_id(
    State(state): State<AppState>,
    Query(query): Query<CheckIdQuery>,
) -> ApiResult<Json<IdAvailability>> {
    let Some(id) = query.id else {
        return Err(ApiError::BadRequest("Missing id parameter".to_string()));
    };

    let available = ids::is_well_formed(&id) && state.store.is_id_available(&id)?;
    Ok(Json(IdAvailability { id, available }))
}
