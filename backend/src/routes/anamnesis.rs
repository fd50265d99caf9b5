//! Anamnesis questionnaire routes
//!
//! Trainers maintain the questions; every user answers them for
//! themselves.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidJson};
use crate::services::AnamnesisService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use personal_shared::{
    AnamnesisAnswerRequest, AnamnesisAnswerResponse, AnamnesisQuestionRequest,
    AnamnesisQuestionResponse,
};
use uuid::Uuid;

pub fn anamnesis_question_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/:id", delete(delete_question))
        .route("/:id/answer", put(answer_question))
}

pub fn anamnesis_answer_routes() -> Router<AppState> {
    Router::new().route("/", get(list_answers))
}

#[utoipa::path(
    get,
    path = "/api/v1/anamnesis-questions",
    responses(
        (status = 200, description = "All questions", body = [AnamnesisQuestionResponse]),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Anamnesis"
)]
pub async fn list_questions(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<AnamnesisQuestionResponse>>> {
    let questions = AnamnesisService::list_questions(state.db()).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    post,
    path = "/api/v1/anamnesis-questions",
    request_body = AnamnesisQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = AnamnesisQuestionResponse),
        (status = 400, description = "Validation failed or caller is not a trainer", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Anamnesis"
)]
pub async fn create_question(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<AnamnesisQuestionRequest>,
) -> ApiResult<(StatusCode, Json<AnamnesisQuestionResponse>)> {
    auth.require_trainer()?;
    let question = AnamnesisService::create_question(state.db(), auth.user_id, &req.question).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/anamnesis-questions/{id}",
    params(("id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question and its answers deleted"),
        (status = 400, description = "Not found or caller is not a trainer", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Anamnesis"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    auth.require_trainer()?;
    AnamnesisService::delete_question(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Answer a question, replacing any previous answer
#[utoipa::path(
    put,
    path = "/api/v1/anamnesis-questions/{id}/answer",
    params(("id" = Uuid, Path, description = "Question id")),
    request_body = AnamnesisAnswerRequest,
    responses(
        (status = 200, description = "Answer saved", body = AnamnesisAnswerResponse),
        (status = 400, description = "Validation failed or question not found", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Anamnesis"
)]
pub async fn answer_question(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<AnamnesisAnswerRequest>,
) -> ApiResult<Json<AnamnesisAnswerResponse>> {
    let answer = AnamnesisService::answer(state.db(), auth.user_id, id, &req.answer).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    get,
    path = "/api/v1/anamnesis-answers",
    responses(
        (status = 200, description = "Caller's answers", body = [AnamnesisAnswerResponse]),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Anamnesis"
)]
pub async fn list_answers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AnamnesisAnswerResponse>>> {
    let answers = AnamnesisService::list_answers(state.db(), auth.user_id).await?;
    Ok(Json(answers))
}
