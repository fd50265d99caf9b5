//! Physical assessment routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidJson};
use crate::services::PhysicalAssessmentService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use personal_shared::{CreatePhysicalAssessmentRequest, PhysicalAssessmentResponse};
use uuid::Uuid;

pub fn physical_assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assessments).post(create_assessment))
        .route("/:id", get(get_assessment).delete(delete_assessment))
}

#[utoipa::path(
    get,
    path = "/api/v1/physical-assessments",
    responses(
        (status = 200, description = "Caller's assessments, newest first", body = [PhysicalAssessmentResponse]),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Physical assessments"
)]
pub async fn list_assessments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PhysicalAssessmentResponse>>> {
    let assessments = PhysicalAssessmentService::list(state.db(), auth.user_id).await?;
    Ok(Json(assessments))
}

/// Record an assessment
///
/// Body composition is calculated when skin folds are sent.
#[utoipa::path(
    post,
    path = "/api/v1/physical-assessments",
    request_body = CreatePhysicalAssessmentRequest,
    responses(
        (status = 201, description = "Assessment recorded", body = PhysicalAssessmentResponse),
        (status = 400, description = "Validation failed", body = personal_shared::ErrorResponseBody),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Physical assessments"
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreatePhysicalAssessmentRequest>,
) -> ApiResult<(StatusCode, Json<PhysicalAssessmentResponse>)> {
    let assessment = PhysicalAssessmentService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/physical-assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "Assessment", body = PhysicalAssessmentResponse),
        (status = 400, description = "Assessment not found", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Physical assessments"
)]
pub async fn get_assessment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<PhysicalAssessmentResponse>> {
    let assessment = PhysicalAssessmentService::get(state.db(), auth.user_id, id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/physical-assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment id")),
    responses(
        (status = 204, description = "Assessment deleted"),
        (status = 400, description = "Assessment not found", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Physical assessments"
)]
pub async fn delete_assessment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    PhysicalAssessmentService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
