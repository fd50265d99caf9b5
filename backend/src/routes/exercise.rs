//! Exercise catalogue routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiPath, ApiQuery, ValidJson};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use personal_shared::{ExerciseListQuery, ExerciseRequest, ExerciseResponse};
use uuid::Uuid;

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/exercises",
    params(ExerciseListQuery),
    responses(
        (status = 200, description = "Exercises, optionally filtered", body = [ExerciseResponse]),
        (status = 400, description = "Unknown muscle group", body = personal_shared::ErrorResponseBody),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Exercises"
)]
pub async fn list_exercises(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<ExerciseListQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    let exercises = ExerciseService::list(state.db(), query.muscle_group.as_deref()).await?;
    Ok(Json(exercises))
}

/// Create an exercise (trainers only)
#[utoipa::path(
    post,
    path = "/api/v1/exercises",
    request_body = ExerciseRequest,
    responses(
        (status = 201, description = "Exercise created", body = ExerciseResponse),
        (status = 400, description = "Validation failed or caller is not a trainer", body = personal_shared::ErrorResponseBody),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Exercises"
)]
pub async fn create_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<ExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseResponse>)> {
    auth.require_trainer()?;
    let exercise = ExerciseService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[utoipa::path(
    get,
    path = "/api/v1/exercises/{id}",
    params(("id" = Uuid, Path, description = "Exercise id")),
    responses(
        (status = 200, description = "Exercise", body = ExerciseResponse),
        (status = 400, description = "Exercise not found", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Exercises"
)]
pub async fn get_exercise(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::get(state.db(), id).await?;
    Ok(Json(exercise))
}

#[utoipa::path(
    put,
    path = "/api/v1/exercises/{id}",
    params(("id" = Uuid, Path, description = "Exercise id")),
    request_body = ExerciseRequest,
    responses(
        (status = 200, description = "Exercise updated", body = ExerciseResponse),
        (status = 400, description = "Validation failed, not found or not the creator", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Exercises"
)]
pub async fn update_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<ExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let exercise = ExerciseService::update(state.db(), auth.user_id, id, req).await?;
    Ok(Json(exercise))
}

#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(("id" = Uuid, Path, description = "Exercise id")),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 400, description = "Not found or not the creator", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Exercises"
)]
pub async fn delete_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    ExerciseService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
