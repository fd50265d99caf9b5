//! Training routes, including the exercises prescribed in each training

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidJson};
use crate::services::TrainingService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use personal_shared::{
    AddExerciseTrainingRequest, ExerciseTrainingResponse, TrainingDetailResponse, TrainingRequest,
    TrainingResponse,
};
use uuid::Uuid;

pub fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trainings).post(create_training))
        .route(
            "/:id",
            get(get_training).put(update_training).delete(delete_training),
        )
        .route("/:id/exercises", post(add_exercise))
        .route("/:id/exercises/:exercise_training_id", delete(remove_exercise))
}

/// Trainings the caller owns or is assigned to
#[utoipa::path(
    get,
    path = "/api/v1/trainings",
    responses(
        (status = 200, description = "Trainings", body = [TrainingResponse]),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn list_trainings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TrainingResponse>>> {
    let trainings = TrainingService::list(state.db(), auth.user_id).await?;
    Ok(Json(trainings))
}

/// Create a training (trainers only)
#[utoipa::path(
    post,
    path = "/api/v1/trainings",
    request_body = TrainingRequest,
    responses(
        (status = 201, description = "Training created", body = TrainingResponse),
        (status = 400, description = "Validation failed, unknown student or caller is not a trainer", body = personal_shared::ErrorResponseBody),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn create_training(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<TrainingRequest>,
) -> ApiResult<(StatusCode, Json<TrainingResponse>)> {
    auth.require_trainer()?;
    let training = TrainingService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(training)))
}

#[utoipa::path(
    get,
    path = "/api/v1/trainings/{id}",
    params(("id" = Uuid, Path, description = "Training id")),
    responses(
        (status = 200, description = "Training with its exercises", body = TrainingDetailResponse),
        (status = 400, description = "Not found or no access", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn get_training(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<TrainingDetailResponse>> {
    let training = TrainingService::get(state.db(), auth.user_id, id).await?;
    Ok(Json(training))
}

#[utoipa::path(
    put,
    path = "/api/v1/trainings/{id}",
    params(("id" = Uuid, Path, description = "Training id")),
    request_body = TrainingRequest,
    responses(
        (status = 200, description = "Training updated", body = TrainingResponse),
        (status = 400, description = "Validation failed, not found or not the owner", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn update_training(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<TrainingRequest>,
) -> ApiResult<Json<TrainingResponse>> {
    let training = TrainingService::update(state.db(), auth.user_id, id, req).await?;
    Ok(Json(training))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trainings/{id}",
    params(("id" = Uuid, Path, description = "Training id")),
    responses(
        (status = 204, description = "Training deleted"),
        (status = 400, description = "Not found or not the owner", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn delete_training(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    TrainingService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Prescribe an exercise in a training
#[utoipa::path(
    post,
    path = "/api/v1/trainings/{id}/exercises",
    params(("id" = Uuid, Path, description = "Training id")),
    request_body = AddExerciseTrainingRequest,
    responses(
        (status = 201, description = "Exercise added", body = ExerciseTrainingResponse),
        (status = 400, description = "Validation failed, not found or not the owner", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn add_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<AddExerciseTrainingRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseTrainingResponse>)> {
    let exercise = TrainingService::add_exercise(state.db(), auth.user_id, id, req).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trainings/{id}/exercises/{exercise_training_id}",
    params(
        ("id" = Uuid, Path, description = "Training id"),
        ("exercise_training_id" = Uuid, Path, description = "Prescribed exercise id")
    ),
    responses(
        (status = 204, description = "Exercise removed"),
        (status = 400, description = "Not found or not the owner", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Trainings"
)]
pub async fn remove_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, exercise_training_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    TrainingService::remove_exercise(state.db(), auth.user_id, id, exercise_training_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
