//! OpenAPI document and Swagger UI

use super::{anamnesis, auth, exercise, health, physical_assessment, training, user};
use crate::state::AppState;
use axum::Router;
use personal_shared::body_composition::{BodyComposition, Perimeters, SkinFolds};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,
        health::liveness_check,
        auth::login,
        auth::refresh_token,
        auth::me,
        user::create_user,
        user::get_me,
        user::update_me,
        user::delete_me,
        exercise::list_exercises,
        exercise::create_exercise,
        exercise::get_exercise,
        exercise::update_exercise,
        exercise::delete_exercise,
        training::list_trainings,
        training::create_training,
        training::get_training,
        training::update_training,
        training::delete_training,
        training::add_exercise,
        training::remove_exercise,
        physical_assessment::list_assessments,
        physical_assessment::create_assessment,
        physical_assessment::get_assessment,
        physical_assessment::delete_assessment,
        anamnesis::list_questions,
        anamnesis::create_question,
        anamnesis::delete_question,
        anamnesis::answer_question,
        anamnesis::list_answers
    ),
    components(
        schemas(
            health::HealthResponse,
            health::HealthChecks,
            health::CheckStatus,
            personal_shared::ErrorResponseBody,
            personal_shared::AuthTokens,
            personal_shared::LoginRequest,
            personal_shared::RefreshTokenRequest,
            personal_shared::CreateUserRequest,
            personal_shared::UpdateUserRequest,
            personal_shared::UserResponse,
            personal_shared::ExerciseRequest,
            personal_shared::ExerciseResponse,
            personal_shared::TrainingRequest,
            personal_shared::TrainingResponse,
            personal_shared::TrainingDetailResponse,
            personal_shared::AddExerciseTrainingRequest,
            personal_shared::ExerciseTrainingResponse,
            personal_shared::CreatePhysicalAssessmentRequest,
            personal_shared::PhysicalAssessmentResponse,
            personal_shared::AnamnesisQuestionRequest,
            personal_shared::AnamnesisQuestionResponse,
            personal_shared::AnamnesisAnswerRequest,
            personal_shared::AnamnesisAnswerResponse,
            Perimeters,
            SkinFolds,
            BodyComposition
        )
    ),
    tags(
        (name = "System", description = "Health probes"),
        (name = "Auth", description = "Login and tokens"),
        (name = "Users", description = "Accounts"),
        (name = "Exercises", description = "Exercise catalogue"),
        (name = "Trainings", description = "Training plans"),
        (name = "Physical assessments", description = "Body measurements and composition"),
        (name = "Anamnesis", description = "Health history questionnaire")
    ),
    modifiers(&BearerAuth),
    info(
        title = "Personal API",
        description = "Backend for personal trainers and their students"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI at `/swagger-ui`, with the document built once and served
/// at [`OPENAPI_JSON_PATH`]
pub fn docs_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
