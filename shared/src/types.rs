//! API request and response types

use crate::body_composition::{BodyComposition, Perimeters, SkinFolds};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// ============================================================================
// Auth
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Registration request
///
/// `role` is a plain string so an unknown value is reported with the
/// other validation failures instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Exercises
// ============================================================================

/// Create or update an exercise
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseRequest {
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExerciseListQuery {
    pub muscle_group: Option<String>,
}

// ============================================================================
// Trainings
// ============================================================================

/// Create or update a training
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub week_day: Option<String>,
    #[serde(default)]
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub week_day: Option<String>,
    pub owner_id: Uuid,
    pub student_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Training with its ordered exercise prescriptions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingDetailResponse {
    pub training: TrainingResponse,
    pub exercises: Vec<ExerciseTrainingResponse>,
}

/// Add an exercise to a training
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddExerciseTrainingRequest {
    pub exercise_id: Uuid,
    pub sets: i32,
    pub repetitions: i32,
    #[serde(default)]
    pub load_kg: Option<f64>,
    #[serde(default)]
    pub rest_seconds: Option<i32>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseTrainingResponse {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub sets: i32,
    pub repetitions: i32,
    pub load_kg: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub position: i32,
}

// ============================================================================
// Physical assessments
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePhysicalAssessmentRequest {
    pub assessed_at: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub sex: String,
    #[serde(default)]
    pub perimeters: Option<Perimeters>,
    #[serde(default)]
    pub skin_folds: Option<SkinFolds>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhysicalAssessmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessed_at: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub sex: String,
    pub bmi: f64,
    pub waist_hip_ratio: Option<f64>,
    pub perimeters: Option<Perimeters>,
    pub skin_folds: Option<SkinFolds>,
    pub body_composition: Option<BodyComposition>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Anamnesis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnamnesisQuestionRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnamnesisQuestionResponse {
    pub id: Uuid,
    pub question: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnamnesisAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnamnesisAnswerResponse {
    pub question_id: Uuid,
    pub question: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}
