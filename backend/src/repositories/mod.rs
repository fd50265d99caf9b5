//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod anamnesis;
pub mod error;
pub mod exercise;
pub mod physical_assessment;
pub mod training;
pub mod user;

pub use anamnesis::{AnamnesisAnswerRecord, AnamnesisQuestionRecord, AnamnesisRepository};
pub use error::{unique_violation, USERS_EMAIL_KEY};
pub use exercise::{ExerciseInput, ExerciseRecord, ExerciseRepository};
pub use physical_assessment::{CreateAssessment, FullAssessment, PhysicalAssessmentRepository};
pub use training::{
    AddExerciseTraining, ExerciseTrainingRecord, ExerciseTrainingRepository, TrainingInput,
    TrainingRecord, TrainingRepository,
};
pub use user::{CreateUser, UserRecord, UserRepository};
