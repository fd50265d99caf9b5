//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories. They raise `DomainError`s for expected failures and wrap
//! repository failures as internal errors.

pub mod anamnesis;
pub mod exercise;
pub mod physical_assessment;
pub mod training;
pub mod user;

pub use anamnesis::AnamnesisService;
pub use exercise::ExerciseService;
pub use physical_assessment::PhysicalAssessmentService;
pub use training::TrainingService;
pub use user::UserService;
