//! Personal API Shared Library
//!
//! Domain errors, API types, validation rules and body composition
//! calculations shared by the backend and its tests.

pub mod body_composition;
pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{MuscleGroup, Sex, UserRole, WeekDay};
pub use types::*;
pub use validation::{ValidateRequest, Violations};
