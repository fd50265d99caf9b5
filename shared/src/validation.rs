//! Input validation
//!
//! Each request type reports *all* of its violations, in field order, so
//! a client can fix everything in one round trip. Individual rules are
//! small functions returning `Result<(), String>`; [`Violations`] collects
//! them.

use crate::body_composition::{Perimeters, SkinFolds};
use crate::errors::DomainError;
use crate::models::{MuscleGroup, Sex, UserRole, WeekDay};
use crate::types::{
    AddExerciseTrainingRequest, AnamnesisAnswerRequest, AnamnesisQuestionRequest,
    CreatePhysicalAssessmentRequest, CreateUserRequest, ExerciseRequest, LoginRequest,
    RefreshTokenRequest, TrainingRequest, UpdateUserRequest,
};
use validator::{ValidateEmail, ValidateUrl};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_TEXT_LEN: usize = 2000;

/// Ordered collection of validation messages
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rule's message if it failed
    pub fn check(&mut self, rule: Result<(), String>) -> &mut Self {
        if let Err(message) = rule {
            self.0.push(message);
        }
        self
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Request payloads that can describe what is wrong with them
pub trait ValidateRequest {
    fn violations(&self) -> Vec<String>;

    fn validate(&self) -> Result<(), DomainError> {
        let messages = self.violations();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation { messages })
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !email.validate_email() {
        return Err("email is invalid".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("password must be at most 128 characters".to_string());
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), String> {
    if age <= 0 {
        return Err("age must be positive".to_string());
    }
    if age > 150 {
        return Err("age must be at most 150".to_string());
    }
    Ok(())
}

pub fn validate_positive(field: &str, value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", field));
    }
    if value <= 0.0 {
        return Err(format!("{} must be positive", field));
    }
    Ok(())
}

pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    validate_positive("weight_kg", weight_kg)?;
    if weight_kg > 500.0 {
        return Err("weight_kg must be at most 500".to_string());
    }
    Ok(())
}

pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    validate_positive("height_cm", height_cm)?;
    if height_cm < 50.0 || height_cm > 300.0 {
        return Err("height_cm must be between 50 and 300".to_string());
    }
    Ok(())
}

pub fn validate_one_of<T: std::str::FromStr>(
    field: &str,
    value: &str,
    allowed: &[&str],
) -> Result<(), String> {
    match value.parse::<T>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("{} must be one of: {}", field, allowed.join(", "))),
    }
}

pub const VALID_MUSCLE_GROUPS: &[&str] = &[
    "chest",
    "back",
    "shoulders",
    "biceps",
    "triceps",
    "legs",
    "glutes",
    "core",
    "full_body",
    "cardio",
];

pub const VALID_WEEK_DAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn validate_skin_folds(folds: &SkinFolds, violations: &mut Violations) {
    for (site, value) in folds.sites() {
        violations.check(validate_positive(&format!("skin_folds.{}", site), value));
    }
}

fn validate_perimeters(perimeters: &Perimeters, violations: &mut Violations) {
    for (site, value) in perimeters.sites() {
        if let Some(value) = value {
            violations.check(validate_positive(&format!("perimeters.{}", site), value));
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

impl ValidateRequest for CreateUserRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("name", &self.name))
            .check(validate_max_len("name", &self.name, MAX_NAME_LEN))
            .check(validate_email(&self.email))
            .check(validate_password(&self.password))
            .check(validate_age(self.age));
        if let Some(role) = &self.role {
            v.check(validate_one_of::<UserRole>("role", role, UserRole::ALL));
        }
        v.into_messages()
    }
}

impl ValidateRequest for UpdateUserRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("name", &self.name))
            .check(validate_max_len("name", &self.name, MAX_NAME_LEN))
            .check(validate_age(self.age));
        v.into_messages()
    }
}

impl ValidateRequest for LoginRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("email", &self.email))
            .check(validate_required("password", &self.password));
        v.into_messages()
    }
}

impl ValidateRequest for RefreshTokenRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("refresh_token", &self.refresh_token));
        v.into_messages()
    }
}

impl ValidateRequest for ExerciseRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("name", &self.name))
            .check(validate_max_len("name", &self.name, MAX_NAME_LEN))
            .check(validate_one_of::<MuscleGroup>(
                "muscle_group",
                &self.muscle_group,
                VALID_MUSCLE_GROUPS,
            ));
        if let Some(description) = &self.description {
            v.check(validate_max_len("description", description, MAX_TEXT_LEN));
        }
        if let Some(url) = &self.video_url {
            if !url.validate_url() {
                v.check(Err("video_url must be a valid URL".to_string()));
            }
        }
        v.into_messages()
    }
}

impl ValidateRequest for TrainingRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("name", &self.name))
            .check(validate_max_len("name", &self.name, MAX_NAME_LEN));
        if let Some(description) = &self.description {
            v.check(validate_max_len("description", description, MAX_TEXT_LEN));
        }
        if let Some(day) = &self.week_day {
            v.check(validate_one_of::<WeekDay>("week_day", day, VALID_WEEK_DAYS));
        }
        v.into_messages()
    }
}

impl ValidateRequest for AddExerciseTrainingRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        if self.sets <= 0 {
            v.check(Err("sets must be positive".to_string()));
        }
        if self.repetitions <= 0 {
            v.check(Err("repetitions must be positive".to_string()));
        }
        if let Some(load) = self.load_kg {
            if load.is_nan() || load.is_infinite() || load < 0.0 {
                v.check(Err("load_kg cannot be negative".to_string()));
            }
        }
        if matches!(self.rest_seconds, Some(rest) if rest < 0) {
            v.check(Err("rest_seconds cannot be negative".to_string()));
        }
        if matches!(self.position, Some(position) if position < 0) {
            v.check(Err("position cannot be negative".to_string()));
        }
        v.into_messages()
    }
}

impl ValidateRequest for CreatePhysicalAssessmentRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_weight_kg(self.weight_kg))
            .check(validate_height_cm(self.height_cm))
            .check(validate_age(self.age))
            .check(validate_one_of::<Sex>("sex", &self.sex, Sex::ALL));
        if self.assessed_at > chrono::Utc::now().date_naive() {
            v.check(Err("assessed_at cannot be in the future".to_string()));
        }
        if let Some(perimeters) = &self.perimeters {
            validate_perimeters(perimeters, &mut v);
        }
        if let Some(folds) = &self.skin_folds {
            validate_skin_folds(folds, &mut v);
        }
        if let Some(notes) = &self.notes {
            v.check(validate_max_len("notes", notes, MAX_TEXT_LEN));
        }
        v.into_messages()
    }
}

impl ValidateRequest for AnamnesisQuestionRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("question", &self.question))
            .check(validate_max_len("question", &self.question, MAX_TEXT_LEN));
        v.into_messages()
    }
}

impl ValidateRequest for AnamnesisAnswerRequest {
    fn violations(&self) -> Vec<String> {
        let mut v = Violations::new();
        v.check(validate_required("answer", &self.answer))
            .check(validate_max_len("answer", &self.answer, MAX_TEXT_LEN));
        v.into_messages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rstest::rstest;

    fn user(name: &str, email: &str, password: &str, age: i32) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            age,
            role: None,
        }
    }

    #[test]
    fn test_valid_user_has_no_violations() {
        let req = user("Ana", "ana@example.com", "longenough", 30);
        assert!(req.violations().is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_user_violations_in_field_order() {
        let req = user("", "ana@example.com", "longenough", -1);
        assert_eq!(
            req.violations(),
            vec!["name is required".to_string(), "age must be positive".to_string()]
        );
    }

    #[test]
    fn test_every_user_violation_reported() {
        let mut req = user(" ", "nope", "short", 0);
        req.role = Some("admin".to_string());
        assert_eq!(
            req.violations(),
            vec![
                "name is required",
                "email is invalid",
                "password must be at least 8 characters",
                "age must be positive",
                "role must be one of: trainer, student",
            ]
        );
    }

    #[test]
    fn test_validate_returns_domain_validation_error() {
        let err = user("", "ana@example.com", "longenough", 20).validate().unwrap_err();
        assert_eq!(err, DomainError::validation(["name is required"]));
    }

    #[rstest]
    #[case(0, Some("age must be positive"))]
    #[case(-5, Some("age must be positive"))]
    #[case(1, None)]
    #[case(150, None)]
    #[case(151, Some("age must be at most 150"))]
    fn test_age_rule(#[case] age: i32, #[case] expected: Option<&str>) {
        assert_eq!(validate_age(age).err().as_deref(), expected);
    }

    #[test]
    fn test_exercise_rules() {
        let req = ExerciseRequest {
            name: "Squat".to_string(),
            muscle_group: "wings".to_string(),
            description: None,
            video_url: Some("not a url".to_string()),
        };
        assert_eq!(
            req.violations(),
            vec![
                format!("muscle_group must be one of: {}", VALID_MUSCLE_GROUPS.join(", ")),
                "video_url must be a valid URL".to_string(),
            ]
        );
    }

    #[test]
    fn test_exercise_training_rules() {
        let req = AddExerciseTrainingRequest {
            exercise_id: uuid::Uuid::new_v4(),
            sets: 0,
            repetitions: 10,
            load_kg: Some(-1.0),
            rest_seconds: Some(60),
            position: None,
        };
        assert_eq!(
            req.violations(),
            vec!["sets must be positive", "load_kg cannot be negative"]
        );
    }

    #[test]
    fn test_assessment_rules() {
        let req = CreatePhysicalAssessmentRequest {
            assessed_at: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            weight_kg: 0.0,
            height_cm: 175.0,
            age: 30,
            sex: "other".to_string(),
            perimeters: Some(Perimeters {
                waist: Some(-3.0),
                ..Default::default()
            }),
            skin_folds: None,
            notes: None,
        };
        assert_eq!(
            req.violations(),
            vec![
                "weight_kg must be positive",
                "sex must be one of: male, female",
                "perimeters.waist must be positive",
            ]
        );
    }

    #[test]
    fn test_violations_skip_passing_rules() {
        let mut v = Violations::new();
        v.check(Ok(())).check(Err("first".to_string())).check(Err("second".to_string()));
        assert_eq!(v.into_messages(), vec!["first", "second"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Messages come out in exactly the order rules were checked
        #[test]
        fn prop_violations_preserve_order(messages in prop::collection::vec("[a-z ]{1,20}", 0..10)) {
            let mut v = Violations::new();
            for message in &messages {
                v.check(Err(message.clone()));
            }
            prop_assert_eq!(v.into_messages(), messages);
        }

        #[test]
        fn prop_positive_ages_in_range_are_valid(age in 1i32..=150) {
            prop_assert!(validate_age(age).is_ok());
        }
    }
}
