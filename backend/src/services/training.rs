//! Training plans and the exercises prescribed in them
//!
//! A training belongs to the user who created it (`owner_id`) and may be
//! assigned to a student. Both can read it; only the owner can change it.

use crate::error::ApiError;
use crate::repositories::{
    AddExerciseTraining, ExerciseRepository, ExerciseTrainingRecord, ExerciseTrainingRepository,
    TrainingInput, TrainingRecord, TrainingRepository, UserRepository,
};
use personal_shared::{
    AddExerciseTrainingRequest, DomainError, ExerciseTrainingResponse, TrainingDetailResponse,
    TrainingRequest, TrainingResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

impl From<TrainingRecord> for TrainingResponse {
    fn from(record: TrainingRecord) -> Self {
        TrainingResponse {
            id: record.id,
            name: record.name,
            description: record.description,
            week_day: record.week_day,
            owner_id: record.owner_id,
            student_id: record.student_id,
            created_at: record.created_at,
        }
    }
}

impl From<ExerciseTrainingRecord> for ExerciseTrainingResponse {
    fn from(record: ExerciseTrainingRecord) -> Self {
        ExerciseTrainingResponse {
            id: record.id,
            exercise_id: record.exercise_id,
            exercise_name: record.exercise_name,
            sets: record.sets,
            repetitions: record.repetitions,
            load_kg: record.load_kg,
            rest_seconds: record.rest_seconds,
            position: record.position,
        }
    }
}

impl From<TrainingRequest> for TrainingInput {
    fn from(req: TrainingRequest) -> Self {
        TrainingInput {
            name: req.name.trim().to_string(),
            description: req.description,
            week_day: req.week_day.map(|d| d.to_lowercase()),
            student_id: req.student_id,
        }
    }
}

fn can_read(training: &TrainingRecord, user_id: Uuid) -> bool {
    training.owner_id == user_id || training.student_id == Some(user_id)
}

pub struct TrainingService;

impl TrainingService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<TrainingResponse>, ApiError> {
        let records = TrainingRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        req: TrainingRequest,
    ) -> Result<TrainingResponse, ApiError> {
        if let Some(student_id) = req.student_id {
            Self::ensure_student_exists(pool, student_id).await?;
        }

        let record = TrainingRepository::create(pool, owner_id, req.into())
            .await
            .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    /// Training with its exercises in prescription order
    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<TrainingDetailResponse, ApiError> {
        let training = Self::find(pool, id).await?;
        if !can_read(&training, user_id) {
            return Err(DomainError::Forbidden(
                "you do not have access to this training".to_string(),
            )
            .into());
        }

        let exercises = ExerciseTrainingRepository::list_for_training(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(TrainingDetailResponse {
            training: training.into(),
            exercises: exercises.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: TrainingRequest,
    ) -> Result<TrainingResponse, ApiError> {
        Self::find_owned(pool, user_id, id).await?;
        if let Some(student_id) = req.student_id {
            Self::ensure_student_exists(pool, student_id).await?;
        }

        let record = TrainingRepository::update(pool, id, req.into())
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("training"))?;

        Ok(record.into())
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        Self::find_owned(pool, user_id, id).await?;

        TrainingRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }

    pub async fn add_exercise(
        pool: &PgPool,
        user_id: Uuid,
        training_id: Uuid,
        req: AddExerciseTrainingRequest,
    ) -> Result<ExerciseTrainingResponse, ApiError> {
        Self::find_owned(pool, user_id, training_id).await?;

        ExerciseRepository::find_by_id(pool, req.exercise_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("exercise"))?;

        let record = ExerciseTrainingRepository::add(
            pool,
            training_id,
            AddExerciseTraining {
                exercise_id: req.exercise_id,
                sets: req.sets,
                repetitions: req.repetitions,
                load_kg: req.load_kg,
                rest_seconds: req.rest_seconds,
                position: req.position,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    pub async fn remove_exercise(
        pool: &PgPool,
        user_id: Uuid,
        training_id: Uuid,
        exercise_training_id: Uuid,
    ) -> Result<(), ApiError> {
        Self::find_owned(pool, user_id, training_id).await?;

        let deleted = ExerciseTrainingRepository::delete(pool, training_id, exercise_training_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(DomainError::not_found("exercise training").into());
        }
        Ok(())
    }

    async fn find(pool: &PgPool, id: Uuid) -> Result<TrainingRecord, ApiError> {
        let record = TrainingRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("training"))?;
        Ok(record)
    }

    async fn find_owned(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<TrainingRecord, ApiError> {
        let record = Self::find(pool, id).await?;
        if record.owner_id != user_id {
            return Err(DomainError::Forbidden(
                "only the owner can modify this training".to_string(),
            )
            .into());
        }
        Ok(record)
    }

    async fn ensure_student_exists(pool: &PgPool, student_id: Uuid) -> Result<(), ApiError> {
        UserRepository::find_by_id(pool, student_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("student"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn training(owner_id: Uuid, student_id: Option<Uuid>) -> TrainingRecord {
        TrainingRecord {
            id: Uuid::new_v4(),
            name: "Upper A".to_string(),
            description: None,
            week_day: Some("monday".to_string()),
            owner_id,
            student_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_and_assigned_student_can_read() {
        let owner = Uuid::new_v4();
        let student = Uuid::new_v4();
        let record = training(owner, Some(student));

        assert!(can_read(&record, owner));
        assert!(can_read(&record, student));
        assert!(!can_read(&record, Uuid::new_v4()));
    }

    #[test]
    fn test_unassigned_training_is_private_to_owner() {
        let owner = Uuid::new_v4();
        let record = training(owner, None);
        assert!(can_read(&record, owner));
        assert!(!can_read(&record, Uuid::new_v4()));
    }

    #[test]
    fn test_request_week_day_is_lowercased() {
        let input = TrainingInput::from(TrainingRequest {
            name: " Legs ".to_string(),
            description: None,
            week_day: Some("Friday".to_string()),
            student_id: None,
        });
        assert_eq!(input.name, "Legs");
        assert_eq!(input.week_day.as_deref(), Some("friday"));
    }
}
