//! Training and exercise-training repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

// ============================================================================
// Trainings
// ============================================================================

/// Training record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrainingRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub week_day: Option<String>,
    pub owner_id: Uuid,
    pub student_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a training
#[derive(Debug, Clone)]
pub struct TrainingInput {
    pub name: String,
    pub description: Option<String>,
    pub week_day: Option<String>,
    pub student_id: Option<Uuid>,
}

/// Training repository
pub struct TrainingRepository;

impl TrainingRepository {
    pub async fn create(pool: &PgPool, owner_id: Uuid, input: TrainingInput) -> Result<TrainingRecord> {
        let record = sqlx::query_as::<_, TrainingRecord>(
            r#"
            INSERT INTO trainings (name, description, week_day, owner_id, student_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, week_day, owner_id, student_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.week_day)
        .bind(owner_id)
        .bind(input.student_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Trainings the user owns or is assigned to
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TrainingRecord>> {
        let records = sqlx::query_as::<_, TrainingRecord>(
            r#"
            SELECT id, name, description, week_day, owner_id, student_id, created_at, updated_at
            FROM trainings
            WHERE owner_id = $1 OR student_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TrainingRecord>> {
        let record = sqlx::query_as::<_, TrainingRecord>(
            r#"
            SELECT id, name, description, week_day, owner_id, student_id, created_at, updated_at
            FROM trainings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn update(pool: &PgPool, id: Uuid, input: TrainingInput) -> Result<Option<TrainingRecord>> {
        let record = sqlx::query_as::<_, TrainingRecord>(
            r#"
            UPDATE trainings
            SET name = $2, description = $3, week_day = $4, student_id = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, week_day, owner_id, student_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.week_day)
        .bind(input.student_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Exercise trainings
// ============================================================================

/// Exercise prescribed in a training, joined with the exercise name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseTrainingRecord {
    pub id: Uuid,
    pub training_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub sets: i32,
    pub repetitions: i32,
    pub load_kg: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub position: i32,
}

/// Input for adding an exercise to a training
#[derive(Debug, Clone)]
pub struct AddExerciseTraining {
    pub exercise_id: Uuid,
    pub sets: i32,
    pub repetitions: i32,
    pub load_kg: Option<f64>,
    pub rest_seconds: Option<i32>,
    /// Appended at the end when `None`
    pub position: Option<i32>,
}

/// Exercise-training repository
pub struct ExerciseTrainingRepository;

impl ExerciseTrainingRepository {
    pub async fn add(
        pool: &PgPool,
        training_id: Uuid,
        input: AddExerciseTraining,
    ) -> Result<ExerciseTrainingRecord> {
        let record = sqlx::query_as::<_, ExerciseTrainingRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO exercise_trainings
                    (training_id, exercise_id, sets, repetitions, load_kg, rest_seconds, position)
                VALUES ($1, $2, $3, $4, $5, $6,
                        COALESCE($7, (SELECT COALESCE(MAX(position) + 1, 0)
                                      FROM exercise_trainings WHERE training_id = $1)))
                RETURNING id, training_id, exercise_id, sets, repetitions, load_kg,
                          rest_seconds, position
            )
            SELECT i.id, i.training_id, i.exercise_id, e.name AS exercise_name, i.sets,
                   i.repetitions, i.load_kg, i.rest_seconds, i.position
            FROM inserted i
            JOIN exercises e ON e.id = i.exercise_id
            "#,
        )
        .bind(training_id)
        .bind(input.exercise_id)
        .bind(input.sets)
        .bind(input.repetitions)
        .bind(input.load_kg)
        .bind(input.rest_seconds)
        .bind(input.position)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Exercises of a training in prescription order
    pub async fn list_for_training(
        pool: &PgPool,
        training_id: Uuid,
    ) -> Result<Vec<ExerciseTrainingRecord>> {
        let records = sqlx::query_as::<_, ExerciseTrainingRecord>(
            r#"
            SELECT et.id, et.training_id, et.exercise_id, e.name AS exercise_name, et.sets,
                   et.repetitions, et.load_kg, et.rest_seconds, et.position
            FROM exercise_trainings et
            JOIN exercises e ON e.id = et.exercise_id
            WHERE et.training_id = $1
            ORDER BY et.position, et.created_at
            "#,
        )
        .bind(training_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, training_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercise_trainings WHERE id = $1 AND training_id = $2")
            .bind(id)
            .bind(training_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
