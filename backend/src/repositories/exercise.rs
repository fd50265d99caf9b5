//! Exercise repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating an exercise
#[derive(Debug, Clone)]
pub struct ExerciseInput {
    pub name: String,
    pub muscle_group: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

/// Exercise repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    pub async fn create(
        pool: &PgPool,
        created_by: Uuid,
        input: ExerciseInput,
    ) -> Result<ExerciseRecord> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            INSERT INTO exercises (name, muscle_group, description, video_url, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, muscle_group, description, video_url, created_by,
                      created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.muscle_group)
        .bind(&input.description)
        .bind(&input.video_url)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List exercises, optionally filtered by muscle group
    pub async fn list(pool: &PgPool, muscle_group: Option<&str>) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, name, muscle_group, description, video_url, created_by,
                   created_at, updated_at
            FROM exercises
            WHERE $1::TEXT IS NULL OR muscle_group = $1
            ORDER BY muscle_group, name
            "#,
        )
        .bind(muscle_group)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ExerciseRecord>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT id, name, muscle_group, description, video_url, created_by,
                   created_at, updated_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: ExerciseInput,
    ) -> Result<Option<ExerciseRecord>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            UPDATE exercises
            SET name = $2, muscle_group = $3, description = $4, video_url = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, muscle_group, description, video_url, created_by,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.muscle_group)
        .bind(&input.description)
        .bind(&input.video_url)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
