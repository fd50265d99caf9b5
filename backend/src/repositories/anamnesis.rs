//! Anamnesis questions and answers

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnamnesisQuestionRecord {
    pub id: Uuid,
    pub question: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Answer joined with its question text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnamnesisAnswerRecord {
    pub question_id: Uuid,
    pub question: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

pub struct AnamnesisRepository;

impl AnamnesisRepository {
    pub async fn create_question(
        pool: &PgPool,
        created_by: Uuid,
        question: &str,
    ) -> Result<AnamnesisQuestionRecord> {
        let record = sqlx::query_as::<_, AnamnesisQuestionRecord>(
            r#"
            INSERT INTO anamnesis_questions (question, created_by)
            VALUES ($1, $2)
            RETURNING id, question, created_by, created_at
            "#,
        )
        .bind(question)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list_questions(pool: &PgPool) -> Result<Vec<AnamnesisQuestionRecord>> {
        let records = sqlx::query_as::<_, AnamnesisQuestionRecord>(
            r#"
            SELECT id, question, created_by, created_at
            FROM anamnesis_questions
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn find_question(pool: &PgPool, id: Uuid) -> Result<Option<AnamnesisQuestionRecord>> {
        let record = sqlx::query_as::<_, AnamnesisQuestionRecord>(
            "SELECT id, question, created_by, created_at FROM anamnesis_questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete_question(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM anamnesis_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert or replace the user's answer to a question
    pub async fn upsert_answer(
        pool: &PgPool,
        question_id: Uuid,
        user_id: Uuid,
        answer: &str,
    ) -> Result<AnamnesisAnswerRecord> {
        let record = sqlx::query_as::<_, AnamnesisAnswerRecord>(
            r#"
            WITH saved AS (
                INSERT INTO anamnesis_answers (question_id, user_id, answer)
                VALUES ($1, $2, $3)
                ON CONFLICT (question_id, user_id)
                DO UPDATE SET answer = EXCLUDED.answer, answered_at = NOW()
                RETURNING question_id, answer, answered_at
            )
            SELECT s.question_id, q.question, s.answer, s.answered_at
            FROM saved s
            JOIN anamnesis_questions q ON q.id = s.question_id
            "#,
        )
        .bind(question_id)
        .bind(user_id)
        .bind(answer)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list_answers(pool: &PgPool, user_id: Uuid) -> Result<Vec<AnamnesisAnswerRecord>> {
        let records = sqlx::query_as::<_, AnamnesisAnswerRecord>(
            r#"
            SELECT a.question_id, q.question, a.answer, a.answered_at
            FROM anamnesis_answers a
            JOIN anamnesis_questions q ON q.id = a.question_id
            WHERE a.user_id = $1
            ORDER BY q.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
