//! Anamnesis questionnaire service

use crate::error::ApiError;
use crate::repositories::{AnamnesisAnswerRecord, AnamnesisQuestionRecord, AnamnesisRepository};
use personal_shared::{AnamnesisAnswerResponse, AnamnesisQuestionResponse, DomainError};
use sqlx::PgPool;
use uuid::Uuid;

impl From<AnamnesisQuestionRecord> for AnamnesisQuestionResponse {
    fn from(record: AnamnesisQuestionRecord) -> Self {
        AnamnesisQuestionResponse {
            id: record.id,
            question: record.question,
            created_by: record.created_by,
            created_at: record.created_at,
        }
    }
}

impl From<AnamnesisAnswerRecord> for AnamnesisAnswerResponse {
    fn from(record: AnamnesisAnswerRecord) -> Self {
        AnamnesisAnswerResponse {
            question_id: record.question_id,
            question: record.question,
            answer: record.answer,
            answered_at: record.answered_at,
        }
    }
}

pub struct AnamnesisService;

impl AnamnesisService {
    pub async fn list_questions(pool: &PgPool) -> Result<Vec<AnamnesisQuestionResponse>, ApiError> {
        let records = AnamnesisRepository::list_questions(pool)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn create_question(
        pool: &PgPool,
        created_by: Uuid,
        question: &str,
    ) -> Result<AnamnesisQuestionResponse, ApiError> {
        let record = AnamnesisRepository::create_question(pool, created_by, question.trim())
            .await
            .map_err(ApiError::Internal)?;
        Ok(record.into())
    }

    pub async fn delete_question(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = AnamnesisRepository::delete_question(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(DomainError::not_found("anamnesis question").into());
        }
        Ok(())
    }

    /// Record (or replace) the caller's answer to a question
    pub async fn answer(
        pool: &PgPool,
        user_id: Uuid,
        question_id: Uuid,
        answer: &str,
    ) -> Result<AnamnesisAnswerResponse, ApiError> {
        AnamnesisRepository::find_question(pool, question_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("anamnesis question"))?;

        let record = AnamnesisRepository::upsert_answer(pool, question_id, user_id, answer.trim())
            .await
            .map_err(ApiError::Internal)?;
        Ok(record.into())
    }

    pub async fn list_answers(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<AnamnesisAnswerResponse>, ApiError> {
        let records = AnamnesisRepository::list_answers(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
