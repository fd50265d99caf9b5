//! Physical assessment service
//!
//! BMI is always derived from weight and height. Body density, body fat
//! and the fat/lean mass split are derived only when skin folds were
//! measured.

use crate::error::ApiError;
use crate::repositories::{CreateAssessment, FullAssessment, PhysicalAssessmentRepository};
use personal_shared::body_composition::{calculate_bmi, calculate_body_composition};
use personal_shared::{
    CreatePhysicalAssessmentRequest, DomainError, PhysicalAssessmentResponse, Sex,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

impl From<FullAssessment> for PhysicalAssessmentResponse {
    fn from(full: FullAssessment) -> Self {
        let a = full.assessment;
        PhysicalAssessmentResponse {
            id: a.id,
            user_id: a.user_id,
            assessed_at: a.assessed_at,
            weight_kg: a.weight_kg,
            height_cm: a.height_cm,
            age: a.age,
            sex: a.sex,
            bmi: calculate_bmi(a.weight_kg, a.height_cm),
            waist_hip_ratio: full.perimeters.and_then(|p| p.waist_hip_ratio()),
            perimeters: full.perimeters,
            skin_folds: full.skin_folds,
            body_composition: full.body_composition,
            notes: a.notes,
            created_at: a.created_at,
        }
    }
}

/// Turn a validated request into the rows to store
pub fn build_assessment(
    user_id: Uuid,
    req: CreatePhysicalAssessmentRequest,
) -> Result<CreateAssessment, DomainError> {
    let sex = req
        .sex
        .parse::<Sex>()
        .map_err(|e| DomainError::validation([e]))?;

    let body_composition = req.skin_folds.as_ref().map(|folds| {
        calculate_body_composition(req.weight_kg, req.height_cm, req.age, sex, folds)
    });

    Ok(CreateAssessment {
        user_id,
        assessed_at: req.assessed_at,
        weight_kg: req.weight_kg,
        height_cm: req.height_cm,
        age: req.age,
        sex: sex.as_str().to_string(),
        notes: req.notes,
        perimeters: req.perimeters,
        skin_folds: req.skin_folds,
        body_composition,
    })
}

pub struct PhysicalAssessmentService;

impl PhysicalAssessmentService {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: CreatePhysicalAssessmentRequest,
    ) -> Result<PhysicalAssessmentResponse, ApiError> {
        let input = build_assessment(user_id, req)?;
        if let Some(composition) = &input.body_composition {
            debug!(
                body_fat_percent = composition.body_fat_percent,
                "Body composition calculated"
            );
        }

        let full = PhysicalAssessmentRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        Ok(full.into())
    }

    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<PhysicalAssessmentResponse>, ApiError> {
        let assessments = PhysicalAssessmentRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(assessments.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<PhysicalAssessmentResponse, ApiError> {
        Ok(Self::find_owned(pool, user_id, id).await?.into())
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        Self::find_owned(pool, user_id, id).await?;

        PhysicalAssessmentRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }

    async fn find_owned(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<FullAssessment, ApiError> {
        let full = PhysicalAssessmentRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("physical assessment"))?;

        // Someone else's assessment is reported as missing
        if full.assessment.user_id != user_id {
            return Err(DomainError::not_found("physical assessment").into());
        }
        Ok(full)
    }
}
