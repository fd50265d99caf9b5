//! Physical assessment repository
//!
//! An assessment row owns up to three child rows (perimeters, skin folds,
//! body composition) that are written in the same transaction.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use personal_shared::body_composition::{BodyComposition, Perimeters, SkinFolds};
use sqlx::PgPool;
use uuid::Uuid;

/// Physical assessment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PhysicalAssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessed_at: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub sex: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PerimetersRow {
    chest: Option<f64>,
    waist: Option<f64>,
    abdomen: Option<f64>,
    hip: Option<f64>,
    right_arm: Option<f64>,
    left_arm: Option<f64>,
    right_thigh: Option<f64>,
    left_thigh: Option<f64>,
    right_calf: Option<f64>,
    left_calf: Option<f64>,
}

impl From<PerimetersRow> for Perimeters {
    fn from(row: PerimetersRow) -> Self {
        Perimeters {
            chest: row.chest,
            waist: row.waist,
            abdomen: row.abdomen,
            hip: row.hip,
            right_arm: row.right_arm,
            left_arm: row.left_arm,
            right_thigh: row.right_thigh,
            left_thigh: row.left_thigh,
            right_calf: row.right_calf,
            left_calf: row.left_calf,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SkinFoldsRow {
    chest: f64,
    midaxillary: f64,
    triceps: f64,
    subscapular: f64,
    abdominal: f64,
    suprailiac: f64,
    thigh: f64,
}

impl From<SkinFoldsRow> for SkinFolds {
    fn from(row: SkinFoldsRow) -> Self {
        SkinFolds {
            chest: row.chest,
            midaxillary: row.midaxillary,
            triceps: row.triceps,
            subscapular: row.subscapular,
            abdominal: row.abdominal,
            suprailiac: row.suprailiac,
            thigh: row.thigh,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct BodyCompositionRow {
    bmi: f64,
    body_density: f64,
    body_fat_percent: f64,
    fat_mass_kg: f64,
    lean_mass_kg: f64,
}

impl From<BodyCompositionRow> for BodyComposition {
    fn from(row: BodyCompositionRow) -> Self {
        BodyComposition {
            bmi: row.bmi,
            body_density: row.body_density,
            body_fat_percent: row.body_fat_percent,
            fat_mass_kg: row.fat_mass_kg,
            lean_mass_kg: row.lean_mass_kg,
        }
    }
}

/// Assessment together with its measurements
#[derive(Debug, Clone)]
pub struct FullAssessment {
    pub assessment: PhysicalAssessmentRecord,
    pub perimeters: Option<Perimeters>,
    pub skin_folds: Option<SkinFolds>,
    pub body_composition: Option<BodyComposition>,
}

/// Input for creating an assessment
#[derive(Debug, Clone)]
pub struct CreateAssessment {
    pub user_id: Uuid,
    pub assessed_at: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub sex: String,
    pub notes: Option<String>,
    pub perimeters: Option<Perimeters>,
    pub skin_folds: Option<SkinFolds>,
    pub body_composition: Option<BodyComposition>,
}

/// Physical assessment repository
pub struct PhysicalAssessmentRepository;

impl PhysicalAssessmentRepository {
    pub async fn create(pool: &PgPool, input: CreateAssessment) -> Result<FullAssessment> {
        let mut tx = pool.begin().await?;

        let assessment = sqlx::query_as::<_, PhysicalAssessmentRecord>(
            r#"
            INSERT INTO physical_assessments
                (user_id, assessed_at, weight_kg, height_cm, age, sex, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, assessed_at, weight_kg, height_cm, age, sex, notes, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.assessed_at)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(input.age)
        .bind(&input.sex)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(p) = &input.perimeters {
            sqlx::query(
                r#"
                INSERT INTO perimeters (assessment_id, chest, waist, abdomen, hip, right_arm,
                    left_arm, right_thigh, left_thigh, right_calf, left_calf)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(assessment.id)
            .bind(p.chest)
            .bind(p.waist)
            .bind(p.abdomen)
            .bind(p.hip)
            .bind(p.right_arm)
            .bind(p.left_arm)
            .bind(p.right_thigh)
            .bind(p.left_thigh)
            .bind(p.right_calf)
            .bind(p.left_calf)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(f) = &input.skin_folds {
            sqlx::query(
                r#"
                INSERT INTO skin_folds (assessment_id, chest, midaxillary, triceps, subscapular,
                    abdominal, suprailiac, thigh)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(assessment.id)
            .bind(f.chest)
            .bind(f.midaxillary)
            .bind(f.triceps)
            .bind(f.subscapular)
            .bind(f.abdominal)
            .bind(f.suprailiac)
            .bind(f.thigh)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(c) = &input.body_composition {
            sqlx::query(
                r#"
                INSERT INTO body_compositions (assessment_id, bmi, body_density,
                    body_fat_percent, fat_mass_kg, lean_mass_kg)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(assessment.id)
            .bind(c.bmi)
            .bind(c.body_density)
            .bind(c.body_fat_percent)
            .bind(c.fat_mass_kg)
            .bind(c.lean_mass_kg)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(FullAssessment {
            assessment,
            perimeters: input.perimeters,
            skin_folds: input.skin_folds,
            body_composition: input.body_composition,
        })
    }

    /// Assessments of a user, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<FullAssessment>> {
        let records = sqlx::query_as::<_, PhysicalAssessmentRecord>(
            r#"
            SELECT id, user_id, assessed_at, weight_kg, height_cm, age, sex, notes, created_at
            FROM physical_assessments
            WHERE user_id = $1
            ORDER BY assessed_at DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut assessments = Vec::with_capacity(records.len());
        for record in records {
            assessments.push(Self::load_measurements(pool, record).await?);
        }

        Ok(assessments)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<FullAssessment>> {
        let record = sqlx::query_as::<_, PhysicalAssessmentRecord>(
            r#"
            SELECT id, user_id, assessed_at, weight_kg, height_cm, age, sex, notes, created_at
            FROM physical_assessments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match record {
            Some(record) => Ok(Some(Self::load_measurements(pool, record).await?)),
            None => Ok(None),
        }
    }

    /// Delete an assessment; measurements go with it via ON DELETE CASCADE
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM physical_assessments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_measurements(
        pool: &PgPool,
        assessment: PhysicalAssessmentRecord,
    ) -> Result<FullAssessment> {
        let perimeters = sqlx::query_as::<_, PerimetersRow>(
            r#"
            SELECT chest, waist, abdomen, hip, right_arm, left_arm, right_thigh, left_thigh,
                   right_calf, left_calf
            FROM perimeters
            WHERE assessment_id = $1
            "#,
        )
        .bind(assessment.id)
        .fetch_optional(pool)
        .await?;

        let skin_folds = sqlx::query_as::<_, SkinFoldsRow>(
            r#"
            SELECT chest, midaxillary, triceps, subscapular, abdominal, suprailiac, thigh
            FROM skin_folds
            WHERE assessment_id = $1
            "#,
        )
        .bind(assessment.id)
        .fetch_optional(pool)
        .await?;

        let body_composition = sqlx::query_as::<_, BodyCompositionRow>(
            r#"
            SELECT bmi, body_density, body_fat_percent, fat_mass_kg, lean_mass_kg
            FROM body_compositions
            WHERE assessment_id = $1
            "#,
        )
        .bind(assessment.id)
        .fetch_optional(pool)
        .await?;

        Ok(FullAssessment {
            assessment,
            perimeters: perimeters.map(Into::into),
            skin_folds: skin_folds.map(Into::into),
            body_composition: body_composition.map(Into::into),
        })
    }
}
