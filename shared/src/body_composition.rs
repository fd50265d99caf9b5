//! Body composition calculations for physical assessments
//!
//! Skin fold protocol is Jackson & Pollock 7-site; body density is turned
//! into body fat percentage with the Siri equation. All functions are pure.

use crate::models::Sex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Measurements
// ============================================================================

/// Seven-site skin fold thicknesses, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SkinFolds {
    pub chest: f64,
    pub midaxillary: f64,
    pub triceps: f64,
    pub subscapular: f64,
    pub abdominal: f64,
    pub suprailiac: f64,
    pub thigh: f64,
}

impl SkinFolds {
    pub fn sum(&self) -> f64 {
        self.chest
            + self.midaxillary
            + self.triceps
            + self.subscapular
            + self.abdominal
            + self.suprailiac
            + self.thigh
    }

    /// Named values, in a stable order, for validation messages
    pub fn sites(&self) -> [(&'static str, f64); 7] {
        [
            ("chest", self.chest),
            ("midaxillary", self.midaxillary),
            ("triceps", self.triceps),
            ("subscapular", self.subscapular),
            ("abdominal", self.abdominal),
            ("suprailiac", self.suprailiac),
            ("thigh", self.thigh),
        ]
    }
}

/// Body circumferences, in centimetres. Every site is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Perimeters {
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub abdomen: Option<f64>,
    pub hip: Option<f64>,
    pub right_arm: Option<f64>,
    pub left_arm: Option<f64>,
    pub right_thigh: Option<f64>,
    pub left_thigh: Option<f64>,
    pub right_calf: Option<f64>,
    pub left_calf: Option<f64>,
}

impl Perimeters {
    pub fn sites(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("chest", self.chest),
            ("waist", self.waist),
            ("abdomen", self.abdomen),
            ("hip", self.hip),
            ("right_arm", self.right_arm),
            ("left_arm", self.left_arm),
            ("right_thigh", self.right_thigh),
            ("left_thigh", self.left_thigh),
            ("right_calf", self.right_calf),
            ("left_calf", self.left_calf),
        ]
    }

    /// Waist-to-hip ratio, when both sites were measured
    pub fn waist_hip_ratio(&self) -> Option<f64> {
        match (self.waist, self.hip) {
            (Some(waist), Some(hip)) if hip > 0.0 => Some(waist / hip),
            _ => None,
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Calculated body composition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BodyComposition {
    pub bmi: f64,
    pub body_density: f64,
    pub body_fat_percent: f64,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
}

/// BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Jackson & Pollock 7-site body density (g/cm³)
pub fn body_density_jackson_pollock(folds: &SkinFolds, age_years: i32, sex: Sex) -> f64 {
    let sum = folds.sum();
    let age = age_years as f64;
    match sex {
        Sex::Male => 1.112 - 0.000_434_99 * sum + 0.000_000_55 * sum * sum - 0.000_288_26 * age,
        Sex::Female => 1.097 - 0.000_469_71 * sum + 0.000_000_56 * sum * sum - 0.000_128_28 * age,
    }
}

/// Siri equation: %BF = 495 / density - 450, clamped to 0..=100
pub fn body_fat_percent_siri(body_density: f64) -> f64 {
    (495.0 / body_density - 450.0).clamp(0.0, 100.0)
}

/// Full body composition from an assessment's measurements
pub fn calculate_body_composition(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: Sex,
    folds: &SkinFolds,
) -> BodyComposition {
    let body_density = body_density_jackson_pollock(folds, age_years, sex);
    let body_fat_percent = body_fat_percent_siri(body_density);
    let fat_mass_kg = weight_kg * body_fat_percent / 100.0;

    BodyComposition {
        bmi: calculate_bmi(weight_kg, height_cm),
        body_density,
        body_fat_percent,
        fat_mass_kg,
        lean_mass_kg: weight_kg - fat_mass_kg,
    }
}
