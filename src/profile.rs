//! User profile and BMI derivation
//!
//! Range validation happens here, at the boundary; the planning engine
//! assumes a well-formed profile.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_AVAILABLE_DAYS: u8 = 1;
pub const MAX_AVAILABLE_DAYS: u8 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("height must be positive, got {0}")]
    InvalidHeight(f64),
    #[error("weight must be positive, got {0}")]
    InvalidWeight(f64),
    #[error("available days must be between {MIN_AVAILABLE_DAYS} and {MAX_AVAILABLE_DAYS}, got {0}")]
    InvalidDays(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// BMI bands with fixed WHO-style thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    #[serde(rename = "Obese I")]
    ObeseI,
    #[serde(rename = "Obese II")]
    ObeseII,
    #[serde(rename = "Obese III")]
    ObeseIII,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObeseI
        } else if bmi < 40.0 {
            BmiCategory::ObeseII
        } else {
            BmiCategory::ObeseIII
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseI => "Obese I",
            BmiCategory::ObeseII => "Obese II",
            BmiCategory::ObeseIII => "Obese III",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI = kg / m², rounded to 2 decimals
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 100.0).round() / 100.0
}

/// Validated user profile; inputs to the planning engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Free-text muscle or body-part names; mapped through the taxonomy
    pub injuries: Vec<String>,
    pub available_days: u8,
    /// Free-text body-part names; mapped through the taxonomy
    pub preferred_body_parts: Vec<String>,
    pub preferred_equipment: Vec<String>,
}

impl UserProfile {
    pub fn new(
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        injuries: Vec<String>,
        available_days: u8,
        preferred_body_parts: Vec<String>,
        preferred_equipment: Vec<String>,
    ) -> Result<Self, ProfileError> {
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(ProfileError::InvalidHeight(height_cm));
        }
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ProfileError::InvalidWeight(weight_kg));
        }
        if !(MIN_AVAILABLE_DAYS..=MAX_AVAILABLE_DAYS).contains(&available_days) {
            return Err(ProfileError::InvalidDays(available_days));
        }

        Ok(Self {
            gender,
            height_cm,
            weight_kg,
            injuries,
            available_days,
            preferred_body_parts,
            preferred_equipment,
        })
    }

    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height_cm, self.weight_kg)
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(height_cm: f64, weight_kg: f64, days: u8) -> Result<UserProfile, ProfileError> {
        UserProfile::new(
            Gender::Male,
            height_cm,
            weight_kg,
            vec![],
            days,
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        // 70 / 1.75² = 22.857... -> 22.86
        assert_eq!(compute_bmi(175.0, 70.0), 22.86);
        // 90 / 1.75² = 29.387... -> 29.39
        assert_eq!(compute_bmi(175.0, 90.0), 29.39);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(22.86), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(29.39), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(32.0), BmiCategory::ObeseI);
        assert_eq!(BmiCategory::from_bmi(37.5), BmiCategory::ObeseII);
        assert_eq!(BmiCategory::from_bmi(41.0), BmiCategory::ObeseIII);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::ObeseI);
        assert_eq!(BmiCategory::from_bmi(35.0), BmiCategory::ObeseII);
        assert_eq!(BmiCategory::from_bmi(40.0), BmiCategory::ObeseIII);
    }

    #[test]
    fn test_valid_profile() {
        let p = profile(175.0, 70.0, 3).unwrap();
        assert_eq!(p.bmi(), 22.86);
        assert_eq!(p.bmi_category(), BmiCategory::Normal);
    }

    #[test]
    fn test_rejects_bad_height() {
        assert_eq!(
            profile(0.0, 70.0, 3).unwrap_err(),
            ProfileError::InvalidHeight(0.0)
        );
        assert!(matches!(
            profile(-170.0, 70.0, 3).unwrap_err(),
            ProfileError::InvalidHeight(_)
        ));
    }

    #[test]
    fn test_rejects_bad_weight() {
        assert!(matches!(
            profile(175.0, 0.0, 3).unwrap_err(),
            ProfileError::InvalidWeight(_)
        ));
    }

    #[test]
    fn test_rejects_bad_days() {
        assert_eq!(profile(175.0, 70.0, 0).unwrap_err(), ProfileError::InvalidDays(0));
        assert_eq!(profile(175.0, 70.0, 6).unwrap_err(), ProfileError::InvalidDays(6));
        assert!(profile(175.0, 70.0, 1).is_ok());
        assert!(profile(175.0, 70.0, 5).is_ok());
    }

    #[test]
    fn test_bmi_category_labels() {
        assert_eq!(BmiCategory::ObeseI.label(), "Obese I");
        assert_eq!(BmiCategory::Normal.to_string(), "Normal");
    }
}
