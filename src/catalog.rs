//! Exercise catalog - read-only table of known exercises
//!
//! Loaded once (CSV or in-memory records) and shared read-only for the
//! lifetime of the process; the planner never mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::taxonomy::BodyPart;

pub const BODY_WEIGHT: &str = "body weight";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Csv(#[from] csv::Error),
}

/// One immutable catalog row
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseRecord {
    #[serde(rename = "exercise_id")]
    pub id: String,
    #[serde(rename = "exercise_name")]
    pub name: String,
    pub body_part: BodyPart,
    pub equipment: Vec<String>,
    #[serde(rename = "primary_muscle")]
    pub primary_muscles: Vec<String>,
    #[serde(rename = "secondary_muscle")]
    pub secondary_muscles: Vec<String>,
    #[serde(rename = "image_url")]
    pub image: Option<String>,
}

impl ExerciseRecord {
    /// Body-weight exercises stay eligible regardless of equipment
    /// preferences.
    pub fn is_body_weight(&self) -> bool {
        self.equipment
            .iter()
            .any(|eq| eq.eq_ignore_ascii_case(BODY_WEIGHT))
    }
}

/// Raw CSV row; multi-value cells are pipe-separated strings.
#[derive(Debug, Deserialize)]
struct RawRow {
    exercise_id: String,
    exercise_name: String,
    body_part: String,
    #[serde(default)]
    equipment: Option<String>,
    #[serde(default)]
    primary_muscle: Option<String>,
    #[serde(default)]
    secondary_muscle: Option<String>,
    #[serde(default)]
    exercise_image: Option<String>,
}

fn split_multi(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split('|')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Read-only exercise catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exercises: Vec<ExerciseRecord>,
}

impl Catalog {
    pub fn from_records(exercises: Vec<ExerciseRecord>) -> Self {
        Self { exercises }
    }

    /// Load the catalog from a CSV file.
    ///
    /// Rows whose body part is outside the taxonomy vocabulary are skipped
    /// with a warning.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut exercises = Vec::new();
        let mut skipped = 0usize;

        for row in reader.deserialize::<RawRow>() {
            let row = row?;
            let body_part = match row.body_part.parse::<BodyPart>() {
                Ok(bp) => bp,
                Err(()) => {
                    warn!(
                        exercise = %row.exercise_name,
                        body_part = %row.body_part,
                        "skipping exercise with unknown body part"
                    );
                    skipped += 1;
                    continue;
                }
            };

            exercises.push(ExerciseRecord {
                id: row.exercise_id,
                name: row.exercise_name.trim().to_string(),
                body_part,
                equipment: split_multi(row.equipment.as_deref()),
                primary_muscles: split_multi(row.primary_muscle.as_deref()),
                secondary_muscles: split_multi(row.secondary_muscle.as_deref()),
                image: row
                    .exercise_image
                    .filter(|img| !img.trim().is_empty()),
            });
        }

        info!(
            loaded = exercises.len(),
            skipped,
            path = %path.as_ref().display(),
            "exercise catalog loaded"
        );
        Ok(Self { exercises })
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.exercises.iter()
    }

    /// Number of exercises per body part, in vocabulary order
    pub fn body_part_counts(&self) -> Vec<(BodyPart, usize)> {
        BodyPart::all()
            .iter()
            .map(|bp| {
                let count = self.exercises.iter().filter(|e| e.body_part == *bp).count();
                (*bp, count)
            })
            .collect()
    }
}
