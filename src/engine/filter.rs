//! Per-day candidate pool filtering
//!
//! Narrows the catalog for one scheduled day through an ordered fallback
//! chain; each tier is tried only when the previous one is smaller than
//! `min_required`, so the pool is never empty while the catalog has rows.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{Catalog, ExerciseRecord};
use crate::taxonomy::{is_focus_match, BodyPart, Focus};

/// Pool sizes below this trigger the next fallback tier
pub const DEFAULT_MIN_POOL: usize = 5;

fn equipment_matches(exercise: &ExerciseRecord, preferred: &[String]) -> bool {
    exercise.is_body_weight()
        || exercise
            .equipment
            .iter()
            .any(|eq| preferred.iter().any(|p| p.eq_ignore_ascii_case(eq)))
}

/// Build the candidate pool for one day.
///
/// Tiers, in order: injury + focus + preferred equipment; body-weight-only
/// within the focus; focus without equipment; injury filter only; the whole
/// catalog as a last resort.
pub fn build_pool<'a>(
    catalog: &'a Catalog,
    focus: Focus,
    injured: &HashSet<BodyPart>,
    preferred_equipment: &[String],
    min_required: usize,
) -> Vec<&'a ExerciseRecord> {
    let injury_filtered: Vec<&ExerciseRecord> = catalog
        .iter()
        .filter(|e| !injured.contains(&e.body_part))
        .collect();

    let focus_filtered: Vec<&ExerciseRecord> = injury_filtered
        .iter()
        .filter(|e| is_focus_match(e.body_part, focus))
        .copied()
        .collect();

    let with_equipment: Vec<&ExerciseRecord> = if preferred_equipment.is_empty() {
        focus_filtered.clone()
    } else {
        focus_filtered
            .iter()
            .filter(|e| equipment_matches(e, preferred_equipment))
            .copied()
            .collect()
    };

    if with_equipment.len() >= min_required {
        debug!(focus = %focus, size = with_equipment.len(), "pool: equipment tier");
        return with_equipment;
    }

    let body_weight_only: Vec<&ExerciseRecord> = focus_filtered
        .iter()
        .filter(|e| e.is_body_weight())
        .copied()
        .collect();
    if body_weight_only.len() >= min_required {
        debug!(focus = %focus, size = body_weight_only.len(), "pool: body-weight tier");
        return body_weight_only;
    }

    if focus_filtered.len() >= min_required {
        debug!(focus = %focus, size = focus_filtered.len(), "pool: focus tier");
        return focus_filtered;
    }

    if injury_filtered.len() >= min_required {
        debug!(focus = %focus, size = injury_filtered.len(), "pool: injury tier");
        return injury_filtered;
    }

    debug!(focus = %focus, size = catalog.len(), "pool: full catalog fallback");
    catalog.iter().collect()
}
