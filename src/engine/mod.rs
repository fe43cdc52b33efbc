//! Planning engine - schedule rules, pool filtering, genetic selection
//!
//! [`Planner`] composes the pipeline per request: decide the weekly split,
//! then independently per day filter the catalog into a candidate pool and
//! run the genetic search over it. Days are independent; only the read-only
//! catalog is shared.

pub mod filter;
pub mod rules;
pub mod selector;

pub use rules::{DayAssignment, SplitType, WeekSchedule};
pub use selector::{CancelFlag, GaConfig};

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{Catalog, ExerciseRecord};
use crate::profile::{BmiCategory, UserProfile};
use crate::taxonomy::{map_to_body_parts, Focus};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("no day produced a usable plan ({catalog_size} exercises in catalog)")]
    NoUsableDays { catalog_size: usize },
    #[error("plan generation was cancelled")]
    Cancelled,
}

/// Selected exercises for one scheduled day
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub day: u8,
    #[serde(rename = "day_focus")]
    pub focus: Focus,
    pub exercises: Vec<ExerciseRecord>,
}

/// Complete weekly plan; plain value, ready for serialization
#[derive(Debug, Clone, Serialize)]
pub struct WeekPlan {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub split_type: SplitType,
    /// day_1..day_N -> focus label
    pub schedule: BTreeMap<String, Focus>,
    pub days: Vec<DayPlan>,
}

/// Builds weekly plans over a read-only exercise catalog
pub struct Planner {
    catalog: Catalog,
    config: GaConfig,
}

impl Planner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: GaConfig::default(),
        }
    }

    pub fn with_config(catalog: Catalog, config: GaConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the weekly plan for a validated profile.
    ///
    /// With `seed` set the whole plan is reproducible: each day's search
    /// derives its own seed from the base seed and the day index.
    pub fn build_week_plan(
        &self,
        profile: &UserProfile,
        seed: Option<u64>,
    ) -> Result<WeekPlan, PlanError> {
        self.build_week_plan_with_cancel(profile, seed, &CancelFlag::default())
    }

    /// Like [`Self::build_week_plan`], checking `cancel` between day
    /// computations (and between search generations). A cancelled request
    /// returns [`PlanError::Cancelled`] with no partial plan.
    pub fn build_week_plan_with_cancel(
        &self,
        profile: &UserProfile,
        seed: Option<u64>,
        cancel: &CancelFlag,
    ) -> Result<WeekPlan, PlanError> {
        let bmi = profile.bmi();
        let bmi_category = profile.bmi_category();
        let injured = map_to_body_parts(&profile.injuries);
        let preferred = map_to_body_parts(&profile.preferred_body_parts);
        let base_seed = seed.or(self.config.seed);

        let schedule = rules::decide(
            profile.gender,
            bmi,
            profile.available_days,
            &injured,
            &preferred,
        );
        info!(
            bmi,
            category = %bmi_category,
            split = %schedule.split,
            days = schedule.days.len(),
            "weekly schedule decided"
        );

        let mut days: Vec<DayPlan> = Vec::with_capacity(schedule.days.len());
        for assignment in &schedule.days {
            if cancel.is_cancelled() {
                return Err(PlanError::Cancelled);
            }

            let pool = filter::build_pool(
                &self.catalog,
                assignment.focus,
                &injured,
                &profile.preferred_equipment,
                filter::DEFAULT_MIN_POOL,
            );
            if pool.is_empty() {
                warn!(day = assignment.day, focus = %assignment.focus, "empty pool, day skipped");
                continue;
            }

            let day_config = GaConfig {
                seed: base_seed.map(|s| s.wrapping_add(u64::from(assignment.day))),
                ..self.config.clone()
            };
            let picks = selector::select(
                &pool,
                assignment.focus,
                &injured,
                &preferred,
                bmi,
                &day_config,
                cancel,
            );
            if cancel.is_cancelled() {
                return Err(PlanError::Cancelled);
            }
            if picks.is_empty() {
                continue;
            }

            days.push(DayPlan {
                day: assignment.day,
                focus: assignment.focus,
                exercises: picks.iter().map(|&i| pool[i]).cloned().collect(),
            });
        }

        if days.is_empty() {
            return Err(PlanError::NoUsableDays {
                catalog_size: self.catalog.len(),
            });
        }

        let schedule_map: BTreeMap<String, Focus> = schedule
            .days
            .iter()
            .map(|d| (format!("day_{}", d.day), d.focus))
            .collect();

        Ok(WeekPlan {
            bmi,
            bmi_category,
            split_type: schedule.split,
            schedule: schedule_map,
            days,
        })
    }
}
