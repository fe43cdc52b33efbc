//! fitsplit - personalized weekly workout plan generator
//!
//! Pipeline: decide a weekly split from the user profile, filter the
//! exercise catalog into per-day candidate pools, then pick each day's
//! exercises with a genetic search over a multi-term fitness score.

pub mod catalog;
pub mod engine;
pub mod profile;
pub mod taxonomy;

pub use catalog::Catalog;
pub use engine::{Planner, WeekPlan};
pub use profile::UserProfile;
