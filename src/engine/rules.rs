//! Weekly split decision rules
//!
//! Pure function from profile facts to a [`WeekSchedule`]: a fixed split
//! template per available-day count, gender-ranked focus days for the 5-day
//! split, and a cardio-insertion pass for high-BMI users.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::profile::Gender;
use crate::taxonomy::{BodyPart, Focus};

/// Overall weekly template name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitType {
    Fullbody,
    UpperLower,
    Ppl,
    UpperLowerFocus,
    PplFocus,
}

impl SplitType {
    pub fn label(&self) -> &'static str {
        match self {
            SplitType::Fullbody => "fullbody",
            SplitType::UpperLower => "upperlower",
            SplitType::Ppl => "ppl",
            SplitType::UpperLowerFocus => "upperlower+focus",
            SplitType::PplFocus => "ppl+focus",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SplitType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One scheduled day: 1-based index plus training focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAssignment {
    pub day: u8,
    pub focus: Focus,
}

/// Split label plus ordered day assignments (contiguous, starting at day 1)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSchedule {
    pub split: SplitType,
    pub days: Vec<DayAssignment>,
}

impl WeekSchedule {
    pub fn focus_for(&self, day: u8) -> Option<Focus> {
        self.days.iter().find(|d| d.day == day).map(|d| d.focus)
    }
}

/// Injury/preference score for a focus label.
///
/// Only a single-body-part focus can earn the +5 preference bonus or the
/// -100 injury penalty; group focuses (upper, legs, ...) score 0.
fn score_focus(focus: Focus, injured: &HashSet<BodyPart>, preferred: &HashSet<BodyPart>) -> i32 {
    let Focus::Part(part) = focus else {
        return 0;
    };
    let mut score = 0;
    if preferred.contains(&part) {
        score += 5;
    }
    if injured.contains(&part) {
        score -= 100;
    }
    score
}

/// Gender-specific candidate list for the two 5-day focus slots
fn focus_candidates(gender: Gender) -> &'static [BodyPart] {
    match gender {
        Gender::Female => &[
            BodyPart::Glutes,
            BodyPart::Quadriceps,
            BodyPart::Hamstrings,
            BodyPart::Abs,
        ],
        _ => &[
            BodyPart::Chest,
            BodyPart::Biceps,
            BodyPart::Triceps,
            BodyPart::Shoulders,
            BodyPart::Back,
            BodyPart::Abs,
        ],
    }
}

/// Rank focus-day candidates by score, ties broken by candidate-list order
fn rank_focus_days(
    gender: Gender,
    injured: &HashSet<BodyPart>,
    preferred: &HashSet<BodyPart>,
) -> Vec<BodyPart> {
    let mut scored: Vec<(BodyPart, i32)> = focus_candidates(gender)
        .iter()
        .map(|bp| (*bp, score_focus(Focus::Part(*bp), injured, preferred)))
        .collect();
    // Stable sort keeps input order on equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(bp, _)| bp).collect()
}

/// Decide split type and day-by-day focus labels for the user.
///
/// `available_days` is expected to be 1..=5 (validated at the profile
/// boundary); anything below 1 falls back to the single-day template.
pub fn decide(
    gender: Gender,
    bmi: f64,
    available_days: u8,
    injured: &HashSet<BodyPart>,
    preferred: &HashSet<BodyPart>,
) -> WeekSchedule {
    let (split, focuses): (SplitType, Vec<Focus>) = match available_days {
        0 | 1 => (SplitType::Fullbody, vec![Focus::Fullbody]),
        2 => (SplitType::UpperLower, vec![Focus::Upper, Focus::Lower]),
        3 => (SplitType::Ppl, vec![Focus::Push, Focus::Pull, Focus::Legs]),
        4 => (
            SplitType::UpperLower,
            vec![Focus::Upper, Focus::Lower, Focus::Upper, Focus::Lower],
        ),
        _ => {
            let ranked = rank_focus_days(gender, injured, preferred);
            (
                SplitType::PplFocus,
                vec![
                    Focus::Push,
                    Focus::Pull,
                    Focus::Legs,
                    Focus::Part(ranked[0]),
                    Focus::Part(ranked[1]),
                ],
            )
        }
    };

    let mut days: Vec<DayAssignment> = focuses
        .into_iter()
        .enumerate()
        .map(|(i, focus)| DayAssignment {
            day: i as u8 + 1,
            focus,
        })
        .collect();

    if bmi >= 25.0 {
        insert_cardio(&mut days, injured, preferred);
    }

    debug!(split = %split, ?days, "schedule decided");
    WeekSchedule { split, days }
}

/// Replace training days with cardio for high-BMI users.
///
/// Target count: 2 when 4+ days are available, otherwise 1. A forward pass
/// takes legs/lower/fullbody days first; a backward pass fills the remainder
/// from any day. No two adjacent days may both be cardio; falling short of
/// the target is acceptable.
fn insert_cardio(
    days: &mut [DayAssignment],
    injured: &HashSet<BodyPart>,
    preferred: &HashSet<BodyPart>,
) {
    let target = if days.len() >= 4 { 2 } else { 1 };
    let mut inserted = 0;

    for i in 0..days.len() {
        if inserted >= target {
            break;
        }
        let focus = days[i].focus;
        let replaceable = matches!(focus, Focus::Legs | Focus::Lower | Focus::Fullbody);
        let prev_is_cardio = i > 0 && days[i - 1].focus == Focus::Cardio;
        if replaceable && score_focus(focus, injured, preferred) <= 0 && !prev_is_cardio {
            days[i].focus = Focus::Cardio;
            inserted += 1;
        }
    }

    for i in (0..days.len()).rev() {
        if inserted >= target {
            break;
        }
        let focus = days[i].focus;
        let prev_is_cardio = i > 0 && days[i - 1].focus == Focus::Cardio;
        let next_is_cardio = i + 1 < days.len() && days[i + 1].focus == Focus::Cardio;
        if focus != Focus::Cardio
            && score_focus(focus, injured, preferred) <= 0
            && !prev_is_cardio
            && !next_is_cardio
        {
            days[i].focus = Focus::Cardio;
            inserted += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(names: &[BodyPart]) -> HashSet<BodyPart> {
        names.iter().copied().collect()
    }

    fn no_parts() -> HashSet<BodyPart> {
        HashSet::new()
    }

    #[test]
    fn test_day_counts_are_contiguous() {
        for days in 1..=5u8 {
            let schedule = decide(Gender::Male, 22.0, days, &no_parts(), &no_parts());
            assert_eq!(schedule.days.len(), days as usize);
            for (i, d) in schedule.days.iter().enumerate() {
                assert_eq!(d.day, i as u8 + 1);
            }
        }
    }

    #[test]
    fn test_scenario_a_three_day_ppl() {
        // male, 175cm/70kg -> BMI 22.86, no cardio insertion
        let schedule = decide(Gender::Male, 22.86, 3, &no_parts(), &no_parts());
        assert_eq!(schedule.split, SplitType::Ppl);
        assert_eq!(schedule.focus_for(1), Some(Focus::Push));
        assert_eq!(schedule.focus_for(2), Some(Focus::Pull));
        assert_eq!(schedule.focus_for(3), Some(Focus::Legs));
    }

    #[test]
    fn test_scenario_b_overweight_gets_one_cardio_day() {
        // same profile at 90kg -> BMI 29.39; legs day replaced
        let schedule = decide(Gender::Male, 29.39, 3, &no_parts(), &no_parts());
        assert_eq!(schedule.split, SplitType::Ppl);
        assert_eq!(schedule.focus_for(1), Some(Focus::Push));
        assert_eq!(schedule.focus_for(2), Some(Focus::Pull));
        assert_eq!(schedule.focus_for(3), Some(Focus::Cardio));
        let cardio = schedule
            .days
            .iter()
            .filter(|d| d.focus == Focus::Cardio)
            .count();
        assert_eq!(cardio, 1);
    }

    #[test]
    fn test_scenario_c_injured_focus_ranked_last() {
        // female, glutes injured: quadriceps and hamstrings fill the slots
        let schedule = decide(
            Gender::Female,
            22.0,
            5,
            &parts(&[BodyPart::Glutes]),
            &no_parts(),
        );
        assert_eq!(schedule.split, SplitType::PplFocus);
        assert_eq!(schedule.focus_for(4), Some(Focus::Part(BodyPart::Quadriceps)));
        assert_eq!(schedule.focus_for(5), Some(Focus::Part(BodyPart::Hamstrings)));
    }

    #[test]
    fn test_preferred_focus_ranked_first() {
        let schedule = decide(
            Gender::Male,
            22.0,
            5,
            &no_parts(),
            &parts(&[BodyPart::Back]),
        );
        assert_eq!(schedule.focus_for(4), Some(Focus::Part(BodyPart::Back)));
        // Second slot falls back to candidate-list order
        assert_eq!(schedule.focus_for(5), Some(Focus::Part(BodyPart::Chest)));
    }

    #[test]
    fn test_focus_ties_keep_candidate_order() {
        let schedule = decide(Gender::Female, 22.0, 5, &no_parts(), &no_parts());
        assert_eq!(schedule.focus_for(4), Some(Focus::Part(BodyPart::Glutes)));
        assert_eq!(schedule.focus_for(5), Some(Focus::Part(BodyPart::Quadriceps)));
    }

    #[test]
    fn test_four_day_overweight_two_cardio() {
        let schedule = decide(Gender::Male, 27.0, 4, &no_parts(), &no_parts());
        assert_eq!(schedule.split, SplitType::UpperLower);
        let cardio: Vec<u8> = schedule
            .days
            .iter()
            .filter(|d| d.focus == Focus::Cardio)
            .map(|d| d.day)
            .collect();
        assert_eq!(cardio, vec![2, 4]);
    }

    #[test]
    fn test_five_day_overweight_two_cardio() {
        let schedule = decide(Gender::Male, 31.0, 5, &no_parts(), &no_parts());
        let cardio = schedule
            .days
            .iter()
            .filter(|d| d.focus == Focus::Cardio)
            .count();
        assert_eq!(cardio, 2);
    }

    #[test]
    fn test_no_adjacent_cardio_days() {
        for days in 1..=5u8 {
            for gender in [Gender::Male, Gender::Female] {
                let schedule = decide(gender, 33.0, days, &no_parts(), &no_parts());
                for pair in schedule.days.windows(2) {
                    assert!(
                        !(pair[0].focus == Focus::Cardio && pair[1].focus == Focus::Cardio),
                        "adjacent cardio at days {} and {} ({} days)",
                        pair[0].day,
                        pair[1].day,
                        days
                    );
                }
            }
        }
    }

    #[test]
    fn test_one_day_overweight_becomes_cardio() {
        let schedule = decide(Gender::Male, 26.0, 1, &no_parts(), &no_parts());
        assert_eq!(schedule.split, SplitType::Fullbody);
        assert_eq!(schedule.focus_for(1), Some(Focus::Cardio));
    }

    #[test]
    fn test_no_cardio_below_threshold() {
        let schedule = decide(Gender::Male, 24.99, 4, &no_parts(), &no_parts());
        assert!(schedule.days.iter().all(|d| d.focus != Focus::Cardio));
    }

    #[test]
    fn test_preferred_focus_day_not_replaced_by_cardio() {
        // 5-day plan: a preferred focus day scores +5 and survives the
        // backward pass
        let preferred = parts(&[BodyPart::Chest, BodyPart::Back]);
        let schedule = decide(Gender::Male, 27.0, 5, &no_parts(), &preferred);
        assert_eq!(schedule.focus_for(4), Some(Focus::Part(BodyPart::Chest)));
        assert_eq!(schedule.focus_for(5), Some(Focus::Part(BodyPart::Back)));
    }

    #[test]
    fn test_fewer_cardio_days_than_target_is_ok() {
        // Both days protected by the preference bonus: target 1, inserted 0
        let preferred = parts(&[BodyPart::Chest, BodyPart::Back]);
        let mut days = vec![
            DayAssignment {
                day: 1,
                focus: Focus::Part(BodyPart::Chest),
            },
            DayAssignment {
                day: 2,
                focus: Focus::Part(BodyPart::Back),
            },
        ];
        insert_cardio(&mut days, &no_parts(), &preferred);
        assert!(days.iter().all(|d| d.focus != Focus::Cardio));
    }

    #[test]
    fn test_score_focus() {
        let injured = parts(&[BodyPart::Glutes]);
        let preferred = parts(&[BodyPart::Chest]);
        assert_eq!(
            score_focus(Focus::Part(BodyPart::Chest), &injured, &preferred),
            5
        );
        assert_eq!(
            score_focus(Focus::Part(BodyPart::Glutes), &injured, &preferred),
            -100
        );
        assert_eq!(
            score_focus(Focus::Part(BodyPart::Back), &injured, &preferred),
            0
        );
        assert_eq!(score_focus(Focus::Legs, &injured, &preferred), 0);
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(SplitType::PplFocus.label(), "ppl+focus");
        assert_eq!(SplitType::UpperLowerFocus.label(), "upperlower+focus");
        assert_eq!(SplitType::UpperLower.to_string(), "upperlower");
    }
}
