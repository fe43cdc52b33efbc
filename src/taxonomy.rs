//! Muscle/body-part taxonomy and focus compatibility
//!
//! Single source of truth for "does body part X belong to focus day Y".
//! Both the pool filter and the selector fitness function go through
//! [`is_focus_match`]; keeping one predicate avoids the two copies
//! drifting apart.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Coarse body-part categories used for filtering and scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Neck,
    Shoulders,
    Chest,
    Back,
    Abs,
    Biceps,
    Triceps,
    Forearms,
    Glutes,
    Quadriceps,
    Hamstrings,
    Calves,
    Cardio,
}

impl BodyPart {
    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Neck => "neck",
            BodyPart::Shoulders => "shoulders",
            BodyPart::Chest => "chest",
            BodyPart::Back => "back",
            BodyPart::Abs => "abs",
            BodyPart::Biceps => "biceps",
            BodyPart::Triceps => "triceps",
            BodyPart::Forearms => "forearms",
            BodyPart::Glutes => "glutes",
            BodyPart::Quadriceps => "quadriceps",
            BodyPart::Hamstrings => "hamstrings",
            BodyPart::Calves => "calves",
            BodyPart::Cardio => "cardio",
        }
    }

    /// All body parts for iteration
    pub fn all() -> &'static [BodyPart] {
        &[
            BodyPart::Neck,
            BodyPart::Shoulders,
            BodyPart::Chest,
            BodyPart::Back,
            BodyPart::Abs,
            BodyPart::Biceps,
            BodyPart::Triceps,
            BodyPart::Forearms,
            BodyPart::Glutes,
            BodyPart::Quadriceps,
            BodyPart::Hamstrings,
            BodyPart::Calves,
            BodyPart::Cardio,
        ]
    }
}

impl FromStr for BodyPart {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyPart::all()
            .iter()
            .find(|bp| bp.label() == s.trim().to_lowercase())
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Fine-grained muscle name -> coarse body part
const MUSCLE_TO_BODY_PART: &[(&str, BodyPart)] = &[
    ("sternocleidomastoid", BodyPart::Neck),
    ("splenius capitis", BodyPart::Neck),
    ("splenius cervicis", BodyPart::Neck),
    ("front deltoids", BodyPart::Shoulders),
    ("side deltoids", BodyPart::Shoulders),
    ("rear deltoids", BodyPart::Shoulders),
    ("upper chest", BodyPart::Chest),
    ("middle chest", BodyPart::Chest),
    ("lower chest", BodyPart::Chest),
    ("upper traps", BodyPart::Back),
    ("lower traps", BodyPart::Back),
    ("rotator cuff", BodyPart::Back),
    ("teres major", BodyPart::Back),
    ("lats", BodyPart::Back),
    ("erector spinae", BodyPart::Back),
    ("rectus abdominis", BodyPart::Abs),
    ("obliques", BodyPart::Abs),
    ("serratus", BodyPart::Abs),
    ("biceps brachii", BodyPart::Biceps),
    ("brachialis", BodyPart::Biceps),
    ("long head", BodyPart::Triceps),
    ("lateral head", BodyPart::Triceps),
    ("medial head", BodyPart::Triceps),
    ("brachioradialis", BodyPart::Forearms),
    ("flexors", BodyPart::Forearms),
    ("extensors", BodyPart::Forearms),
    ("gluteus maximus", BodyPart::Glutes),
    ("gluteus medius", BodyPart::Glutes),
    ("gluteus minimus", BodyPart::Glutes),
    ("rectus femoris", BodyPart::Quadriceps),
    ("vastus lateralis", BodyPart::Quadriceps),
    ("vastus medialis", BodyPart::Quadriceps),
    ("vastus intermedius", BodyPart::Quadriceps),
    ("biceps femoris", BodyPart::Hamstrings),
    ("semitendinosus", BodyPart::Hamstrings),
    ("semimembranosus", BodyPart::Hamstrings),
    ("gastrocnemius", BodyPart::Calves),
    ("soleus", BodyPart::Calves),
    ("cardio", BodyPart::Cardio),
];

/// Map free-text muscle or body-part names to the coarse vocabulary.
///
/// Accepts either a body-part label ("back") or a muscle name ("lats").
/// Unrecognized names are dropped silently; user input is expected to be
/// noisy.
pub fn map_to_body_parts<S: AsRef<str>>(names: &[S]) -> HashSet<BodyPart> {
    let mut mapped = HashSet::new();
    for name in names {
        let lower = name.as_ref().trim().to_lowercase();
        if let Ok(bp) = lower.parse::<BodyPart>() {
            mapped.insert(bp);
        } else if let Some((_, bp)) = MUSCLE_TO_BODY_PART.iter().find(|(m, _)| *m == lower) {
            mapped.insert(*bp);
        }
    }
    mapped
}

/// Training target assigned to a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Fullbody,
    Upper,
    Lower,
    Push,
    Pull,
    Legs,
    Cardio,
    MaleFocus,
    FemaleFocus,
    /// Dedicated single-body-part focus day (e.g. "glutes")
    Part(BodyPart),
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Fullbody => "fullbody",
            Focus::Upper => "upper",
            Focus::Lower => "lower",
            Focus::Push => "push",
            Focus::Pull => "pull",
            Focus::Legs => "legs",
            Focus::Cardio => "cardio",
            Focus::MaleFocus => "male focus",
            Focus::FemaleFocus => "female focus",
            Focus::Part(bp) => bp.label(),
        }
    }

    /// Number of exercises a day with this focus should receive
    pub fn exercises_per_day(&self) -> usize {
        match self {
            Focus::Part(_) => 4,
            Focus::Cardio => 3,
            _ => 5,
        }
    }
}

impl FromStr for Focus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fullbody" => Ok(Focus::Fullbody),
            "upper" => Ok(Focus::Upper),
            "lower" => Ok(Focus::Lower),
            "push" => Ok(Focus::Push),
            "pull" => Ok(Focus::Pull),
            "legs" => Ok(Focus::Legs),
            "male focus" | "male_focus" => Ok(Focus::MaleFocus),
            "female focus" | "female_focus" => Ok(Focus::FemaleFocus),
            other => other.parse::<BodyPart>().map(|bp| match bp {
                BodyPart::Cardio => Focus::Cardio,
                part => Focus::Part(part),
            }),
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Focus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Does an exercise with this body part belong on a day with this focus?
pub fn is_focus_match(body_part: BodyPart, focus: Focus) -> bool {
    use BodyPart::*;
    match focus {
        Focus::Fullbody => true,
        Focus::Cardio => body_part == Cardio,
        Focus::Upper => matches!(
            body_part,
            Chest | Biceps | Triceps | Back | Shoulders | Forearms | Neck | Abs
        ),
        Focus::Lower | Focus::Legs => {
            matches!(body_part, Quadriceps | Glutes | Calves | Hamstrings)
        }
        Focus::Push => matches!(body_part, Chest | Triceps | Shoulders),
        Focus::Pull => matches!(body_part, Back | Biceps | Forearms | Neck),
        Focus::MaleFocus => {
            matches!(body_part, Chest | Shoulders | Biceps | Triceps | Back | Abs)
        }
        Focus::FemaleFocus => matches!(body_part, Glutes | Quadriceps | Hamstrings | Abs),
        Focus::Part(part) => body_part == part,
    }
}

/// Body parts a group focus is expected to draw from (cardio excluded).
///
/// Single-body-part, cardio and gender focus days return an empty set; the
/// selector falls back to its narrow-pool variety rule for those.
pub fn focus_group_parts(focus: Focus) -> Vec<BodyPart> {
    match focus {
        Focus::Fullbody | Focus::Upper | Focus::Lower | Focus::Push | Focus::Pull | Focus::Legs => {
            BodyPart::all()
                .iter()
                .filter(|bp| **bp != BodyPart::Cardio && is_focus_match(**bp, focus))
                .copied()
                .collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_muscle_to_body_part() {
        let mapped = map_to_body_parts(&["lats", "soleus"]);
        assert!(mapped.contains(&BodyPart::Back));
        assert!(mapped.contains(&BodyPart::Calves));
        assert_eq!(mapped.len(), 2);
    }

    #[test]
    fn test_map_body_part_passthrough() {
        let mapped = map_to_body_parts(&["glutes"]);
        assert_eq!(mapped.len(), 1);
        assert!(mapped.contains(&BodyPart::Glutes));
    }

    #[test]
    fn test_map_drops_unknown_names() {
        let mapped = map_to_body_parts(&["sore elbow", "lats"]);
        assert_eq!(mapped.len(), 1);
        assert!(mapped.contains(&BodyPart::Back));
    }

    #[test]
    fn test_map_is_case_insensitive() {
        let mapped = map_to_body_parts(&["Biceps Brachii", " BACK "]);
        assert!(mapped.contains(&BodyPart::Biceps));
        assert!(mapped.contains(&BodyPart::Back));
    }

    #[test]
    fn test_muscles_collapse_to_one_part() {
        let mapped = map_to_body_parts(&["rectus femoris", "vastus lateralis"]);
        assert_eq!(mapped.len(), 1);
        assert!(mapped.contains(&BodyPart::Quadriceps));
    }

    #[test]
    fn test_fullbody_matches_everything() {
        for bp in BodyPart::all() {
            assert!(is_focus_match(*bp, Focus::Fullbody));
        }
    }

    #[test]
    fn test_cardio_is_exact_match() {
        assert!(is_focus_match(BodyPart::Cardio, Focus::Cardio));
        assert!(!is_focus_match(BodyPart::Chest, Focus::Cardio));
        assert!(!is_focus_match(BodyPart::Cardio, Focus::Push));
    }

    #[test]
    fn test_push_pull_groups() {
        assert!(is_focus_match(BodyPart::Chest, Focus::Push));
        assert!(is_focus_match(BodyPart::Triceps, Focus::Push));
        assert!(!is_focus_match(BodyPart::Back, Focus::Push));
        assert!(is_focus_match(BodyPart::Back, Focus::Pull));
        assert!(is_focus_match(BodyPart::Neck, Focus::Pull));
        assert!(!is_focus_match(BodyPart::Chest, Focus::Pull));
    }

    #[test]
    fn test_legs_equals_lower() {
        for bp in BodyPart::all() {
            assert_eq!(
                is_focus_match(*bp, Focus::Legs),
                is_focus_match(*bp, Focus::Lower)
            );
        }
    }

    #[test]
    fn test_part_focus_is_exact() {
        assert!(is_focus_match(BodyPart::Glutes, Focus::Part(BodyPart::Glutes)));
        assert!(!is_focus_match(
            BodyPart::Hamstrings,
            Focus::Part(BodyPart::Glutes)
        ));
    }

    #[test]
    fn test_gender_focus_groups() {
        assert!(is_focus_match(BodyPart::Chest, Focus::MaleFocus));
        assert!(!is_focus_match(BodyPart::Glutes, Focus::MaleFocus));
        assert!(is_focus_match(BodyPart::Glutes, Focus::FemaleFocus));
        assert!(!is_focus_match(BodyPart::Chest, Focus::FemaleFocus));
    }

    #[test]
    fn test_focus_parse_roundtrip() {
        for label in ["push", "pull", "legs", "fullbody", "cardio", "glutes"] {
            let focus: Focus = label.parse().unwrap();
            assert_eq!(focus.label(), label);
        }
        assert!("not a focus".parse::<Focus>().is_err());
    }

    #[test]
    fn test_exercises_per_day() {
        assert_eq!(Focus::Part(BodyPart::Chest).exercises_per_day(), 4);
        assert_eq!(Focus::Cardio.exercises_per_day(), 3);
        assert_eq!(Focus::Push.exercises_per_day(), 5);
        assert_eq!(Focus::Fullbody.exercises_per_day(), 5);
    }

    #[test]
    fn test_group_parts_exclude_cardio() {
        let fullbody = focus_group_parts(Focus::Fullbody);
        assert_eq!(fullbody.len(), 12);
        assert!(!fullbody.contains(&BodyPart::Cardio));
        assert_eq!(focus_group_parts(Focus::Push).len(), 3);
        assert!(focus_group_parts(Focus::Cardio).is_empty());
        assert!(focus_group_parts(Focus::Part(BodyPart::Abs)).is_empty());
    }
}
