use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of moods a diary entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mood_label")]
pub enum MoodLabel {
    Happy,
    Sad,
    Neutral,
    Angry,
    Excited,
    Stressed,
    Tired,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 7] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Neutral,
        MoodLabel::Angry,
        MoodLabel::Excited,
        MoodLabel::Stressed,
        MoodLabel::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "Happy",
            MoodLabel::Sad => "Sad",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Angry => "Angry",
            MoodLabel::Excited => "Excited",
            MoodLabel::Stressed => "Stressed",
            MoodLabel::Tired => "Tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "😀",
            MoodLabel::Sad => "😢",
            MoodLabel::Neutral => "😐",
            MoodLabel::Angry => "😡",
            MoodLabel::Excited => "🤩",
            MoodLabel::Stressed => "😰",
            MoodLabel::Tired => "😴",
        }
    }

    /// Parse an optional client-supplied label. Blank means "not supplied".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, UnknownMood> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood '{0}'; expected one of Happy, Sad, Neutral, Angry, Excited, Stressed, Tired")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodLabel::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}
