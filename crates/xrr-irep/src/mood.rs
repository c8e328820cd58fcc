use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A mood rated in the IRep dataset.
///
/// Declaration order is the CSV column order: mood `i` lives in column `3 + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Amusement,
    Anger,
    Awe,
    Boredom,
    Concentration,
    Confusion,
    Contemplation,
    Contempt,
    Contentment,
    Desire,
    Disappointment,
    Disgust,
    Distress,
    Doubt,
    Ecstasy,
    Elation,
    Embarrassment,
    Other,
    Fear,
    Interest,
    Love,
    Neutral,
    Pain,
    Pride,
    Realization,
    Relief,
    Sadness,
    Shame,
    Surprise,
    Sympathy,
    Triumph,
    Unsure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}'")]
pub struct UnknownMood(pub String);

impl Mood {
    /// Every mood, in column order.
    pub const ALL: [Mood; 32] = [
        Mood::Amusement,
        Mood::Anger,
        Mood::Awe,
        Mood::Boredom,
        Mood::Concentration,
        Mood::Confusion,
        Mood::Contemplation,
        Mood::Contempt,
        Mood::Contentment,
        Mood::Desire,
        Mood::Disappointment,
        Mood::Disgust,
        Mood::Distress,
        Mood::Doubt,
        Mood::Ecstasy,
        Mood::Elation,
        Mood::Embarrassment,
        Mood::Other,
        Mood::Fear,
        Mood::Interest,
        Mood::Love,
        Mood::Neutral,
        Mood::Pain,
        Mood::Pride,
        Mood::Realization,
        Mood::Relief,
        Mood::Sadness,
        Mood::Shame,
        Mood::Surprise,
        Mood::Sympathy,
        Mood::Triumph,
        Mood::Unsure,
    ];

    /// First CSV column holding a mood flag.
    pub const COLUMN_OFFSET: usize = 3;

    pub fn column(self) -> usize {
        Self::COLUMN_OFFSET + self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Amusement => "AMUSEMENT",
            Mood::Anger => "ANGER",
            Mood::Awe => "AWE",
            Mood::Boredom => "BOREDOM",
            Mood::Concentration => "CONCENTRATION",
            Mood::Confusion => "CONFUSION",
            Mood::Contemplation => "CONTEMPLATION",
            Mood::Contempt => "CONTEMPT",
            Mood::Contentment => "CONTENTMENT",
            Mood::Desire => "DESIRE",
            Mood::Disappointment => "DISAPPOINTMENT",
            Mood::Disgust => "DISGUST",
            Mood::Distress => "DISTRESS",
            Mood::Doubt => "DOUBT",
            Mood::Ecstasy => "ECSTASY",
            Mood::Elation => "ELATION",
            Mood::Embarrassment => "EMBARRASSMENT",
            Mood::Other => "OTHER",
            Mood::Fear => "FEAR",
            Mood::Interest => "INTEREST",
            Mood::Love => "LOVE",
            Mood::Neutral => "NEUTRAL",
            Mood::Pain => "PAIN",
            Mood::Pride => "PRIDE",
            Mood::Realization => "REALIZATION",
            Mood::Relief => "RELIEF",
            Mood::Sadness => "SADNESS",
            Mood::Shame => "SHAME",
            Mood::Surprise => "SURPRISE",
            Mood::Sympathy => "SYMPATHY",
            Mood::Triumph => "TRIUMPH",
            Mood::Unsure => "UNSURE",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive.
impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}
