use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JournalError;

/// Presentation form of a mood, stored and shown as an emoji.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mood {
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😐")]
    Meh,
    #[serde(rename = "😞")]
    Sad,
}

/// Backend form of a mood, as the CMS stores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BackendMood {
    Happy,
    Meh,
    Sad,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Meh, Mood::Sad];

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Meh => "😐",
            Mood::Sad => "😞",
        }
    }

    pub fn to_backend(self) -> BackendMood {
        match self {
            Mood::Happy => BackendMood::Happy,
            Mood::Meh => BackendMood::Meh,
            Mood::Sad => BackendMood::Sad,
        }
    }
}

impl BackendMood {
    pub fn keyword(self) -> &'static str {
        match self {
            BackendMood::Happy => "happy",
            BackendMood::Meh => "meh",
            BackendMood::Sad => "sad",
        }
    }

    pub fn to_presentation(self) -> Mood {
        match self {
            BackendMood::Happy => Mood::Happy,
            BackendMood::Meh => Mood::Meh,
            BackendMood::Sad => Mood::Sad,
        }
    }
}

impl From<Mood> for BackendMood {
    fn from(mood: Mood) -> Self {
        mood.to_backend()
    }
}

impl From<BackendMood> for Mood {
    fn from(mood: BackendMood) -> Self {
        mood.to_presentation()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

impl fmt::Display for BackendMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.emoji() == s)
            .ok_or_else(|| JournalError::InvalidMood(s.to_string()))
    }
}

impl FromStr for BackendMood {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(BackendMood::Happy),
            "meh" => Ok(BackendMood::Meh),
            "sad" => Ok(BackendMood::Sad),
            other => Err(JournalError::InvalidMood(other.to_string())),
        }
    }
}
