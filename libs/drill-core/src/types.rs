//! Core enumerations shared across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    /// Matches an accepted answer.
    Correct,
    /// Not a known answer.
    Incorrect,
    /// A known answer for the item, but not the one being asked for.
    Inexact,
    /// Close to an accepted meaning; the user decides.
    ABitOff,
}

impl AnswerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Inexact => "inexact",
            Self::ABitOff => "a_bit_off",
        }
    }
}

/// Which facet of an item a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Meaning,
    Reading,
}

impl Aspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meaning => "meaning",
            Self::Reading => "reading",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item category, without the answers it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Radical,
    Kanji,
    Vocabulary,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radical => "radical",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
        }
    }

    /// Parse from the API object name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "radical" => Some(Self::Radical),
            "kanji" => Some(Self::Kanji),
            "vocabulary" => Some(Self::Vocabulary),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-kind of a reading answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Onyomi,
    Kunyomi,
    Nanori,
}

impl ReadingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onyomi => "onyomi",
            Self::Kunyomi => "kunyomi",
            Self::Nanori => "nanori",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "onyomi" => Some(Self::Onyomi),
            "kunyomi" => Some(Self::Kunyomi),
            "nanori" => Some(Self::Nanori),
            _ => None,
        }
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
