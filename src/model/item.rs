// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency level, 1 (highest) through 4 (lowest).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Priority {
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
}

impl Priority {
    /// Numeric level as written in the quick-add syntax (`p1`..`p4`).
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::P1),
            2 => Some(Self::P2),
            3 => Some(Self::P3),
            4 => Some(Self::P4),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.level())
    }
}

/// Literal substrings that triggered each detection. Callers use these to
/// render removable chips and to undo a detection without re-typing.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DetectedKeywords {
    pub priority: Option<String>,
    pub date: Option<String>,
    /// Every matched label literal, duplicates included.
    pub labels: Vec<String>,
}

/// Structured result of parsing one line of quick-add input.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParsedInput {
    /// Input with all matched substrings removed, whitespace collapsed to
    /// single spaces and trimmed.
    pub clean_title: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    /// Lowercase label names, de-duplicated, in first-seen order.
    pub labels: Vec<String>,
    pub detected_keywords: DetectedKeywords,
}

impl ParsedInput {
    pub fn has_detections(&self) -> bool {
        self.priority.is_some() || self.due_date.is_some() || !self.labels.is_empty()
    }
}
