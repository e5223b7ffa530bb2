// File: ./src/config.rs
// Handles parser configuration loading and defaults.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_label_color() -> String {
    "#6366f1".to_string()
}

/// An extra priority keyword, appended after the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityKeyword {
    pub keyword: String,
    /// Urgency level 1 (highest) through 4 (lowest).
    pub level: u8,
}

/// An extra fixed-offset date keyword, appended after the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOffsetKeyword {
    pub keyword: String,
    /// Days from today that the keyword resolves to.
    pub offset_days: i64,
}

/// User-tunable parser configuration. Everything defaults to the built-in
/// tables; a TOML file can recolor label chips and append keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default)]
    pub priority_keywords: Vec<PriorityKeyword>,
    #[serde(default)]
    pub date_keywords: Vec<DateOffsetKeyword>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            label_color: default_label_color(),
            priority_keywords: Vec::new(),
            date_keywords: Vec::new(),
        }
    }
}

impl ParserConfig {
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse parser configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!("Failed to read parser configuration at {}", path.display())
        })?;
        let config = Self::from_toml(&raw)?;
        log::info!(
            "Loaded parser configuration: {} extra priority keyword(s), {} extra date keyword(s)",
            config.priority_keywords.len(),
            config.date_keywords.len()
        );
        Ok(config)
    }
}
