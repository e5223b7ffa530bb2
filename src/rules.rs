// File: ./src/rules.rs
// Rule tables for the quick-add parser: the priority keyword table with its
// combined pattern, the ordered date keyword and date pattern tables, and the
// label pattern. Built once, never mutated, shared read-only by every call.
use crate::config::ParserConfig;
use crate::model::item::Priority;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Process-wide registry built from the default configuration.
pub static DEFAULT_RULES: Lazy<Rules> = Lazy::new(Rules::new);

pub struct Rules {
    pub priority: PriorityRule,
    pub date_keywords: Vec<DateKeyword>,
    pub date_patterns: Vec<DatePattern>,
    pub label: LabelRule,
}

impl Rules {
    pub fn new() -> Self {
        Self::from_config(&ParserConfig::default())
    }

    /// Builds the registry from a configuration value. Construction is total:
    /// entries that cannot be honored are skipped with a warning. Configured
    /// keywords are appended after the built-in tables, so built-in entries
    /// keep their precedence.
    pub fn from_config(config: &ParserConfig) -> Self {
        let mut priority_table = default_priority_table();
        for entry in &config.priority_keywords {
            if entry.keyword.trim().is_empty() {
                log::warn!("Ignoring priority keyword with empty text");
                continue;
            }
            match Priority::from_level(entry.level) {
                Some(level) => priority_table.push((entry.keyword.to_lowercase(), level)),
                None => log::warn!(
                    "Ignoring priority keyword '{}': level {} is outside 1-4",
                    entry.keyword,
                    entry.level
                ),
            }
        }

        let mut date_keywords = default_date_keywords();
        for entry in &config.date_keywords {
            if entry.keyword.trim().is_empty() {
                log::warn!("Ignoring date keyword with empty text");
                continue;
            }
            date_keywords.push(DateKeyword::new(
                &entry.keyword.to_lowercase(),
                DayRule::Offset(entry.offset_days),
            ));
        }

        Rules {
            priority: PriorityRule::new(priority_table),
            date_keywords,
            date_patterns: default_date_patterns(),
            label: LabelRule::new(&config.label_color),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

fn default_priority_table() -> Vec<(String, Priority)> {
    [
        ("p1", Priority::P1),
        ("p2", Priority::P2),
        ("p3", Priority::P3),
        ("p4", Priority::P4),
        ("priority 1", Priority::P1),
        ("priority 2", Priority::P2),
        ("priority 3", Priority::P3),
        ("priority 4", Priority::P4),
        ("high", Priority::P1),
        ("medium", Priority::P2),
        ("low", Priority::P3),
        ("urgent", Priority::P1),
    ]
    .into_iter()
    .map(|(keyword, level)| (keyword.to_string(), level))
    .collect()
}

const WEEKDAYS: [(&str, &str, Weekday); 7] = [
    ("monday", "mon", Weekday::Mon),
    ("tuesday", "tue", Weekday::Tue),
    ("wednesday", "wed", Weekday::Wed),
    ("thursday", "thu", Weekday::Thu),
    ("friday", "fri", Weekday::Fri),
    ("saturday", "sat", Weekday::Sat),
    ("sunday", "sun", Weekday::Sun),
];

// Table order is significant: the first keyword that matches anywhere in the
// text wins, so the fixed offsets come before the weekday names and full
// names come before their abbreviations.
fn default_date_keywords() -> Vec<DateKeyword> {
    let mut table = vec![
        DateKeyword::new("today", DayRule::Offset(0)),
        DateKeyword::new("tomorrow", DayRule::Offset(1)),
        DateKeyword::new("next week", DayRule::Offset(7)),
    ];
    for (name, _, day) in WEEKDAYS {
        table.push(DateKeyword::new(name, DayRule::Weekday(day)));
    }
    for (_, abbrev, day) in WEEKDAYS {
        table.push(DateKeyword::new(abbrev, DayRule::Weekday(day)));
    }
    table
}

// Most specific numeric format first; a later pattern is only consulted when
// every earlier one failed to match or was rejected by its resolver.
fn default_date_patterns() -> Vec<DatePattern> {
    vec![
        DatePattern::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b", PatternKind::SlashFullYear),
        DatePattern::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2})\b", PatternKind::SlashShortYear),
        DatePattern::new(r"\b(\d{1,2})/(\d{1,2})\b", PatternKind::SlashNoYear),
        DatePattern::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b", PatternKind::Iso),
    ]
}

/// Priority keyword table plus the single combined regex whose alternatives
/// are exactly the table's keys.
pub struct PriorityRule {
    keywords: Vec<(String, Priority)>,
    pattern: Regex,
}

impl PriorityRule {
    fn new(keywords: Vec<(String, Priority)>) -> Self {
        // Longest key first, so multi-word phrases beat their own prefixes
        // at a shared start position.
        let mut alternatives: Vec<&str> = keywords.iter().map(|(k, _)| k.as_str()).collect();
        alternatives.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let joined = alternatives
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", joined))
            .expect("escaped keyword table forms a valid pattern");
        Self { keywords, pattern }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Maps matched text back to its level, case-insensitively. Text the
    /// table does not know yields None.
    pub fn level_for(&self, matched: &str) -> Option<Priority> {
        let lower = matched.to_lowercase();
        self.keywords
            .iter()
            .find(|(keyword, _)| keyword == &lower)
            .map(|(_, level)| *level)
    }
}

/// A fixed-phrase date rule: the keyword, its precompiled whole-word pattern
/// and the day arithmetic it stands for.
pub struct DateKeyword {
    keyword: String,
    pattern: Regex,
    rule: DayRule,
}

impl DateKeyword {
    fn new(keyword: &str, rule: DayRule) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
            .expect("escaped keyword forms a valid pattern");
        Self {
            keyword: keyword.to_string(),
            pattern,
            rule,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        self.rule.resolve(today)
    }
}

/// Day arithmetic attached to a date keyword, resolved against the injected
/// "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRule {
    /// Fixed number of days from today.
    Offset(i64),
    /// Next occurrence of this weekday strictly after today.
    Weekday(Weekday),
}

impl DayRule {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DayRule::Offset(days) => today + Duration::days(days),
            DayRule::Weekday(target) => next_weekday(today, target),
        }
    }
}

/// First occurrence of `target` strictly after `from`: lands a full week out
/// when `from` already falls on the target weekday.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut day = from + Duration::days(1);
    while day.weekday() != target {
        day += Duration::days(1);
    }
    day
}

/// A numeric date format: its regex and the tagged resolver for its captures.
pub struct DatePattern {
    regex: Regex,
    kind: PatternKind,
}

impl DatePattern {
    fn new(pattern: &str, kind: PatternKind) -> Self {
        Self {
            regex: Regex::new(pattern).expect("date pattern table forms valid patterns"),
            kind,
        }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn resolve(&self, caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
        self.kind.resolve(caps, today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// MM/DD/YYYY
    SlashFullYear,
    /// MM/DD/YY, read as 2000 + YY.
    SlashShortYear,
    /// MM/DD with the year inferred: current year, rolled forward to next
    /// year when the date already passed.
    SlashNoYear,
    /// YYYY-MM-DD
    Iso,
}

impl PatternKind {
    /// Turns captured digits into a date. Impossible calendar dates resolve
    /// to None, which sends the extractor on to the next pattern.
    fn resolve(self, caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            PatternKind::SlashFullYear => {
                let (month, day) = (capture_u32(caps, 1)?, capture_u32(caps, 2)?);
                let year = capture_u32(caps, 3)? as i32;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            PatternKind::SlashShortYear => {
                let (month, day) = (capture_u32(caps, 1)?, capture_u32(caps, 2)?);
                let year = 2000 + capture_u32(caps, 3)? as i32;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            PatternKind::SlashNoYear => {
                let (month, day) = (capture_u32(caps, 1)?, capture_u32(caps, 2)?);
                if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                    return None;
                }
                let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
                if this_year < today {
                    NaiveDate::from_ymd_opt(today.year() + 1, month, day)
                } else {
                    Some(this_year)
                }
            }
            PatternKind::Iso => {
                let year = capture_u32(caps, 1)? as i32;
                let (month, day) = (capture_u32(caps, 2)?, capture_u32(caps, 3)?);
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

fn capture_u32(caps: &Captures, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

/// The `@name` label pattern, global over the text, plus the chip color the
/// caller renders labels with.
pub struct LabelRule {
    pattern: Regex,
    default_color: String,
}

impl LabelRule {
    fn new(default_color: &str) -> Self {
        Self {
            pattern: Regex::new(r"@(\w+)").expect("label pattern is valid"),
            default_color: default_color.to_string(),
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}
