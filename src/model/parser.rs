// File: src/model/parser.rs
//
// The quick-add pipeline: priority, then due date, then labels, each phase
// scanning the text the previous phase left behind. Whatever survives all
// three becomes the task title.
use crate::model::item::{DetectedKeywords, ParsedInput, Priority};
use crate::rules::{DEFAULT_RULES, Rules};
use chrono::{Local, NaiveDate};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SyntaxType {
    Text,
    Priority,
    DueDate,
    Label,
}

#[derive(Debug)]
pub struct SyntaxToken {
    pub kind: SyntaxType,
    pub start: usize,
    pub end: usize,
}

/// Parses one line of quick-add input against the default rules, with "now"
/// read from the local clock.
pub fn parse(input: &str) -> ParsedInput {
    parse_with(&DEFAULT_RULES, Local::now().date_naive(), input)
}

/// Parses one line of quick-add input. Pure: all calendar arithmetic is
/// anchored on the supplied `today`, and no match is ever an error.
pub fn parse_with(rules: &Rules, today: NaiveDate, input: &str) -> ParsedInput {
    let mut detected = DetectedKeywords::default();
    let mut text = input.to_string();

    let mut priority = None;
    if let Some(hit) = extract_priority(rules, &text) {
        priority = Some(hit.level);
        detected.priority = Some(hit.keyword);
        text = hit.rest;
    }

    let mut due_date = None;
    if let Some(hit) = extract_due_date(rules, today, &text) {
        due_date = Some(hit.date);
        detected.date = Some(hit.keyword);
        text = hit.rest;
    }

    let hit = extract_labels(rules, &text);
    detected.labels = hit.keywords;

    ParsedInput {
        clean_title: normalize_whitespace(&hit.rest),
        priority,
        due_date,
        labels: hit.labels,
        detected_keywords: detected,
    }
}

struct PriorityHit {
    level: Priority,
    keyword: String,
    rest: String,
}

/// Leftmost combined-pattern hit wins. Only that occurrence is removed; a
/// second priority keyword later in the line stays in the text. A hit whose
/// text the table does not know counts as no match.
fn extract_priority(rules: &Rules, text: &str) -> Option<PriorityHit> {
    let m = rules.priority.pattern().find(text)?;
    let level = rules.priority.level_for(m.as_str())?;
    Some(PriorityHit {
        level,
        keyword: m.as_str().to_string(),
        rest: remove_range(text, m.start(), m.end()),
    })
}

struct DateHit {
    date: NaiveDate,
    keyword: String,
    rest: String,
}

/// Keyword phase first, in table order; pattern phase only when no keyword
/// matched, in registry order. A pattern whose resolver rejects the captured
/// numbers falls through to the next pattern in sequence.
fn extract_due_date(rules: &Rules, today: NaiveDate, text: &str) -> Option<DateHit> {
    for keyword in &rules.date_keywords {
        if let Some(m) = keyword.pattern().find(text) {
            return Some(DateHit {
                date: keyword.resolve(today),
                keyword: m.as_str().to_string(),
                // The matched keyword is stripped wherever it occurs.
                rest: keyword.pattern().replace_all(text, "").into_owned(),
            });
        }
    }

    for pattern in &rules.date_patterns {
        let Some(caps) = pattern.regex().captures(text) else {
            continue;
        };
        let Some(whole) = caps.get(0) else { continue };
        if let Some(date) = pattern.resolve(&caps, today) {
            return Some(DateHit {
                date,
                keyword: whole.as_str().to_string(),
                rest: remove_range(text, whole.start(), whole.end()),
            });
        }
    }

    None
}

struct LabelHits {
    labels: Vec<String>,
    keywords: Vec<String>,
    rest: String,
}

/// Collects every `@name` token: names lowercased and de-duplicated in
/// first-seen order, every literal recorded, every occurrence removed.
fn extract_labels(rules: &Rules, text: &str) -> LabelHits {
    let mut labels: Vec<String> = Vec::new();
    let mut keywords = Vec::new();
    let mut spans = Vec::new();
    for caps in rules.label.pattern().captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let lower = name.as_str().to_lowercase();
        if !labels.contains(&lower) {
            labels.push(lower);
        }
        keywords.push(whole.as_str().to_string());
        spans.push((whole.start(), whole.end()));
    }
    LabelHits {
        labels,
        keywords,
        rest: remove_spans(text, &spans),
    }
}

fn remove_range(text: &str, start: usize, end: usize) -> String {
    remove_spans(text, &[(start, end)])
}

/// Drops the given byte ranges (ascending, non-overlapping) from `text`.
fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(start, end) in spans {
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats a date the way an HTML date input field expects it.
pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Classifies the raw input into highlight spans against the default rules.
pub fn tokenize(input: &str) -> Vec<SyntaxToken> {
    tokenize_with(&DEFAULT_RULES, Local::now().date_naive(), input)
}

/// Span classification of `input` for inline highlighting. Matching mirrors
/// `parse_with` closely enough for display purposes, but spans are reported
/// in raw-input coordinates and only the first occurrence of a repeated date
/// keyword is marked.
pub fn tokenize_with(rules: &Rules, today: NaiveDate, input: &str) -> Vec<SyntaxToken> {
    let mut marks: Vec<SyntaxToken> = Vec::new();

    if let Some(m) = rules.priority.pattern().find(input)
        && rules.priority.level_for(m.as_str()).is_some()
    {
        marks.push(SyntaxToken {
            kind: SyntaxType::Priority,
            start: m.start(),
            end: m.end(),
        });
    }

    if let Some((start, end)) = find_date_span(rules, today, input, &marks) {
        marks.push(SyntaxToken {
            kind: SyntaxType::DueDate,
            start,
            end,
        });
    }

    for m in rules.label.pattern().find_iter(input) {
        if !overlaps_any(&marks, m.start(), m.end()) {
            marks.push(SyntaxToken {
                kind: SyntaxType::Label,
                start: m.start(),
                end: m.end(),
            });
        }
    }

    marks.sort_by_key(|token| token.start);

    // Fill the gaps between marks with text runs.
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for mark in marks {
        if mark.start > cursor {
            tokens.push(SyntaxToken {
                kind: SyntaxType::Text,
                start: cursor,
                end: mark.start,
            });
        }
        cursor = mark.end;
        tokens.push(mark);
    }
    if cursor < input.len() {
        tokens.push(SyntaxToken {
            kind: SyntaxType::Text,
            start: cursor,
            end: input.len(),
        });
    }
    tokens
}

fn find_date_span(
    rules: &Rules,
    today: NaiveDate,
    input: &str,
    taken: &[SyntaxToken],
) -> Option<(usize, usize)> {
    for keyword in &rules.date_keywords {
        for m in keyword.pattern().find_iter(input) {
            if !overlaps_any(taken, m.start(), m.end()) {
                return Some((m.start(), m.end()));
            }
        }
    }
    for pattern in &rules.date_patterns {
        for caps in pattern.regex().captures_iter(input) {
            let Some(whole) = caps.get(0) else { continue };
            if overlaps_any(taken, whole.start(), whole.end()) {
                continue;
            }
            if pattern.resolve(&caps, today).is_some() {
                return Some((whole.start(), whole.end()));
            }
            // Resolver rejected the digits; move on to the next pattern.
            break;
        }
    }
    None
}

fn overlaps_any(tokens: &[SyntaxToken], start: usize, end: usize) -> bool {
    tokens.iter().any(|token| start < token.end && token.start < end)
}
