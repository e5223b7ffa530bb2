// File: ./src/model/display.rs
use crate::model::item::ParsedInput;
use crate::model::parser::format_date_for_input;
use chrono::{Datelike, Duration, NaiveDate};

/// Presentation helpers for a parse result: chip captions for the detected
/// attributes and a canonical re-parseable input line.
pub trait InputDisplay {
    fn priority_chip(&self) -> Option<String>;
    fn due_date_chip(&self, today: NaiveDate) -> Option<String>;
    fn to_input_string(&self) -> String;
}

impl InputDisplay for ParsedInput {
    fn priority_chip(&self) -> Option<String> {
        self.priority.map(|p| format!("Priority {}", p.level()))
    }

    /// "Today", "Tomorrow", or a short month-day form; the year is shown
    /// only when it differs from the current one.
    fn due_date_chip(&self, today: NaiveDate) -> Option<String> {
        let due = self.due_date?;
        if due == today {
            return Some("Today".to_string());
        }
        if due == today + Duration::days(1) {
            return Some("Tomorrow".to_string());
        }
        let short = format!("{} {}", due.format("%b"), due.day());
        if due.year() == today.year() {
            Some(short)
        } else {
            Some(format!("{}, {}", short, due.year()))
        }
    }

    /// Rebuilds a quick-add line that parses back to the same attributes:
    /// title, `p{n}`, ISO date, then the labels.
    fn to_input_string(&self) -> String {
        let mut s = self.clean_title.clone();
        if let Some(p) = self.priority {
            s.push_str(&format!(" p{}", p.level()));
        }
        if let Some(due) = self.due_date {
            s.push_str(&format!(" {}", format_date_for_input(due)));
        }
        for label in &self.labels {
            s.push_str(&format!(" @{}", label));
        }
        s.trim().to_string()
    }
}
