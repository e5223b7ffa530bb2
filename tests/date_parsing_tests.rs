// Calendar arithmetic for date keywords and numeric date patterns. Every
// test pins "today" so weekday and year rollover stay deterministic.
use chrono::NaiveDate;
use quickadd::model::parse_with;
use quickadd::rules::Rules;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2024-06-05 is a Wednesday.
fn today() -> NaiveDate {
    date(2024, 6, 5)
}

fn due(input: &str) -> Option<NaiveDate> {
    parse_with(&Rules::new(), today(), input).due_date
}

#[test]
fn test_fixed_offset_keywords() {
    assert_eq!(due("pay rent today"), Some(date(2024, 6, 5)));
    assert_eq!(due("pay rent tomorrow"), Some(date(2024, 6, 6)));
    assert_eq!(due("pay rent next week"), Some(date(2024, 6, 12)));
}

#[test]
fn test_weekday_resolves_to_next_occurrence() {
    assert_eq!(due("standup thursday"), Some(date(2024, 6, 6)));
    assert_eq!(due("review friday"), Some(date(2024, 6, 7)));
    // Monday wraps over the weekend.
    assert_eq!(due("planning monday"), Some(date(2024, 6, 10)));
}

#[test]
fn test_same_weekday_rolls_a_full_week() {
    // Today is a Wednesday; "wednesday" must never mean today.
    let result = parse_with(&Rules::new(), today(), "wednesday meeting");
    assert_eq!(result.due_date, Some(date(2024, 6, 12)));
    assert_eq!(result.clean_title, "meeting");
}

#[test]
fn test_weekday_abbreviations() {
    assert_eq!(due("gym thu"), Some(date(2024, 6, 6)));
    assert_eq!(due("brunch sun"), Some(date(2024, 6, 9)));
}

#[test]
fn test_full_year_slash_date() {
    assert_eq!(due("ship 12/25/2024"), Some(date(2024, 12, 25)));
    assert_eq!(due("ship 1/5/2025"), Some(date(2025, 1, 5)));
}

#[test]
fn test_two_digit_year_reads_as_2000s() {
    assert_eq!(due("ship 12/25/24"), Some(date(2024, 12, 25)));
    assert_eq!(due("ship 1/1/99"), Some(date(2099, 1, 1)));
}

#[test]
fn test_bare_month_day_in_the_future_stays_this_year() {
    assert_eq!(due("fireworks 7/4"), Some(date(2024, 7, 4)));
}

#[test]
fn test_bare_month_day_in_the_past_rolls_to_next_year() {
    assert_eq!(due("taxes 3/1"), Some(date(2025, 3, 1)));
}

#[test]
fn test_bare_month_day_equal_to_today_does_not_roll() {
    assert_eq!(due("checkin 6/5"), Some(date(2024, 6, 5)));
}

#[test]
fn test_out_of_range_bare_date_is_ignored() {
    let result = parse_with(&Rules::new(), today(), "task due 13/40");

    assert_eq!(result.due_date, None);
    assert_eq!(result.clean_title, "task due 13/40");
}

#[test]
fn test_impossible_calendar_dates_are_rejected() {
    // Both the slash and the ISO resolvers refuse a day that does not exist.
    assert_eq!(due("report 2/30/2024"), None);
    assert_eq!(due("report 2024-02-30"), None);
}

#[test]
fn test_iso_date() {
    let result = parse_with(&Rules::new(), today(), "release 2024-12-01");

    assert_eq!(result.due_date, Some(date(2024, 12, 1)));
    assert_eq!(
        result.detected_keywords.date.as_deref(),
        Some("2024-12-01")
    );
    assert_eq!(result.clean_title, "release");
}

#[test]
fn test_pattern_order_prefers_the_full_year_form() {
    // The bare month/day pattern would also match inside "12/25/2024"; the
    // four-digit-year pattern is consulted first and takes the whole literal.
    let result = parse_with(&Rules::new(), today(), "12/25/2024");

    assert_eq!(result.due_date, Some(date(2024, 12, 25)));
    assert_eq!(
        result.detected_keywords.date.as_deref(),
        Some("12/25/2024")
    );
    assert_eq!(result.clean_title, "");
}

#[test]
fn test_keyword_phase_precedes_patterns() {
    // A keyword hit ends the date phase; the numeric date is left in the
    // title untouched.
    let result = parse_with(&Rules::new(), today(), "tomorrow 12/25/2024");

    assert_eq!(result.due_date, Some(date(2024, 6, 6)));
    assert_eq!(result.clean_title, "12/25/2024");
}

#[test]
fn test_leap_day_with_explicit_year() {
    assert_eq!(due("audit 2/29/2024"), Some(date(2024, 2, 29)));
}
