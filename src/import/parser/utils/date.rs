use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

pub fn check_date(content: &str) -> Result<(), &'static str> {
    if content.is_empty() {
        return Err("Empty date");
    }
    if !DATE.is_match(content) {
        return Err("Expected a date in the form YYYY-MM-DD");
    }
    Ok(())
}

/// Only meaningful for content that passed [check_date].
pub fn check_calendar_date(content: &str) -> Result<(), &'static str> {
    NaiveDate::parse_from_str(content, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| "Not a valid calendar date")
}
