use chrono::{Local, NaiveDate};

use super::validators::ValidationError;

/// Day-first date layout used on the console and in text files
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Placeholder written for a rental that has not been returned
pub const NOT_AVAILABLE: &str = "N.A.";

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parse a returned date, where `N.A.` (or nothing) means still rented
pub fn parse_returned(s: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let s = s.trim();
    if s.is_empty() || s == NOT_AVAILABLE {
        return Ok(None);
    }
    parse_date(s).map(Some)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_returned(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
