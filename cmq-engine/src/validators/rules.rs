//! Syntactic rules shared by several attributes
//!
//! Each rule is a pure function over the raw value returning a `Verdict`.

use crate::registry::Attribute;
use crate::types::Verdict;
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://\S+").expect("URL pattern is a valid regex")
});

/// Earliest accepted publication year
pub const MIN_YEAR: i32 = 1900;

/// `http://` or `https://` followed by at least one non-space character
pub fn validate_url(value: &str) -> Verdict {
    if URL_PATTERN.is_match(value) {
        Verdict::pass("URL is valid.")
    } else {
        Verdict::fail("Invalid URL format.")
    }
}

/// Strict `YYYY-MM-DD` that must also be a real calendar date
///
/// The shape is checked before parsing because chrono accepts single-digit
/// months and days and years of any width.
pub fn validate_date(value: &str, attribute: Attribute) -> Verdict {
    let failure = || {
        Verdict::fail(format!(
            "{} must be in the format YYYY-MM-DD.",
            attribute.display_name()
        ))
    };

    if !has_iso_date_shape(value) {
        return failure();
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(_) => Verdict::pass("Date is valid."),
        Err(_) => failure(),
    }
}

fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Integer between 1900 and the current calendar year inclusive
pub fn validate_year(value: &str) -> Verdict {
    let current_year = Utc::now().year();
    match value.trim().parse::<i32>() {
        Ok(year) if (MIN_YEAR..=current_year).contains(&year) => Verdict::pass("Year is valid."),
        Ok(_) => Verdict::fail("Invalid year format. It should be between 1900 and the current year."),
        Err(_) => Verdict::fail("Year must be a valid number."),
    }
}

/// Non-blank after trimming
pub fn check_non_empty(value: &str, attribute: Attribute) -> Verdict {
    if value.trim().is_empty() {
        Verdict::fail(format!("{} must be a non-empty string.", attribute.display_name()))
    } else {
        Verdict::pass("Value is a non-empty string.")
    }
}

/// Comma-separated tokens, trimmed, with blank tokens dropped
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// At least one non-blank token once blanks are dropped
///
/// `"a, ,b"` is treated exactly like `"a, b"`.
pub fn validate_comma_list(value: &str, attribute: Attribute) -> Verdict {
    if split_list(value).is_empty() {
        Verdict::fail(format!(
            "{} must be a comma-separated list of non-empty values.",
            attribute.display_name()
        ))
    } else {
        Verdict::pass(format!("{} is valid.", attribute.display_name()))
    }
}
