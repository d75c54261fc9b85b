//! Language list validation
//!
//! Each comma-separated token must resolve either as an ISO 639 language tag
//! (`en`, `eng`, `pt-BR`, `zh-Hant-TW`) or as an English language name
//! (`French`, `german`). Only the tokens that fail are reported.

use super::rules::split_list;
use crate::types::Verdict;
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Script, region or variant subtag following the primary language subtag
static SUBTAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z]{4}|[A-Za-z]{2}|[0-9]{3}|[A-Za-z0-9]{5,8}|[0-9][A-Za-z0-9]{3})$")
        .expect("subtag pattern is a valid regex")
});

/// Validate a comma-separated list of languages
pub fn validate_languages(value: &str) -> Verdict {
    let tokens = split_list(value);
    if tokens.is_empty() {
        return Verdict::fail(format!(
            "Language(s) '{}' are not valid ISO language codes or names.",
            value
        ));
    }

    let invalid: Vec<&str> = tokens
        .into_iter()
        .filter(|token| resolve_language(token).is_none())
        .collect();

    if invalid.is_empty() {
        Verdict::pass("All languages are valid.")
    } else {
        Verdict::fail(format!(
            "The following languages are invalid: {}",
            invalid.join(", ")
        ))
    }
}

/// Resolve one token to a language, by tag first and then by name
pub fn resolve_language(token: &str) -> Option<Language> {
    if token.is_empty() {
        return None;
    }
    resolve_tag(token).or_else(|| resolve_name(token))
}

fn resolve_tag(token: &str) -> Option<Language> {
    let mut subtags = token.split(|c| c == '-' || c == '_');
    let primary = subtags.next()?.to_ascii_lowercase();

    if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }?;

    if subtags.all(|subtag| SUBTAG.is_match(subtag)) {
        Some(language)
    } else {
        None
    }
}

fn resolve_name(token: &str) -> Option<Language> {
    Language::from_name(token).or_else(|| Language::from_name(&title_case(token)))
}

/// `old english` → `Old English`
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
