//! Verdict and report types shared by the validator, scorer and workflow

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name → raw value
pub type MetadataRecord = BTreeMap<String, String>;

/// Attribute name → message, failing attributes only
pub type IssueMap = BTreeMap<String, String>;

/// Outcome of one check on one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Check passed
    pub ok: bool,
    /// Human-readable explanation, displayed verbatim by callers
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

/// Combined validation errors and quality issues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Rule validator failures
    pub errors: IssueMap,
    /// Quality scorer issues
    pub issues: IssueMap,
}

impl CheckReport {
    pub fn new(errors: IssueMap, issues: IssueMap) -> Self {
        Self { errors, issues }
    }

    /// No errors and no issues
    pub fn ok(&self) -> bool {
        self.errors.is_empty() && self.issues.is_empty()
    }

    /// Errors as `attribute: message` lines
    pub fn error_text(&self) -> String {
        render(&self.errors)
    }

    /// Quality issues as `attribute: message` lines
    pub fn issue_text(&self) -> String {
        render(&self.issues)
    }

    /// Attributes with at least one error or issue
    pub fn flagged_attributes(&self) -> Vec<String> {
        let mut flagged: Vec<String> = self
            .errors
            .keys()
            .chain(self.issues.keys())
            .cloned()
            .collect();
        flagged.sort();
        flagged.dedup();
        flagged
    }

    /// Drop every entry for the given attributes
    pub fn without<'a, I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        for attribute in attributes {
            self.errors.remove(attribute);
            self.issues.remove(attribute);
        }
        self
    }
}

fn render(map: &IssueMap) -> String {
    map.iter()
        .map(|(attribute, message)| format!("{}: {}", attribute, message))
        .collect::<Vec<_>>()
        .join("\n")
}
