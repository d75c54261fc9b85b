//! Rule Validator
//!
//! Decides whether each attribute value is well-formed. Every attribute of
//! the active registry maps to one specific rule; the attributes listed in
//! [`requires_non_empty`] additionally get a non-empty check when the
//! specific rule passed.
//!
//! # Rules
//! 1. **url** - `http(s)://` followed by non-space characters
//! 2. **license** - editorial allow-list or SPDX list
//! 3. **dates** - strict `YYYY-MM-DD` calendar dates
//! 4. **in_language / language** - ISO 639 codes or English names
//! 5. **cite_as** - at least one well-formed BibTeX entry
//! 6. **creators / keywords / task / modality** - comma lists
//! 7. **year** - 1900 up to the current year
//! 8. everything else - non-empty strings

pub mod bibtex;
pub mod language;
pub mod license;
pub mod rules;

pub use license::LicenseCatalog;

use crate::registry::{Attribute, AttributeRegistry};
use crate::types::{IssueMap, MetadataRecord, Verdict};
use tracing::debug;

/// Attribute-level rule validator
#[derive(Debug, Clone)]
pub struct RuleValidator {
    registry: AttributeRegistry,
    licenses: LicenseCatalog,
}

impl RuleValidator {
    pub fn new(registry: AttributeRegistry, licenses: LicenseCatalog) -> Self {
        Self { registry, licenses }
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn licenses(&self) -> &LicenseCatalog {
        &self.licenses
    }

    /// Validate one attribute value
    ///
    /// Names outside the active registry are rejected.
    pub fn validate_attribute(&self, name: &str, value: &str) -> Verdict {
        let Some(attribute) = self.registry.parse(name) else {
            debug!(attribute = name, "Rejected unknown attribute");
            return Verdict::fail(format!("Invalid attribute name: {}", name));
        };

        let verdict = self.check(attribute, value);
        debug!(attribute = name, ok = verdict.ok, "Validation complete");
        verdict
    }

    /// Validate every attribute of a record
    ///
    /// Only failing attributes appear in the result.
    pub fn validate_all(&self, record: &MetadataRecord) -> IssueMap {
        record
            .iter()
            .filter_map(|(name, value)| {
                let verdict = self.validate_attribute(name, value);
                (!verdict.ok).then(|| (name.clone(), verdict.message))
            })
            .collect()
    }

    fn check(&self, attribute: Attribute, value: &str) -> Verdict {
        let specific = self.specific_rule(attribute, value);
        if !specific.ok || !requires_non_empty(attribute) {
            return specific;
        }

        let non_empty = rules::check_non_empty(value, attribute);
        if non_empty.ok {
            specific
        } else {
            non_empty
        }
    }

    fn specific_rule(&self, attribute: Attribute, value: &str) -> Verdict {
        match attribute {
            Attribute::Url => rules::validate_url(value),
            Attribute::License => self.licenses.validate(value),
            Attribute::DateModified | Attribute::DateCreated | Attribute::DatePublished => {
                rules::validate_date(value, attribute)
            }
            Attribute::InLanguage | Attribute::Language => language::validate_languages(value),
            Attribute::CiteAs => bibtex::validate_citation(value),
            Attribute::Creators | Attribute::Keywords | Attribute::Task | Attribute::Modality => {
                rules::validate_comma_list(value, attribute)
            }
            Attribute::Year => rules::validate_year(value),
            Attribute::Name
            | Attribute::Author
            | Attribute::Title
            | Attribute::Description
            | Attribute::Publisher
            | Attribute::Version => rules::check_non_empty(value, attribute),
        }
    }
}

/// Attributes that must also be non-empty trimmed strings
pub fn requires_non_empty(attribute: Attribute) -> bool {
    matches!(
        attribute,
        Attribute::Name
            | Attribute::Author
            | Attribute::Title
            | Attribute::Description
            | Attribute::Publisher
            | Attribute::Version
            | Attribute::Url
            | Attribute::License
            | Attribute::DateModified
            | Attribute::DateCreated
            | Attribute::DatePublished
            | Attribute::CiteAs
    )
}
