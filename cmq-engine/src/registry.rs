//! Attribute Registry
//!
//! Closed set of metadata attributes the engine knows about, each with the
//! contract text shown to users. The registry is the dispatch key for both
//! the rule validator and the quality scorer: an attribute outside the active
//! registry is rejected by both.

use cmq_common::config::RegistryMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every attribute name recognised in either registry mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Name,
    Creators,
    Author,
    Year,
    Title,
    Description,
    License,
    Url,
    Publisher,
    Version,
    Keywords,
    DateModified,
    DateCreated,
    DatePublished,
    CiteAs,
    InLanguage,
    Language,
    Task,
    Modality,
}

/// Croissant attribute order, as presented to users
const CROISSANT_ATTRIBUTES: [Attribute; 15] = [
    Attribute::Name,
    Attribute::Creators,
    Attribute::Description,
    Attribute::License,
    Attribute::Url,
    Attribute::Publisher,
    Attribute::Version,
    Attribute::Keywords,
    Attribute::DateModified,
    Attribute::DateCreated,
    Attribute::DatePublished,
    Attribute::CiteAs,
    Attribute::InLanguage,
    Attribute::Task,
    Attribute::Modality,
];

/// Legacy form attribute order
const LEGACY_ATTRIBUTES: [Attribute; 17] = [
    Attribute::Name,
    Attribute::Author,
    Attribute::Year,
    Attribute::Title,
    Attribute::Description,
    Attribute::License,
    Attribute::Url,
    Attribute::Publisher,
    Attribute::Version,
    Attribute::Keywords,
    Attribute::DateModified,
    Attribute::DateCreated,
    Attribute::DatePublished,
    Attribute::CiteAs,
    Attribute::Language,
    Attribute::Task,
    Attribute::Modality,
];

impl Attribute {
    /// Wire name used as the record key
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Creators => "creators",
            Attribute::Author => "author",
            Attribute::Year => "year",
            Attribute::Title => "title",
            Attribute::Description => "description",
            Attribute::License => "license",
            Attribute::Url => "url",
            Attribute::Publisher => "publisher",
            Attribute::Version => "version",
            Attribute::Keywords => "keywords",
            Attribute::DateModified => "date_modified",
            Attribute::DateCreated => "date_created",
            Attribute::DatePublished => "date_published",
            Attribute::CiteAs => "cite_as",
            Attribute::InLanguage => "in_language",
            Attribute::Language => "language",
            Attribute::Task => "task",
            Attribute::Modality => "modality",
        }
    }

    /// Contract text describing the expected value
    pub fn contract(&self) -> &'static str {
        match self {
            Attribute::Name => "the name of the dataset (string).",
            Attribute::Creators => "the creator(s) of the dataset (comma-separated string).",
            Attribute::Author => "the author of the dataset (string).",
            Attribute::Year => "the publication year of the dataset (YYYY).",
            Attribute::Title => {
                "the title of the dataset/publication that describes the dataset (string)."
            }
            Attribute::Description => "a description of the dataset (string) (2+ sentences).",
            Attribute::License => "the license of the dataset (string) (one of the valid options).",
            Attribute::Url => "the URL of the dataset (string) (valid URL format).",
            Attribute::Publisher => "the publisher of the dataset (string).",
            Attribute::Version => "the version of the dataset (string).",
            Attribute::Keywords => "the keywords of the dataset (comma-separated string) (at least 3).",
            Attribute::DateModified => "the date the dataset was last modified (YYYY-MM-DD).",
            Attribute::DateCreated => "the date the dataset was created (YYYY-MM-DD).",
            Attribute::DatePublished => "the date the dataset was published (YYYY-MM-DD).",
            Attribute::CiteAs => "the citation for the dataset (string) (BibTeX format).",
            Attribute::InLanguage | Attribute::Language => {
                "the language(s) of the dataset (comma-separated string) (ISO 639-1 codes/Language names)."
            }
            Attribute::Task => "the task(s) associated with the dataset (comma-separated string).",
            Attribute::Modality => "the modality(s) of the dataset (comma-separated string).",
        }
    }

    /// Date attributes can never be force-accepted
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            Attribute::DateModified | Attribute::DateCreated | Attribute::DatePublished
        )
    }

    /// Attribute name as shown at the start of a sentence
    ///
    /// `date_created` becomes `Date created`.
    pub fn display_name(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised attribute name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid attribute name: {0}")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CROISSANT_ATTRIBUTES
            .iter()
            .chain(LEGACY_ATTRIBUTES.iter())
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Registry of attributes for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRegistry {
    mode: RegistryMode,
}

impl AttributeRegistry {
    pub fn new(mode: RegistryMode) -> Self {
        Self { mode }
    }

    /// Croissant registry (the default)
    pub fn croissant() -> Self {
        Self::new(RegistryMode::Croissant)
    }

    pub fn legacy() -> Self {
        Self::new(RegistryMode::Legacy)
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// All attributes of this registry in display order
    pub fn all_attributes(&self) -> &'static [Attribute] {
        match self.mode {
            RegistryMode::Croissant => &CROISSANT_ATTRIBUTES,
            RegistryMode::Legacy => &LEGACY_ATTRIBUTES,
        }
    }

    /// Resolve a name to an attribute of this registry
    pub fn parse(&self, name: &str) -> Option<Attribute> {
        self.all_attributes()
            .iter()
            .find(|a| a.as_str() == name)
            .copied()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.parse(name).is_some()
    }

    /// Contract text for `name`, or an empty string if unknown
    pub fn describe(&self, name: &str) -> &'static str {
        self.parse(name).map(|a| a.contract()).unwrap_or("")
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::croissant()
    }
}
