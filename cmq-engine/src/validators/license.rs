//! License catalog
//!
//! Two sources are consulted: a short editorial allow-list compiled into the
//! crate and the SPDX license list read from a JSON file. A value matching
//! either source (case-insensitively) is accepted. A list that fails to load
//! only affects values outside the allow-list.

use crate::types::Verdict;
use cmq_common::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Editorial allow-list offered by the form
pub const LICENSE_OPTIONS: [&str; 8] = [
    "MIT",
    "Apache-2.0",
    "GPL-3.0",
    "CC-BY",
    "CC-BY-SA",
    "CC-BY-NC",
    "CC0",
    "Other",
];

#[derive(Debug, Deserialize)]
struct LicenseList {
    licenses: Vec<LicenseEntry>,
}

#[derive(Debug, Deserialize)]
struct LicenseEntry {
    #[serde(rename = "licenseId", default)]
    license_id: Option<String>,
}

/// Loaded license identifiers, or the reason they are unavailable
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
    spdx_ids: std::result::Result<HashSet<String>, String>,
}

impl LicenseCatalog {
    /// Load the SPDX list from disk
    ///
    /// Never fails: a missing or corrupt file is remembered and reported by
    /// every license check that needs it.
    pub fn from_path(path: &Path) -> Self {
        match read_license_file(path) {
            Ok(ids) => {
                debug!(count = ids.len(), path = %path.display(), "Loaded SPDX license list");
                Self { spdx_ids: Ok(ids) }
            }
            Err(e) => {
                warn!("License list unavailable at {}: {}", path.display(), e);
                Self {
                    spdx_ids: Err(e.to_string()),
                }
            }
        }
    }

    /// Parse an SPDX list from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self {
            spdx_ids: Ok(parse_license_json(json)?),
        })
    }

    /// Catalog from explicit identifiers
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            spdx_ids: Ok(ids.into_iter().map(|id| id.as_ref().to_lowercase()).collect()),
        }
    }

    /// Catalog whose SPDX list could not be loaded
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            spdx_ids: Err(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.spdx_ids.is_ok()
    }

    /// Check a license identifier against both sources
    pub fn validate(&self, license: &str) -> Verdict {
        let normalized = license.trim().to_lowercase();

        if LICENSE_OPTIONS.iter().any(|opt| opt.to_lowercase() == normalized) {
            return Verdict::pass("License is valid.");
        }

        match &self.spdx_ids {
            Ok(ids) if ids.contains(&normalized) => Verdict::pass("License is valid."),
            Ok(_) => Verdict::fail("Invalid License: license must be from the SPDX License List."),
            Err(reason) => Verdict::fail(format!("Error validating license: {}", reason)),
        }
    }
}

fn read_license_file(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)?;
    parse_license_json(&content)
}

fn parse_license_json(json: &str) -> Result<HashSet<String>> {
    let list: LicenseList = serde_json::from_str(json)?;
    let ids: HashSet<String> = list
        .licenses
        .into_iter()
        .filter_map(|entry| entry.license_id)
        .map(|id| id.to_lowercase())
        .collect();

    if ids.is_empty() {
        return Err(Error::InvalidInput("license list contains no licenseId entries".to_string()));
    }
    Ok(ids)
}
