//! Metadata engine
//!
//! Composes the registry, rule validator and quality scorer. Immutable after
//! construction and shared between sessions behind an `Arc`.

use crate::quality::{QualityScorer, TextAnalyzer};
use crate::registry::AttributeRegistry;
use crate::types::{CheckReport, IssueMap, MetadataRecord};
use crate::validators::{LicenseCatalog, RuleValidator};
use cmq_common::config::{resolve_license_list, TomlConfig};
use cmq_common::QualityThresholds;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Validation and quality checks over one registry
#[derive(Debug, Clone)]
pub struct MetadataEngine {
    validator: RuleValidator,
    scorer: QualityScorer,
}

impl MetadataEngine {
    pub fn new(
        registry: AttributeRegistry,
        licenses: LicenseCatalog,
        thresholds: QualityThresholds,
    ) -> Self {
        Self {
            validator: RuleValidator::new(registry.clone(), licenses),
            scorer: QualityScorer::with_thresholds(registry, thresholds),
        }
    }

    /// Build from configuration, resolving the license list location
    pub fn from_config(config: &TomlConfig) -> Self {
        Self::from_config_with_license_list(config, None)
    }

    /// Build from configuration with an explicit license list override
    pub fn from_config_with_license_list(config: &TomlConfig, license_list: Option<&Path>) -> Self {
        let path = resolve_license_list(license_list, config);
        let licenses = LicenseCatalog::from_path(&path);
        let registry = AttributeRegistry::new(config.registry_mode);

        info!(
            mode = ?config.registry_mode,
            licenses_loaded = licenses.is_loaded(),
            "Metadata engine ready"
        );

        Self::new(registry, licenses, config.quality.clone())
    }

    /// Replace the scorer's text analyzer
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.scorer = self.scorer.with_analyzer(analyzer);
        self
    }

    pub fn registry(&self) -> &AttributeRegistry {
        self.validator.registry()
    }

    pub fn validator(&self) -> &RuleValidator {
        &self.validator
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// Validate and score a single attribute value
    pub fn validate_and_score(&self, name: &str, value: &str) -> CheckReport {
        let mut errors = IssueMap::new();
        let mut issues = IssueMap::new();

        let verdict = self.validator.validate_attribute(name, value);
        if !verdict.ok {
            errors.insert(name.to_string(), verdict.message);
        }

        let verdict = self.scorer.check_attribute(name, value);
        if !verdict.ok {
            issues.insert(name.to_string(), verdict.message);
        }

        CheckReport::new(errors, issues)
    }

    /// Validate and score every attribute of a record
    pub fn validate_and_score_record(&self, record: &MetadataRecord) -> CheckReport {
        let report = CheckReport::new(
            self.validator.validate_all(record),
            self.scorer.check_all_attributes(record),
        );
        debug!(
            attributes = record.len(),
            errors = report.errors.len(),
            issues = report.issues.len(),
            "Record checked"
        );
        report
    }
}

impl Default for MetadataEngine {
    /// Croissant registry, default thresholds, no SPDX list
    fn default() -> Self {
        Self::new(
            AttributeRegistry::default(),
            LicenseCatalog::unavailable("no license list configured"),
            QualityThresholds::default(),
        )
    }
}
