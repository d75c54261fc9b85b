//! Engine construction and record-level checks
//!
//! Tests that resolve the license list through configuration are marked
//! #[serial] because `CMQ_LICENSE_LIST` is process-wide.

mod helpers;

use cmq_common::config::{TomlConfig, LICENSE_LIST_ENV_VAR};
use cmq_engine::{Attribute, MetadataEngine};
use helpers::{capture_logs, clean_record, license_list, record};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::path::Path;

// ============================================================================
// License list loading
// ============================================================================

#[test]
#[serial]
fn test_license_list_from_explicit_path() {
    let (_dir, path) = license_list(&["BSD-3-Clause", "Apache-2.0"]);
    let engine = MetadataEngine::from_config_with_license_list(&TomlConfig::default(), Some(&path));

    assert!(engine.validator().licenses().is_loaded());
    assert!(engine.validate_and_score("license", "bsd-3-clause").ok());
    assert_eq!(
        engine.validate_and_score("license", "Beerware").error_text(),
        "license: Invalid License: license must be from the SPDX License List."
    );
}

#[test]
#[serial]
fn test_license_list_from_toml() {
    std::env::remove_var(LICENSE_LIST_ENV_VAR);
    let (_dir, path) = license_list(&["Zlib"]);
    let config = TomlConfig {
        license_list: Some(path),
        ..Default::default()
    };

    let engine = MetadataEngine::from_config(&config);
    assert!(engine.validate_and_score("license", "zlib").ok());
}

#[test]
#[serial]
fn test_env_license_list_beats_toml() {
    let (_env_dir, env_path) = license_list(&["Unlicense"]);
    let (_toml_dir, toml_path) = license_list(&["Zlib"]);
    std::env::set_var(LICENSE_LIST_ENV_VAR, &env_path);

    let config = TomlConfig {
        license_list: Some(toml_path),
        ..Default::default()
    };
    let engine = MetadataEngine::from_config(&config);
    std::env::remove_var(LICENSE_LIST_ENV_VAR);

    assert!(engine.validate_and_score("license", "Unlicense").ok());
    assert!(!engine.validate_and_score("license", "Zlib").ok());
}

#[test]
#[serial]
fn test_missing_license_list_degrades_with_warning() {
    let missing = Path::new("/nonexistent/cmq/licenses.json");
    let (engine, logs) = capture_logs(|| {
        MetadataEngine::from_config_with_license_list(&TomlConfig::default(), Some(missing))
    });

    logs.assert_warned("License list unavailable");
    assert!(!engine.validator().licenses().is_loaded());

    // Allow-listed values still pass, everything else names the cause
    assert!(engine.validate_and_score("license", "cc-by-sa").ok());
    let report = engine.validate_and_score("license", "BSD-3-Clause");
    assert!(report.errors["license"].starts_with("Error validating license:"));

    // Other attributes are unaffected
    assert!(engine.validate_and_score_record(&clean_record()).ok());
}

#[test]
#[serial]
fn test_corrupt_license_list_degrades() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("licenses.json");
    std::fs::write(&path, "{ not json").unwrap();

    let (engine, logs) = capture_logs(|| {
        MetadataEngine::from_config_with_license_list(&TomlConfig::default(), Some(&path))
    });
    logs.assert_warned("License list unavailable");
    assert!(!engine.validate_and_score("license", "Zlib").ok());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
#[serial]
fn test_legacy_mode_from_toml() {
    let config = TomlConfig::from_toml_str("registry_mode = \"legacy\"\n").unwrap();
    let engine = MetadataEngine::from_config_with_license_list(
        &config,
        Some(Path::new("/nonexistent/licenses.json")),
    );

    assert_eq!(engine.registry().all_attributes().len(), 17);
    assert!(engine.validate_and_score("year", "2001").ok());
    assert_eq!(
        engine.validate_and_score("year", "soon").error_text(),
        "year: Year must be a valid number."
    );
    assert_eq!(
        engine.validate_and_score("title", "Cats").issue_text(),
        "title: The title is too short to convey meaningful information."
    );
    assert!(!engine.validate_and_score("creators", "Ada").ok());
}

#[test]
#[serial]
fn test_thresholds_from_toml() {
    let config = TomlConfig::from_toml_str(
        "[quality]\nmin_keywords = 2\nkeyword_uniqueness_threshold = 0.5\n",
    )
    .unwrap();
    let engine = MetadataEngine::from_config_with_license_list(
        &config,
        Some(Path::new("/nonexistent/licenses.json")),
    );

    assert!(engine.validate_and_score("keywords", "ml, vision").ok());
    assert!(engine.validate_and_score("keywords", "ml, ml").ok());
    assert!(!engine.validate_and_score("keywords", "ml").ok());
}

// ============================================================================
// Record checks
// ============================================================================

#[test]
fn test_clean_record_has_no_findings() {
    let report = MetadataEngine::default().validate_and_score_record(&clean_record());
    assert!(report.ok(), "unexpected findings: {:?}", report);
}

#[test]
fn test_record_findings_are_scoped_per_attribute() {
    let mut rec = clean_record();
    rec.insert("url".into(), "example.com".into());
    rec.insert("date_published".into(), "2023-02-30".into());
    rec.insert("keywords".into(), "ml, ml, ml".into());
    rec.insert("in_language".into(), "en, xx-notalang".into());

    let report = MetadataEngine::default().validate_and_score_record(&rec);

    assert_eq!(
        report.error_text(),
        "date_published: Date published must be in the format YYYY-MM-DD.\n\
         in_language: The following languages are invalid: xx-notalang\n\
         url: Invalid URL format."
    );
    assert_eq!(
        report.issue_text(),
        "keywords: Keywords should not have any repeated words."
    );
    assert_eq!(
        report.flagged_attributes(),
        vec!["date_published", "in_language", "keywords", "url"]
    );
}

#[test]
fn test_repetitive_description_in_record() {
    let rec = record(&[("description", "data data data data data")]);
    let report = MetadataEngine::default().validate_and_score_record(&rec);

    assert!(report.errors.is_empty());
    assert_eq!(
        report.issues["description"],
        "The description lacks lexical diversity and may be repetitive. \
         The description has limited sentence variety and may be monotonous."
    );
}

#[test]
fn test_list_attributes_ignore_blank_tokens() {
    let engine = MetadataEngine::default();
    for attribute in [Attribute::Creators, Attribute::Task, Attribute::Modality] {
        let spaced = engine.validate_and_score(attribute.as_str(), "a, ,b");
        let plain = engine.validate_and_score(attribute.as_str(), "a, b");
        assert_eq!(spaced, plain);
        assert!(spaced.ok());
    }
}

#[test]
fn test_dates_strict() {
    let engine = MetadataEngine::default();
    assert!(engine.validate_and_score("date_created", "2024-02-29").ok());
    for bad in ["2023-02-30", "2023-13-01", "Jan 1 2023", "2023-1-01", ""] {
        assert!(
            !engine.validate_and_score("date_created", bad).ok(),
            "accepted {:?}",
            bad
        );
    }
}

#[test]
fn test_citation_with_contact_address() {
    let cite = format!("{}\nContact: ada@example.org", helpers::CITATION);
    let report = MetadataEngine::default().validate_and_score("cite_as", &cite);
    assert!(report.ok(), "unexpected findings: {:?}", report);
}
