//! Test helpers shared by the cmq-engine integration tests

#![allow(dead_code)]

pub mod log_capture;

use cmq_engine::MetadataRecord;
use std::path::PathBuf;
use tempfile::TempDir;

pub use log_capture::{capture_logs, LogCapture};

pub const RICH_DESCRIPTION: &str = "This dataset contains thousands of annotated photographs \
    showing domestic cats in natural home environments. Each image was labeled by three \
    independent annotators, and disagreements were resolved through careful discussion.";

pub const CITATION: &str = "@misc{cats2023, author = {Ada Lovelace}, title = {Domestic Cats}, year = 2023}";

/// Record that passes every validation and quality check
pub fn clean_record() -> MetadataRecord {
    record(&[
        ("name", "Domestic Cats"),
        ("creators", "Ada Lovelace, Grace Hopper"),
        ("description", RICH_DESCRIPTION),
        ("license", "MIT"),
        ("url", "https://example.com/cats"),
        ("publisher", "Example Lab"),
        ("version", "1.0"),
        ("keywords", "cats, images, vision"),
        ("date_modified", "2023-03-01"),
        ("date_created", "2023-01-01"),
        ("date_published", "2023-02-01"),
        ("cite_as", CITATION),
        ("in_language", "en, fr"),
        ("task", "image classification"),
        ("modality", "image"),
    ])
}

pub fn record(pairs: &[(&str, &str)]) -> MetadataRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Write an SPDX-shaped license list into a fresh temp dir
pub fn license_list(ids: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("licenses.json");
    let entries: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "licenseId": id, "name": id }))
        .collect();
    std::fs::write(&path, serde_json::json!({ "licenses": entries }).to_string()).unwrap();
    (dir, path)
}
