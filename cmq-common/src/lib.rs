//! # CMQ Common Library
//!
//! Shared code for the Croissant metadata quality workspace:
//! - Error and result types
//! - TOML configuration loading with graceful degradation
//! - Quality threshold definitions
//! - Reference-file path resolution
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use config::{QualityThresholds, TomlConfig};
pub use error::{Error, Result};
