//! cmq-engine: Croissant metadata validation and quality assessment
//!
//! Checks dataset-description metadata attribute by attribute:
//! - **validators**: is each value well-formed (dates, URLs, licenses,
//!   languages, BibTeX, comma lists)?
//! - **quality**: is each free-text value substantive (lexical diversity,
//!   sentence variety, keyword count and uniqueness)?
//! - **workflow**: per-conversation record with staging, confirmation and
//!   finalisation
//!
//! # Example
//! ```rust
//! use cmq_engine::{MetadataEngine, MetadataSession, SubmitOutcome};
//! use std::sync::Arc;
//!
//! let engine = Arc::new(MetadataEngine::default());
//! let mut session = MetadataSession::new(engine);
//!
//! session.select_attribute("url").unwrap();
//! let outcome = session.submit("https://example.com/cats").unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
//! ```

pub mod engine;
pub mod quality;
pub mod registry;
pub mod types;
pub mod validators;
pub mod workflow;

pub use engine::MetadataEngine;
pub use quality::QualityScorer;
pub use registry::{Attribute, AttributeRegistry};
pub use types::{CheckReport, IssueMap, MetadataRecord, Verdict};
pub use validators::RuleValidator;
pub use workflow::{FinalizeOutcome, MetadataSession, PendingState, SubmitOutcome, WorkflowError};
