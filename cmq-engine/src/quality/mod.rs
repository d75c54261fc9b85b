//! Quality Scorer
//!
//! Judges whether well-formed values are also substantive. Only free-text
//! attributes carry real checks; every other known attribute is accepted as
//! is.
//!
//! # Checks
//! - **description**: lexical diversity (MATTR over whitespace words) and
//!   sentence variety (distinct part-of-speech signatures)
//! - **keywords**: minimum count and uniqueness ratio
//! - **title** (legacy registry): minimum word count
//!
//! # Example
//! ```rust
//! use cmq_engine::quality::QualityScorer;
//! use cmq_engine::registry::AttributeRegistry;
//!
//! let scorer = QualityScorer::new(AttributeRegistry::croissant());
//! let verdict = scorer.check_attribute("keywords", "ml, ml, ml");
//! assert!(!verdict.ok);
//! assert_eq!(verdict.message, "Keywords should not have any repeated words.");
//! ```

pub mod analyzer;
pub mod mattr;
pub mod tagger;

pub use analyzer::{AnalysisError, HeuristicAnalyzer, TextAnalyzer};
pub use tagger::PosTag;

use crate::registry::{Attribute, AttributeRegistry};
use crate::types::{IssueMap, MetadataRecord, Verdict};
use cmq_common::QualityThresholds;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

const LOW_DIVERSITY: &str = "The description lacks lexical diversity and may be repetitive.";
const LOW_VARIETY: &str = "The description has limited sentence variety and may be monotonous.";

/// Measurements behind a description verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionScore {
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Moving-average type-token ratio (0.0 for texts within one window)
    pub mattr: f64,
    /// Number of sentences found
    pub sentence_count: usize,
    /// Number of distinct sentence signatures
    pub sentence_variety: usize,
}

/// Heuristic quality scorer for free-text attributes
#[derive(Clone)]
pub struct QualityScorer {
    registry: AttributeRegistry,
    thresholds: QualityThresholds,
    analyzer: Arc<dyn TextAnalyzer>,
}

impl QualityScorer {
    /// Scorer with default thresholds and the built-in analyzer
    pub fn new(registry: AttributeRegistry) -> Self {
        Self::with_thresholds(registry, QualityThresholds::default())
    }

    /// Scorer with custom thresholds
    pub fn with_thresholds(registry: AttributeRegistry, thresholds: QualityThresholds) -> Self {
        Self {
            registry,
            thresholds,
            analyzer: Arc::new(HeuristicAnalyzer::new()),
        }
    }

    /// Replace the text analyzer
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Quality verdict for one attribute value
    pub fn check_attribute(&self, name: &str, value: &str) -> Verdict {
        let Some(attribute) = self.registry.parse(name) else {
            debug!(attribute = name, "Rejected unknown attribute");
            return Verdict::fail(format!("Invalid attribute name: {}", name));
        };

        let verdict = match attribute {
            Attribute::Description => self.check_description(value),
            Attribute::Keywords => self.check_keywords(value),
            Attribute::Title => self.check_title(value),
            _ => Verdict::pass("Attribute quality is acceptable."),
        };

        debug!(attribute = name, ok = verdict.ok, "Quality check complete");
        verdict
    }

    /// Check every attribute of a record, keeping issues only
    pub fn check_all_attributes(&self, record: &MetadataRecord) -> IssueMap {
        record
            .iter()
            .filter_map(|(name, value)| {
                let verdict = self.check_attribute(name, value);
                (!verdict.ok).then(|| (name.clone(), verdict.message))
            })
            .collect()
    }

    /// Lexical diversity and sentence variety of a description
    pub fn check_description(&self, text: &str) -> Verdict {
        let score = match self.score_description(text) {
            Ok(score) => score,
            Err(e) => {
                warn!("Sentence variety calculation failed: {}", e);
                return Verdict::fail(format!("Error in sentence variety calculation: {}", e));
            }
        };

        debug!(
            words = score.word_count,
            mattr = score.mattr,
            sentences = score.sentence_count,
            variety = score.sentence_variety,
            "Description scored"
        );

        let mut problems = Vec::new();
        if score.mattr < self.thresholds.lexical_diversity_threshold {
            problems.push(LOW_DIVERSITY);
        }
        if score.sentence_variety < self.thresholds.sentence_variety_threshold {
            problems.push(LOW_VARIETY);
        }

        if problems.is_empty() {
            Verdict::pass("Description quality is acceptable.")
        } else {
            Verdict::fail(problems.join(" "))
        }
    }

    /// Raw measurements for a description
    pub fn score_description(&self, text: &str) -> Result<DescriptionScore, AnalysisError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mattr = mattr::mattr(&words, self.thresholds.mattr_window);

        let sentences = self.analyzer.sentences(text)?;
        let mut signatures: HashSet<Vec<PosTag>> = HashSet::new();
        for sentence in &sentences {
            signatures.insert(self.analyzer.signature(sentence)?);
        }

        Ok(DescriptionScore {
            word_count: words.len(),
            mattr,
            sentence_count: sentences.len(),
            sentence_variety: signatures.len(),
        })
    }

    /// Keyword count and uniqueness
    pub fn check_keywords(&self, value: &str) -> Verdict {
        let keywords: Vec<String> = value
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.len() < self.thresholds.min_keywords {
            return Verdict::fail(format!(
                "Please provide at least {} keywords.",
                self.thresholds.min_keywords
            ));
        }

        let unique: HashSet<&str> = keywords.iter().map(String::as_str).collect();
        let ratio = unique.len() as f64 / keywords.len() as f64;
        debug!(total = keywords.len(), unique = unique.len(), ratio, "Keywords scored");

        if ratio < self.thresholds.keyword_uniqueness_threshold {
            Verdict::fail("Keywords should not have any repeated words.")
        } else {
            Verdict::pass("Keywords quality is acceptable.")
        }
    }

    /// Minimum word count for titles
    pub fn check_title(&self, value: &str) -> Verdict {
        if value.split_whitespace().count() < self.thresholds.min_title_words {
            Verdict::fail("The title is too short to convey meaningful information.")
        } else {
            Verdict::pass("Title quality is acceptable.")
        }
    }
}

impl std::fmt::Debug for QualityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityScorer")
            .field("registry", &self.registry)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}
