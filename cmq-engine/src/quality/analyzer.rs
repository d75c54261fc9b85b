//! Text analysis seam for the quality scorer
//!
//! The scorer needs three things from a language pipeline: sentence
//! segmentation, tokenization and coarse part-of-speech tags. Any pipeline
//! implementing [`TextAnalyzer`] can be plugged in; [`HeuristicAnalyzer`] is
//! the built-in one.

use super::tagger::{tag_tokens, PosTag};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Text analysis failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    #[error("tagging failed: {0}")]
    Tagging(String),

    #[error("analyzer unavailable: {0}")]
    Unavailable(String),
}

/// Sentence segmentation, tokenization and tagging
pub trait TextAnalyzer: Send + Sync {
    fn sentences(&self, text: &str) -> Result<Vec<String>, AnalysisError>;

    fn tokens(&self, sentence: &str) -> Result<Vec<String>, AnalysisError>;

    /// One tag per token
    fn tags(&self, tokens: &[String]) -> Result<Vec<PosTag>, AnalysisError>;

    /// Tag sequence describing the structure of one sentence
    fn signature(&self, sentence: &str) -> Result<Vec<PosTag>, AnalysisError> {
        let tokens = self.tokens(sentence)?;
        let tags = self.tags(&tokens)?;
        if tags.len() != tokens.len() {
            return Err(AnalysisError::Tagging(format!(
                "{} tags for {} tokens",
                tags.len(),
                tokens.len()
            )));
        }
        Ok(tags)
    }
}

/// Unicode segmentation plus a lexicon tagger
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl TextAnalyzer for HeuristicAnalyzer {
    fn sentences(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    fn tokens(&self, sentence: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(sentence
            .split_word_bounds()
            .filter(|t| !t.trim().is_empty())
            .map(String::from)
            .collect())
    }

    fn tags(&self, tokens: &[String]) -> Result<Vec<PosTag>, AnalysisError> {
        Ok(tag_tokens(tokens))
    }
}
