//! Per-conversation metadata state

use super::{FinalizeOutcome, PendingState, SubmitOutcome, WorkflowError};
use crate::engine::MetadataEngine;
use crate::registry::Attribute;
use crate::types::{CheckReport, MetadataRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Keyword that accepts a staged value despite its issues
const CONFIRM_KEYWORD: &str = "confirm";

/// Working record, confirmed overlay and staging slot for one conversation
#[derive(Debug, Clone)]
pub struct MetadataSession {
    engine: Arc<MetadataEngine>,
    record: MetadataRecord,
    confirmed: MetadataRecord,
    staged: Option<(String, String)>,
    state: PendingState,
}

impl MetadataSession {
    pub fn new(engine: Arc<MetadataEngine>) -> Self {
        Self {
            engine,
            record: MetadataRecord::new(),
            confirmed: MetadataRecord::new(),
            staged: None,
            state: PendingState::Idle,
        }
    }

    pub fn engine(&self) -> &MetadataEngine {
        &self.engine
    }

    fn attribute(&self, name: &str) -> Result<Attribute, WorkflowError> {
        self.engine
            .registry()
            .parse(name)
            .ok_or_else(|| WorkflowError::UnknownAttribute(name.to_string()))
    }

    // ------------------------------------------------------------------------
    // Record access
    // ------------------------------------------------------------------------

    /// Set an attribute value directly
    ///
    /// A previous confirmation of the same attribute no longer applies.
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), WorkflowError> {
        let attribute = self.attribute(name)?;
        self.confirmed.remove(attribute.as_str());
        self.record
            .insert(attribute.as_str().to_string(), value.to_string());
        Ok(())
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.record.get(name).map(String::as_str)
    }

    /// Bulk-apply values from an external lookup
    ///
    /// Known attributes are applied; the names of ignored unknown keys are
    /// returned.
    pub fn update(&mut self, values: &MetadataRecord) -> Vec<String> {
        let mut ignored = Vec::new();
        for (name, value) in values {
            if self.set_value(name, value).is_err() {
                ignored.push(name.clone());
            }
        }
        if !ignored.is_empty() {
            debug!(?ignored, "Ignored unknown attributes in update");
        }
        ignored
    }

    pub fn record(&self) -> &MetadataRecord {
        &self.record
    }

    /// Values accepted despite issues, not yet merged
    pub fn confirmed(&self) -> &MetadataRecord {
        &self.confirmed
    }

    /// Record as a flat JSON object of strings
    pub fn to_json(&self) -> cmq_common::Result<String> {
        Ok(serde_json::to_string_pretty(&self.record)?)
    }

    // ------------------------------------------------------------------------
    // Staging
    // ------------------------------------------------------------------------

    pub fn stage_value(&mut self, name: &str, value: &str) -> Result<(), WorkflowError> {
        let attribute = self.attribute(name)?;
        self.staged = Some((attribute.as_str().to_string(), value.to_string()));
        Ok(())
    }

    pub fn get_staged(&self) -> Option<(&str, &str)> {
        self.staged
            .as_ref()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn clear_staged(&mut self) {
        self.staged = None;
    }

    /// Accept the staged value into the record and the confirmed overlay
    ///
    /// Dates can never be confirmed; the staged value is kept.
    pub fn confirm_staged(&mut self) -> Result<(Attribute, String), WorkflowError> {
        let (name, value) = self.staged.clone().ok_or(WorkflowError::NothingStaged)?;
        let attribute = self.attribute(&name)?;

        if attribute.is_date() {
            return Err(WorkflowError::ConfirmNotAllowed(name));
        }

        self.record.insert(name.clone(), value.clone());
        self.confirmed.insert(name, value.clone());
        self.staged = None;
        self.state = PendingState::Idle;

        info!(attribute = %attribute, "Value confirmed despite issues");
        Ok((attribute, value))
    }

    /// Copy the overlay into the record and clear it
    ///
    /// Returns the merged attribute names.
    pub fn merge_confirmed(&mut self) -> Vec<String> {
        let merged: Vec<String> = self.confirmed.keys().cloned().collect();
        self.record.append(&mut self.confirmed);
        merged
    }

    // ------------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------------

    pub fn validate_and_score(&self, name: &str, value: &str) -> CheckReport {
        self.engine.validate_and_score(name, value)
    }

    pub fn validate_and_score_all(&self) -> CheckReport {
        self.engine.validate_and_score_record(&self.record)
    }

    /// Registry attributes with no record entry, in display order
    ///
    /// Presence only: a blank value counts as present and is left to
    /// validation.
    pub fn missing_attributes(&self) -> Vec<Attribute> {
        self.engine
            .registry()
            .all_attributes()
            .iter()
            .filter(|a| !self.record.contains_key(a.as_str()))
            .copied()
            .collect()
    }

    /// Every registry attribute has a record entry
    pub fn is_complete(&self) -> bool {
        self.engine
            .registry()
            .all_attributes()
            .iter()
            .all(|a| self.record.contains_key(a.as_str()))
    }

    /// Drop all values, confirmations and pending state
    pub fn reset(&mut self) {
        self.record.clear();
        self.confirmed.clear();
        self.staged = None;
        self.state = PendingState::Idle;
        debug!("Session reset");
    }

    // ------------------------------------------------------------------------
    // Acceptance cycle
    // ------------------------------------------------------------------------

    pub fn state(&self) -> PendingState {
        self.state
    }

    pub fn pending_attribute(&self) -> Option<Attribute> {
        self.state.attribute()
    }

    /// Start collecting a value for `name`
    pub fn select_attribute(&mut self, name: &str) -> Result<Attribute, WorkflowError> {
        let attribute = self.attribute(name)?;
        self.staged = None;
        self.state = PendingState::AwaitingValue(attribute);
        debug!(attribute = %attribute, "Attribute selected");
        Ok(attribute)
    }

    /// Handle user input for the pending attribute
    ///
    /// Input equal to "confirm" (any case, surrounding whitespace ignored)
    /// accepts the staged value when the previous submission had issues.
    /// Anything else is checked as a new value.
    pub fn submit(&mut self, input: &str) -> Result<SubmitOutcome, WorkflowError> {
        let attribute = self
            .pending_attribute()
            .ok_or(WorkflowError::NoPendingAttribute)?;

        let with_issues = matches!(self.state, PendingState::AwaitingWithIssues(_));
        if with_issues && input.trim().eq_ignore_ascii_case(CONFIRM_KEYWORD) {
            let staged_for_pending = self
                .staged
                .as_ref()
                .map_or(false, |(name, _)| name == attribute.as_str());
            if !staged_for_pending {
                return Err(WorkflowError::NothingStaged);
            }
            return match self.confirm_staged() {
                Ok((attribute, value)) => Ok(SubmitOutcome::Confirmed { attribute, value }),
                Err(e @ WorkflowError::ConfirmNotAllowed(_)) => Ok(SubmitOutcome::ConfirmRefused {
                    attribute,
                    message: e.to_string(),
                }),
                Err(e) => Err(e),
            };
        }

        let report = self.validate_and_score(attribute.as_str(), input);
        if report.ok() {
            self.set_value(attribute.as_str(), input)?;
            self.staged = None;
            self.state = PendingState::Idle;
            debug!(attribute = %attribute, "Value accepted");
            return Ok(SubmitOutcome::Accepted { attribute });
        }

        self.stage_value(attribute.as_str(), input)?;
        self.state = PendingState::AwaitingWithIssues(attribute);
        debug!(attribute = %attribute, "Value staged with issues");
        Ok(SubmitOutcome::NeedsAttention { attribute, report })
    }

    /// Give up on the pending attribute
    pub fn abandon(&mut self) {
        self.staged = None;
        self.state = PendingState::Idle;
    }

    /// Decide whether the record can be finalised
    ///
    /// Problems on confirmed attributes do not block. The overlay is merged
    /// and cleared whenever the record ends up ready.
    pub fn finalize(&mut self) -> FinalizeOutcome {
        let report = self.validate_and_score_all();
        if report.ok() {
            self.merge_confirmed();
            info!("Metadata ready");
            return FinalizeOutcome::Ready;
        }

        if self.confirmed.is_empty() {
            debug!(flagged = ?report.flagged_attributes(), "Finalisation blocked");
            return FinalizeOutcome::Blocked(report);
        }

        for (name, value) in &self.confirmed {
            self.record.insert(name.clone(), value.clone());
        }
        let remaining = self
            .validate_and_score_all()
            .without(self.confirmed.keys());

        if remaining.ok() {
            let confirmed = self.merge_confirmed();
            info!(?confirmed, "Metadata ready with confirmed overrides");
            FinalizeOutcome::ReadyWithOverrides { confirmed }
        } else {
            debug!(flagged = ?remaining.flagged_attributes(), "Finalisation blocked");
            FinalizeOutcome::Blocked(remaining)
        }
    }
}
