//! Metadata collection workflow
//!
//! A [`MetadataSession`] owns one working record and drives the per-attribute
//! acceptance cycle:
//!
//! ```text
//! Idle --select--> AwaitingValue --submit(ok)--> Idle
//!                       |
//!                  submit(issues)
//!                       v
//!               AwaitingWithIssues --"confirm"--> Idle   (not for dates)
//!                       |
//!                  submit(value) / abandon
//! ```
//!
//! Values accepted despite issues are kept in a confirmed overlay and merged
//! into the record at finalisation.

pub mod session;

pub use session::MetadataSession;

use crate::registry::Attribute;
use crate::types::CheckReport;
use thiserror::Error;

/// Workflow misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Invalid attribute name: {0}")]
    UnknownAttribute(String),

    #[error("No attribute is awaiting a value")]
    NoPendingAttribute,

    #[error("No value is staged for confirmation")]
    NothingStaged,

    #[error("The confirm option is not available for the `{0}` attribute. Please provide a valid date in the correct format (YYYY-MM-DD).")]
    ConfirmNotAllowed(String),
}

/// Where the acceptance cycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingState {
    #[default]
    Idle,
    /// Attribute selected, no value submitted yet
    AwaitingValue(Attribute),
    /// A submitted value had problems and is staged
    AwaitingWithIssues(Attribute),
}

impl PendingState {
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            PendingState::Idle => None,
            PendingState::AwaitingValue(a) | PendingState::AwaitingWithIssues(a) => Some(*a),
        }
    }
}

/// Result of submitting user input for the pending attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Value passed every check and was committed
    Accepted { attribute: Attribute },
    /// Value was staged; the report explains what is wrong
    NeedsAttention {
        attribute: Attribute,
        report: CheckReport,
    },
    /// Staged value accepted despite its issues
    Confirmed { attribute: Attribute, value: String },
    /// "confirm" is not available for this attribute; still pending
    ConfirmRefused { attribute: Attribute, message: String },
}

/// Result of finalising a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Every attribute passed
    Ready,
    /// Remaining problems are all on user-confirmed attributes
    ReadyWithOverrides { confirmed: Vec<String> },
    /// Problems remain that were not confirmed
    Blocked(CheckReport),
}

impl FinalizeOutcome {
    pub fn is_ready(&self) -> bool {
        !matches!(self, FinalizeOutcome::Blocked(_))
    }
}
