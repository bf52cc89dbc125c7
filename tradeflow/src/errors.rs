//! Error types for the tradeflow engine.
//!
//! Validation and authorization failures are returned to callers as typed
//! errors. Every mutating operation is all-or-nothing: when any error is
//! returned, the persisted aggregate is exactly as it was before the call.

use crate::core::{EnvelopeId, Money, StageStatus};
use thiserror::Error;

/// The main error type for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A workflow was built from an empty document list.
    #[error("{0}")]
    EmptyWorkflow(#[from] EmptyWorkflowError),

    /// The caller acted on a stage that is no longer current.
    #[error("{0}")]
    Stale(#[from] StaleStageError),

    /// The actor lacks the capability for this stage.
    #[error("{0}")]
    NotAuthorized(#[from] NotAuthorizedError),

    /// The requested transition is not in the state-machine table.
    #[error("{0}")]
    InvalidTransition(#[from] InvalidTransitionError),

    /// A payment result does not match the stage's expected charge.
    #[error("{0}")]
    PaymentMismatch(#[from] PaymentMismatchError),

    /// Another writer saved the aggregate first; re-read and retry.
    #[error("{0}")]
    Conflict(#[from] VersionConflictError),

    /// No workflow exists for the envelope.
    #[error("no workflow found for envelope {envelope_id}")]
    NotFound {
        /// The envelope that was looked up.
        envelope_id: EnvelopeId,
    },

    /// The persistence layer failed; retry from a fresh read.
    #[error("store error: {0}")]
    Store(String),
}

impl WorkflowError {
    /// Returns true if the caller should re-read the aggregate and retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Stale(_) | Self::Conflict(_) | Self::Store(_))
    }
}

/// Error raised when a workflow would have zero stages.
#[derive(Debug, Clone, Error)]
#[error("cannot build workflow for envelope {envelope_id}: no required documents")]
pub struct EmptyWorkflowError {
    /// The envelope the workflow was built for.
    pub envelope_id: EnvelopeId,
}

/// Error raised when the caller's stage number is no longer the current one.
///
/// Recoverable: re-fetch the aggregate and act on the real current stage.
#[derive(Debug, Clone, Error)]
#[error(
    "stage {requested} of envelope {envelope_id} is not current (current stage is {current})"
)]
pub struct StaleStageError {
    /// The envelope acted on.
    pub envelope_id: EnvelopeId,
    /// The stage number the caller supplied.
    pub requested: u32,
    /// The workflow's actual current stage.
    pub current: u32,
}

/// Error raised when an actor fails the authorization gate.
#[derive(Debug, Clone, Error)]
#[error("actor {actor_id} may not act on stage {stage_number}")]
pub struct NotAuthorizedError {
    /// The actor that was refused.
    pub actor_id: String,
    /// The stage the actor tried to act on.
    pub stage_number: u32,
}

/// Error raised for a transition outside the state-machine table.
#[derive(Debug, Clone, Error)]
#[error("invalid transition: {message}")]
pub struct InvalidTransitionError {
    /// What was attempted and why it is off the table.
    pub message: String,
    /// The stage involved, when one is.
    pub stage_number: Option<u32>,
    /// The stage's status at the time of the attempt.
    pub status: Option<StageStatus>,
}

impl InvalidTransitionError {
    /// Creates a new invalid-transition error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stage_number: None,
            status: None,
        }
    }

    /// Records the stage the attempt targeted.
    #[must_use]
    pub fn with_stage(mut self, stage_number: u32, status: StageStatus) -> Self {
        self.stage_number = Some(stage_number);
        self.status = Some(status);
        self
    }
}

/// Error raised when a payment result does not match the expected charge.
///
/// The attempt is discarded without mutating the aggregate.
#[derive(Debug, Clone, Error)]
#[error("payment for stage {stage_number} expected {expected}, got {actual}")]
pub struct PaymentMismatchError {
    /// The fee-bearing stage.
    pub stage_number: u32,
    /// The charge the stage expects.
    pub expected: Money,
    /// The amount the provider reported.
    pub actual: Money,
}

/// Error raised when an optimistic save loses the race for an envelope.
#[derive(Debug, Clone, Error)]
#[error(
    "version conflict for envelope {envelope_id}: expected {expected}, store has {found}"
)]
pub struct VersionConflictError {
    /// The envelope being saved.
    pub envelope_id: EnvelopeId,
    /// The version the writer read.
    pub expected: u64,
    /// The version the store holds.
    pub found: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_stage_message() {
        let envelope_id = EnvelopeId::new();
        let err = StaleStageError {
            envelope_id,
            requested: 1,
            current: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("stage 1"));
        assert!(msg.contains("current stage is 2"));
    }

    #[test]
    fn test_invalid_transition_builder() {
        let err = InvalidTransitionError::new("cannot reject a completed stage")
            .with_stage(3, StageStatus::Completed);
        assert_eq!(err.stage_number, Some(3));
        assert_eq!(err.status, Some(StageStatus::Completed));
    }

    #[test]
    fn test_retryable_classification() {
        let envelope_id = EnvelopeId::new();
        let stale: WorkflowError = StaleStageError {
            envelope_id,
            requested: 1,
            current: 2,
        }
        .into();
        assert!(stale.is_retryable());

        let not_authorized: WorkflowError = NotAuthorizedError {
            actor_id: "user-1".to_string(),
            stage_number: 1,
        }
        .into();
        assert!(!not_authorized.is_retryable());
    }

    #[test]
    fn test_payment_mismatch_message() {
        let err = PaymentMismatchError {
            stage_number: 2,
            expected: Money::new(5000, "EGP"),
            actual: Money::new(5000, "USD"),
        };
        assert!(err.to_string().contains("5000 EGP"));
        assert!(err.to_string().contains("5000 USD"));
    }
}
