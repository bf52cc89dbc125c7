//! Stage, workflow, and payment status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The status of a single workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage is not yet reachable because a predecessor has not completed.
    Blocked,
    /// Stage is reachable and waiting to be started.
    Pending,
    /// Stage is active and awaiting the legal entity's decision.
    InProgress,
    /// Stage is active but gated behind an unpaid fee.
    PaymentRequired,
    /// Stage fee has been paid; the entity's decision is still outstanding.
    PaymentCompleted,
    /// Stage was approved.
    Completed,
    /// Stage was rejected. Terminal for the whole workflow.
    Rejected,
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::Blocked
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::PaymentRequired => write!(f, "payment_required"),
            Self::PaymentCompleted => write!(f, "payment_completed"),
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status represents a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Returns true if the stage currently holds the workflow's attention.
    ///
    /// At most one stage per workflow may be active at a time.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::InProgress | Self::PaymentRequired | Self::PaymentCompleted
        )
    }

    /// Returns true if a legal entity may approve or reject the stage.
    ///
    /// `Pending` is decidable: a no-fee stage never passes through
    /// `InProgress`, which is reserved for stages unlocked by payment.
    #[must_use]
    pub fn is_decidable(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::PaymentCompleted)
    }
}

/// The payment state of a fee-bearing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The fee has not been paid yet.
    Pending,
    /// The fee was paid.
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The aggregate status of an envelope's workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Built but not yet started.
    NotStarted,
    /// At least one stage is active or reachable.
    InProgress,
    /// Every stage completed.
    Completed,
    /// Some stage was rejected.
    Rejected,
}

impl Default for WorkflowStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl WorkflowStatus {
    /// Returns true if no further transition may occur.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Blocked.to_string(), "blocked");
        assert_eq!(StageStatus::PaymentRequired.to_string(), "payment_required");
        assert_eq!(StageStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_stage_status_is_terminal() {
        assert!(StageStatus::Completed.is_terminal());
        assert!(StageStatus::Rejected.is_terminal());
        assert!(!StageStatus::InProgress.is_terminal());
        assert!(!StageStatus::Blocked.is_terminal());
    }

    #[test]
    fn test_stage_status_is_active() {
        assert!(StageStatus::InProgress.is_active());
        assert!(StageStatus::PaymentRequired.is_active());
        assert!(StageStatus::PaymentCompleted.is_active());
        assert!(!StageStatus::Pending.is_active());
        assert!(!StageStatus::Completed.is_active());
    }

    #[test]
    fn test_stage_status_is_decidable() {
        assert!(StageStatus::Pending.is_decidable());
        assert!(StageStatus::InProgress.is_decidable());
        assert!(StageStatus::PaymentCompleted.is_decidable());
        assert!(!StageStatus::PaymentRequired.is_decidable());
        assert!(!StageStatus::Blocked.is_decidable());
    }

    #[test]
    fn test_workflow_status_is_terminal() {
        assert!(WorkflowStatus::Completed.is_terminal());
        assert!(WorkflowStatus::Rejected.is_terminal());
        assert!(!WorkflowStatus::InProgress.is_terminal());
        assert!(!WorkflowStatus::NotStarted.is_terminal());
    }

    #[test]
    fn test_stage_status_serialize() {
        let status = StageStatus::PaymentCompleted;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#""payment_completed""#);

        let deserialized: StageStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, StageStatus::PaymentCompleted);
    }

    #[test]
    fn test_workflow_status_serialize() {
        let status = WorkflowStatus::NotStarted;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#""not_started""#);
    }
}
