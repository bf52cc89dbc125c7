//! A single review stage in the envelope pipeline.

use super::document::RequiredDocument;
use super::identity::{DocumentId, EntityId};
use super::money::Money;
use super::status::{PaymentStatus, StageStatus};
use crate::utils::Timestamp;
use serde::{Deserialize, Serialize};

/// One legal entity's review step for one required document, at a fixed
/// position in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStage {
    /// 1-based position; stage numbers are contiguous within a workflow.
    pub stage_number: u32,
    /// The document under review.
    pub document_id: DocumentId,
    /// The entity that decides this stage.
    pub legal_entity_id: EntityId,
    /// Display name of the deciding entity.
    pub legal_entity_name: String,
    /// Current stage status.
    pub status: StageStatus,
    /// True for the single stage eligible for action while the workflow is
    /// active; false everywhere once the workflow completes.
    pub is_current: bool,
    /// Whether this stage charges a review fee.
    pub payment_required: bool,
    /// The fee amount, when one is charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<Money>,
    /// Payment progress, when a fee is charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// Why the stage was rejected, set only when `status` is `Rejected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// When the stage was approved, set only on the `Completed` transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl WorkflowStage {
    /// Creates the stage for a required document at the given position.
    ///
    /// The first stage enters its reachable status immediately; every later
    /// stage starts `Blocked` regardless of fee. The fee is recorded either
    /// way so unblocking can derive the right status later.
    #[must_use]
    pub fn from_document(stage_number: u32, document: &RequiredDocument) -> Self {
        let fee = document.chargeable_fee().cloned();
        let payment_required = fee.is_some();
        let status = if stage_number == 1 {
            Self::entry_status_for(payment_required)
        } else {
            StageStatus::Blocked
        };

        Self {
            stage_number,
            document_id: document.id.clone(),
            legal_entity_id: document.legal_entity_id.clone(),
            legal_entity_name: document.legal_entity_name.clone(),
            status,
            is_current: stage_number == 1,
            payment_required,
            payment_status: fee.as_ref().map(|_| PaymentStatus::Pending),
            payment_amount: fee,
            rejection_reason: None,
            completed_at: None,
        }
    }

    /// The status a stage takes when it becomes reachable.
    #[must_use]
    pub fn entry_status(&self) -> StageStatus {
        Self::entry_status_for(self.payment_required)
    }

    fn entry_status_for(payment_required: bool) -> StageStatus {
        if payment_required {
            StageStatus::PaymentRequired
        } else {
            StageStatus::Pending
        }
    }

    /// Returns true if the fee for this stage has been collected.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == Some(PaymentStatus::Completed)
    }
}
