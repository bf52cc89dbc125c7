//! The envelope-scoped workflow aggregate.

use super::identity::{AcidNumber, EnvelopeId};
use super::stage::WorkflowStage;
use super::status::{StageStatus, WorkflowStatus};
use crate::errors::InvalidTransitionError;
use serde::{Deserialize, Serialize};

/// The ordered approval pipeline for one envelope.
///
/// Created once by the workflow builder and mutated only through the
/// engine's transition operations. Stage identities survive advancement;
/// the aggregate is never rebuilt mid-flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialWorkflowData {
    /// The envelope this workflow routes.
    pub envelope_id: EnvelopeId,
    /// Shipment-tracking identifier, carried for display and audit.
    pub acid_number: AcidNumber,
    /// Number of stages in the pipeline.
    pub total_stages: u32,
    /// 1-based number of the stage currently eligible for action.
    pub current_stage: u32,
    /// Aggregate status.
    pub workflow_status: WorkflowStatus,
    /// The stages, ordered by `stage_number`.
    pub stages: Vec<WorkflowStage>,
}

impl SequentialWorkflowData {
    /// Returns the stage marked current, if the workflow still has one.
    #[must_use]
    pub fn current(&self) -> Option<&WorkflowStage> {
        self.stages.iter().find(|stage| stage.is_current)
    }

    /// Returns the stage with the given 1-based number.
    #[must_use]
    pub fn stage(&self, stage_number: u32) -> Option<&WorkflowStage> {
        self.stages
            .iter()
            .find(|stage| stage.stage_number == stage_number)
    }

    /// Mutable access to a stage, for the engine's transition functions.
    pub(crate) fn stage_mut(&mut self, stage_number: u32) -> Option<&mut WorkflowStage> {
        self.stages
            .iter_mut()
            .find(|stage| stage.stage_number == stage_number)
    }

    /// Returns true if the stage may be acted on next: it is stage 1, or its
    /// predecessor has completed. Derived, never stored.
    #[must_use]
    pub fn can_start(&self, stage_number: u32) -> bool {
        if stage_number == 1 {
            return self.stage(1).is_some();
        }
        self.stage(stage_number).is_some()
            && self
                .stage(stage_number - 1)
                .is_some_and(|previous| previous.status == StageStatus::Completed)
    }

    /// Returns true once `start_workflow` has run and no terminal state has
    /// been reached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.workflow_status == WorkflowStatus::InProgress
    }

    /// Checks the structural invariants of the aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated invariant: stage numbers
    /// must be contiguous from 1, at most one stage may be active, and the
    /// number of current stages must fit the workflow status.
    pub fn validate(&self) -> Result<(), InvalidTransitionError> {
        if self.stages.len() != self.total_stages as usize {
            return Err(InvalidTransitionError::new(format!(
                "workflow lists {} stages but total_stages is {}",
                self.stages.len(),
                self.total_stages
            )));
        }

        for (index, stage) in self.stages.iter().enumerate() {
            let expected = index as u32 + 1;
            if stage.stage_number != expected {
                return Err(InvalidTransitionError::new(format!(
                    "stage numbers must be contiguous from 1, found {} at position {}",
                    stage.stage_number, expected
                )));
            }
        }

        let active = self
            .stages
            .iter()
            .filter(|stage| stage.status.is_active())
            .count();
        if active > 1 {
            return Err(InvalidTransitionError::new(format!(
                "{active} stages are active at once"
            )));
        }

        // A completed workflow has no current stage; a rejected one keeps
        // the pointer on the stage that died.
        let current = self.stages.iter().filter(|stage| stage.is_current).count();
        let expected = usize::from(self.workflow_status != WorkflowStatus::Completed);
        if current != expected {
            return Err(InvalidTransitionError::new(format!(
                "{current} stages marked current under status {}",
                self.workflow_status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::RequiredDocument;

    fn workflow_of(count: u32) -> SequentialWorkflowData {
        let stages = (1..=count)
            .map(|n| {
                let doc = RequiredDocument::new(
                    format!("doc-{n}"),
                    format!("Document {n}"),
                    format!("entity-{n}"),
                    format!("Entity {n}"),
                );
                WorkflowStage::from_document(n, &doc)
            })
            .collect();
        SequentialWorkflowData {
            envelope_id: EnvelopeId::new(),
            acid_number: AcidNumber::new("ACID-100"),
            total_stages: count,
            current_stage: 1,
            workflow_status: WorkflowStatus::NotStarted,
            stages,
        }
    }

    #[test]
    fn test_current_finds_marked_stage() {
        let workflow = workflow_of(3);
        assert_eq!(workflow.current().map(|s| s.stage_number), Some(1));
    }

    #[test]
    fn test_can_start_requires_completed_predecessor() {
        let mut workflow = workflow_of(3);
        assert!(workflow.can_start(1));
        assert!(!workflow.can_start(2));

        workflow.stage_mut(1).unwrap().status = StageStatus::Completed;
        assert!(workflow.can_start(2));
        assert!(!workflow.can_start(3));
    }

    #[test]
    fn test_can_start_unknown_stage_is_false() {
        let workflow = workflow_of(2);
        assert!(!workflow.can_start(3));
        assert!(!workflow.can_start(0));
    }

    #[test]
    fn test_validate_accepts_fresh_workflow() {
        assert!(workflow_of(4).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_gap_in_numbers() {
        let mut workflow = workflow_of(3);
        workflow.stages[1].stage_number = 5;
        assert!(workflow.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_two_current_stages() {
        let mut workflow = workflow_of(3);
        workflow.stages[2].is_current = true;
        assert!(workflow.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let workflow = workflow_of(2);
        let json = serde_json::to_string(&workflow).unwrap();
        let back: SequentialWorkflowData = serde_json::from_str(&json).unwrap();
        assert_eq!(workflow, back);
    }
}
