//! Per-stage action authorization.
//!
//! Two distinct capabilities exist. Approving or rejecting a stage belongs
//! to the legal entity that owns it; paying a stage fee belongs to the
//! envelope's submitter. Neither implies the other.

use crate::core::{Actor, ActorRole, SequentialWorkflowData, StageStatus, WorkflowStage};

/// Returns true if `actor` may approve or reject `stage` right now.
///
/// Requires the legal-entity role with a matching entity ID, and a stage
/// that is current, startable, and in a decidable status.
#[must_use]
pub fn can_act_on_stage(
    workflow: &SequentialWorkflowData,
    stage: &WorkflowStage,
    actor: &Actor,
) -> bool {
    actor.acts_for(&stage.legal_entity_id)
        && stage.is_current
        && workflow.can_start(stage.stage_number)
        && stage.status.is_decidable()
}

/// Returns true if `actor` may settle the fee on `stage` right now.
///
/// Payment is open to the originating submitter and only while the current
/// stage is gated on its fee.
#[must_use]
pub fn can_pay_stage(stage: &WorkflowStage, actor: &Actor) -> bool {
    actor.role == ActorRole::Submitter
        && stage.is_current
        && stage.status == StageStatus::PaymentRequired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_workflow;
    use crate::core::{AcidNumber, EntityId, EnvelopeId, Money, RequiredDocument};

    fn workflow() -> SequentialWorkflowData {
        build_workflow(
            vec![
                RequiredDocument::new("inv", "Invoice", "customs", "Customs"),
                RequiredDocument::new("permit", "Permit", "ministry", "Ministry")
                    .with_fee(Money::new(5000, "EGP")),
            ],
            EnvelopeId::new(),
            AcidNumber::new("A-1"),
        )
        .unwrap()
    }

    #[test]
    fn test_owning_entity_may_act_on_current_stage() {
        let workflow = workflow();
        let stage = workflow.stage(1).unwrap();
        let customs = Actor::legal_entity("user-1", EntityId::new("customs"));

        assert!(can_act_on_stage(&workflow, stage, &customs));
    }

    #[test]
    fn test_other_entity_may_not_act() {
        let workflow = workflow();
        let stage = workflow.stage(1).unwrap();
        let ministry = Actor::legal_entity("user-2", EntityId::new("ministry"));

        assert!(!can_act_on_stage(&workflow, stage, &ministry));
    }

    #[test]
    fn test_entity_may_not_act_on_blocked_stage() {
        let workflow = workflow();
        let stage = workflow.stage(2).unwrap();
        let ministry = Actor::legal_entity("user-2", EntityId::new("ministry"));

        assert!(!can_act_on_stage(&workflow, stage, &ministry));
    }

    #[test]
    fn test_submitter_may_not_approve() {
        let workflow = workflow();
        let stage = workflow.stage(1).unwrap();
        let submitter = Actor::submitter("trader-1");

        assert!(!can_act_on_stage(&workflow, stage, &submitter));
    }

    #[test]
    fn test_submitter_pays_payment_required_stage() {
        let workflow = build_workflow(
            vec![RequiredDocument::new("permit", "Permit", "ministry", "Ministry")
                .with_fee(Money::new(5000, "EGP"))],
            EnvelopeId::new(),
            AcidNumber::new("A-2"),
        )
        .unwrap();
        let stage = workflow.stage(1).unwrap();

        assert!(can_pay_stage(stage, &Actor::submitter("trader-1")));
        let ministry = Actor::legal_entity("user-2", EntityId::new("ministry"));
        assert!(!can_pay_stage(stage, &ministry));
    }

    #[test]
    fn test_nothing_to_pay_on_free_stage() {
        let workflow = workflow();
        let stage = workflow.stage(1).unwrap();

        assert!(!can_pay_stage(stage, &Actor::submitter("trader-1")));
    }
}
