//! Pure transition functions over the workflow aggregate.
//!
//! Each public operation of the engine maps to exactly one function here.
//! A function either applies the full transition to the owned aggregate or
//! returns an error leaving it untouched; anything outside the transition
//! table is rejected instead of patched around.

use crate::core::{
    PaymentResult, PaymentStatus, SequentialWorkflowData, StageStatus, WorkflowStatus,
};
use crate::errors::{
    InvalidTransitionError, PaymentMismatchError, StaleStageError, WorkflowError,
};
use crate::utils::Timestamp;

/// What a successful completion did to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// The pointer moved to the next stage.
    NextStage(u32),
    /// The last stage completed; the workflow is done.
    WorkflowCompleted,
}

/// What a payment delivery did to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaymentOutcome {
    /// The fee was collected and the stage unlocked for decision.
    Collected,
    /// Duplicate delivery of an already-settled result; nothing changed.
    AlreadySettled,
    /// The provider reported failure; nothing changed.
    ProviderDeclined,
}

/// Starts a built workflow: `NotStarted` becomes `InProgress`.
///
/// Stage 1 keeps the status the builder derived from its fee; there is
/// nothing to unlock yet.
pub(crate) fn start(workflow: &mut SequentialWorkflowData) -> Result<(), WorkflowError> {
    workflow.validate()?;

    if workflow.workflow_status != WorkflowStatus::NotStarted {
        return Err(InvalidTransitionError::new(format!(
            "cannot start workflow in status {}",
            workflow.workflow_status
        ))
        .into());
    }

    workflow.workflow_status = WorkflowStatus::InProgress;
    Ok(())
}

/// Ensures the workflow accepts mutating events at all.
fn ensure_running(workflow: &SequentialWorkflowData) -> Result<(), WorkflowError> {
    match workflow.workflow_status {
        WorkflowStatus::InProgress => Ok(()),
        status => Err(InvalidTransitionError::new(format!(
            "workflow in status {status} accepts no stage events"
        ))
        .into()),
    }
}

/// Ensures the caller acts on the stage that is actually current.
fn ensure_current(
    workflow: &SequentialWorkflowData,
    stage_number: u32,
) -> Result<(), WorkflowError> {
    if stage_number != workflow.current_stage {
        return Err(StaleStageError {
            envelope_id: workflow.envelope_id,
            requested: stage_number,
            current: workflow.current_stage,
        }
        .into());
    }
    Ok(())
}

/// Checks that the workflow is running and the stage is current, without
/// mutating anything. The engine runs this before its authorization gate so
/// terminal-workflow and stale-stage failures take precedence.
pub(crate) fn guard_actionable(
    workflow: &SequentialWorkflowData,
    stage_number: u32,
) -> Result<(), WorkflowError> {
    ensure_running(workflow)?;
    ensure_current(workflow, stage_number)
}

/// Completes the current stage and advances the pointer.
///
/// The single path by which `current_stage` moves. The unlocked successor
/// derives its status from its fee exactly as the builder did for stage 1.
pub(crate) fn complete(
    workflow: &mut SequentialWorkflowData,
    stage_number: u32,
    now: Timestamp,
) -> Result<Advance, WorkflowError> {
    ensure_running(workflow)?;
    ensure_current(workflow, stage_number)?;

    let total_stages = workflow.total_stages;
    let stage = workflow
        .stage_mut(stage_number)
        .ok_or_else(|| InvalidTransitionError::new(format!("no stage {stage_number}")))?;

    if !stage.status.is_decidable() {
        return Err(InvalidTransitionError::new(format!(
            "cannot complete stage {stage_number} in status {}",
            stage.status
        ))
        .with_stage(stage_number, stage.status)
        .into());
    }

    stage.status = StageStatus::Completed;
    stage.completed_at = Some(now);
    stage.is_current = false;

    if stage_number < total_stages {
        let next = stage_number + 1;
        workflow.current_stage = next;
        if let Some(successor) = workflow.stage_mut(next) {
            successor.status = successor.entry_status();
            successor.is_current = true;
        }
        Ok(Advance::NextStage(next))
    } else {
        workflow.workflow_status = WorkflowStatus::Completed;
        Ok(Advance::WorkflowCompleted)
    }
}

/// Rejects the current stage, ending the workflow.
///
/// The pointer does not move: `is_current` stays on the rejected stage so
/// consumers can show exactly where the workflow died. Higher stages stay
/// `Blocked` permanently. There is no resubmission transition; a resubmit
/// means a new workflow.
pub(crate) fn reject(
    workflow: &mut SequentialWorkflowData,
    stage_number: u32,
    reason: &str,
) -> Result<(), WorkflowError> {
    ensure_running(workflow)?;
    ensure_current(workflow, stage_number)?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(
            InvalidTransitionError::new("rejection requires a non-empty reason").into(),
        );
    }

    let stage = workflow
        .stage_mut(stage_number)
        .ok_or_else(|| InvalidTransitionError::new(format!("no stage {stage_number}")))?;

    if !stage.status.is_decidable() {
        return Err(InvalidTransitionError::new(format!(
            "cannot reject stage {stage_number} in status {}",
            stage.status
        ))
        .with_stage(stage_number, stage.status)
        .into());
    }

    stage.status = StageStatus::Rejected;
    stage.rejection_reason = Some(reason.to_string());
    workflow.workflow_status = WorkflowStatus::Rejected;
    Ok(())
}

/// Applies a payment-provider result to the current stage.
///
/// Safe under retry and duplicate delivery: a result for a charge that
/// already settled is reported as [`PaymentOutcome::AlreadySettled`] and
/// mutates nothing.
pub(crate) fn apply_payment(
    workflow: &mut SequentialWorkflowData,
    stage_number: u32,
    result: &PaymentResult,
) -> Result<PaymentOutcome, WorkflowError> {
    ensure_running(workflow)?;
    ensure_current(workflow, stage_number)?;

    let stage = workflow
        .stage_mut(stage_number)
        .ok_or_else(|| InvalidTransitionError::new(format!("no stage {stage_number}")))?;

    // Duplicate delivery: the first result already moved the stage past
    // payment. Nothing to charge, nothing to transition.
    if stage.is_paid() {
        return Ok(PaymentOutcome::AlreadySettled);
    }

    if stage.status != StageStatus::PaymentRequired {
        return Err(InvalidTransitionError::new(format!(
            "stage {stage_number} in status {} takes no payment",
            stage.status
        ))
        .with_stage(stage_number, stage.status)
        .into());
    }

    let expected = stage.payment_amount.clone().ok_or_else(|| {
        InvalidTransitionError::new(format!(
            "stage {stage_number} requires payment but has no amount"
        ))
    })?;
    if result.amount != expected {
        return Err(PaymentMismatchError {
            stage_number,
            expected,
            actual: result.amount.clone(),
        }
        .into());
    }

    if !result.succeeded {
        return Ok(PaymentOutcome::ProviderDeclined);
    }

    stage.payment_status = Some(PaymentStatus::Completed);
    stage.status = StageStatus::InProgress;
    Ok(PaymentOutcome::Collected)
}
