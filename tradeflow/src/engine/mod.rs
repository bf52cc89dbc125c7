//! The sequential workflow engine.
//!
//! Owns every transition of an envelope's workflow: starting it, completing
//! or rejecting the current stage, and recording payment results. Each
//! mutating operation is a read-modify-write cycle against the store with an
//! optimistic version check, so two callers racing on the same envelope see
//! exactly one winner; the loser gets a conflict and re-reads.

mod transition;


use crate::core::{Actor, EnvelopeId, PaymentResult, SequentialWorkflowData};
use crate::errors::{NotAuthorizedError, WorkflowError};
use crate::events::{EventSink, NoOpEventSink, WorkflowEvent};
use crate::store::WorkflowStore;
use crate::utils::now_utc;
use std::sync::Arc;
use tracing::{info, warn};
use transition::{Advance, PaymentOutcome};

/// Engine over a workflow store and an event sink.
pub struct WorkflowEngine {
    store: Arc<dyn WorkflowStore>,
    sink: Arc<dyn EventSink>,
}

impl WorkflowEngine {
    /// Creates an engine over the given store, with events discarded.
    #[must_use]
    pub fn new(store: Arc<dyn WorkflowStore>) -> Self {
        Self {
            store,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the sink notified after every successful mutation.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Starts a freshly built workflow and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] when the workflow is not
    /// in `NotStarted`, or when the envelope already has a persisted
    /// workflow.
    pub async fn start_workflow(
        &self,
        mut workflow: SequentialWorkflowData,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        transition::start(&mut workflow)?;

        let stored = self.store.insert(workflow).await?;
        info!(
            envelope_id = %stored.workflow.envelope_id,
            acid_number = %stored.workflow.acid_number,
            total_stages = stored.workflow.total_stages,
            "workflow started"
        );
        self.sink
            .emit(&WorkflowEvent::workflow_started(
                stored.workflow.envelope_id,
                stored.workflow.total_stages,
            ))
            .await;
        Ok(stored.workflow)
    }

    /// Returns the persisted workflow for an envelope.
    ///
    /// Read-only; may be served from a stale replica.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the envelope has no
    /// workflow.
    pub async fn get_workflow_status(
        &self,
        envelope_id: EnvelopeId,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        let stored = self
            .store
            .load(envelope_id)
            .await?
            .ok_or(WorkflowError::NotFound { envelope_id })?;
        Ok(stored.workflow)
    }

    /// Approves the current stage and advances the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Stale`] when `stage_number` is no longer
    /// current, [`WorkflowError::NotAuthorized`] when the actor fails the
    /// gate, [`WorkflowError::InvalidTransition`] when the stage cannot be
    /// completed (unpaid, terminal workflow), or [`WorkflowError::Conflict`]
    /// when a concurrent writer won the race.
    pub async fn complete_current_stage(
        &self,
        envelope_id: EnvelopeId,
        stage_number: u32,
        actor: &Actor,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        let stored = self
            .store
            .load(envelope_id)
            .await?
            .ok_or(WorkflowError::NotFound { envelope_id })?;
        let mut workflow = stored.workflow;

        transition::guard_actionable(&workflow, stage_number)?;
        self.authorize_decision(&workflow, stage_number, actor)?;

        let advance = transition::complete(&mut workflow, stage_number, now_utc())?;
        let saved = self.store.save(workflow, stored.version).await?;

        info!(
            envelope_id = %envelope_id,
            stage_number,
            actor_id = %actor.actor_id,
            "stage completed"
        );
        self.sink
            .emit(&WorkflowEvent::stage_completed(envelope_id, stage_number))
            .await;
        if advance == Advance::WorkflowCompleted {
            info!(envelope_id = %envelope_id, "workflow completed");
            self.sink
                .emit(&WorkflowEvent::workflow_completed(envelope_id))
                .await;
        }
        Ok(saved.workflow)
    }

    /// Rejects the current stage, terminating the workflow.
    ///
    /// # Errors
    ///
    /// Same failure modes as
    /// [`complete_current_stage`](Self::complete_current_stage); a blank
    /// `reason` is an [`WorkflowError::InvalidTransition`].
    pub async fn reject_current_stage(
        &self,
        envelope_id: EnvelopeId,
        stage_number: u32,
        reason: &str,
        actor: &Actor,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        let stored = self
            .store
            .load(envelope_id)
            .await?
            .ok_or(WorkflowError::NotFound { envelope_id })?;
        let mut workflow = stored.workflow;

        transition::guard_actionable(&workflow, stage_number)?;
        self.authorize_decision(&workflow, stage_number, actor)?;

        transition::reject(&mut workflow, stage_number, reason)?;
        let saved = self.store.save(workflow, stored.version).await?;

        warn!(
            envelope_id = %envelope_id,
            stage_number,
            actor_id = %actor.actor_id,
            reason,
            "stage rejected, workflow terminated"
        );
        self.sink
            .emit(&WorkflowEvent::stage_rejected(
                envelope_id,
                stage_number,
                reason.trim(),
            ))
            .await;
        Ok(saved.workflow)
    }

    /// Records a payment-provider result for the current stage.
    ///
    /// Safe under duplicate delivery: a result for an already-settled charge
    /// returns the aggregate unchanged. A declined charge likewise leaves
    /// the stage gated on its fee.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::PaymentMismatch`] when amount or currency
    /// differ from the stage's expected charge,
    /// [`WorkflowError::InvalidTransition`] when the stage takes no payment,
    /// [`WorkflowError::Stale`] for a non-current stage, or
    /// [`WorkflowError::Conflict`] on a lost save race.
    pub async fn process_stage_payment(
        &self,
        envelope_id: EnvelopeId,
        stage_number: u32,
        result: &PaymentResult,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        let stored = self
            .store
            .load(envelope_id)
            .await?
            .ok_or(WorkflowError::NotFound { envelope_id })?;
        let mut workflow = stored.workflow;

        match transition::apply_payment(&mut workflow, stage_number, result)? {
            PaymentOutcome::Collected => {
                let saved = self.store.save(workflow, stored.version).await?;
                info!(
                    envelope_id = %envelope_id,
                    stage_number,
                    amount = %result.amount,
                    "stage payment collected"
                );
                self.sink
                    .emit(&WorkflowEvent::payment_completed(envelope_id, stage_number))
                    .await;
                Ok(saved.workflow)
            }
            PaymentOutcome::AlreadySettled => Ok(workflow),
            PaymentOutcome::ProviderDeclined => {
                warn!(
                    envelope_id = %envelope_id,
                    stage_number,
                    amount = %result.amount,
                    "payment declined by provider"
                );
                Ok(workflow)
            }
        }
    }

    /// Identity-and-position half of the authorization gate.
    ///
    /// Status eligibility is left to the transition table so that, say,
    /// completing an unpaid stage surfaces as an invalid transition rather
    /// than an authorization failure. [`crate::auth::can_act_on_stage`]
    /// combines both halves for callers that want the full answer up front.
    fn authorize_decision(
        &self,
        workflow: &SequentialWorkflowData,
        stage_number: u32,
        actor: &Actor,
    ) -> Result<(), WorkflowError> {
        let authorized = workflow.stage(stage_number).is_some_and(|stage| {
            actor.acts_for(&stage.legal_entity_id)
                && stage.is_current
                && workflow.can_start(stage_number)
        });
        if authorized {
            Ok(())
        } else {
            Err(NotAuthorizedError {
                actor_id: actor.actor_id.clone(),
                stage_number,
            }
            .into())
        }
    }
}
