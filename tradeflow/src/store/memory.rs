//! In-memory workflow store.

use super::{StoredWorkflow, WorkflowStore};
use crate::core::{EnvelopeId, SequentialWorkflowData};
use crate::errors::{InvalidTransitionError, VersionConflictError, WorkflowError};
use async_trait::async_trait;
use dashmap::DashMap;

/// Reference store backed by a concurrent map.
///
/// The compare-and-swap in [`save`](WorkflowStore::save) runs under the
/// entry lock of the envelope's shard, so two writers racing on one
/// envelope see exactly one winner while other envelopes stay untouched.
#[derive(Debug, Default)]
pub struct InMemoryWorkflowStore {
    entries: DashMap<EnvelopeId, StoredWorkflow>,
}

impl InMemoryWorkflowStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored workflows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no workflows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn load(
        &self,
        envelope_id: EnvelopeId,
    ) -> Result<Option<StoredWorkflow>, WorkflowError> {
        Ok(self
            .entries
            .get(&envelope_id)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(
        &self,
        workflow: SequentialWorkflowData,
    ) -> Result<StoredWorkflow, WorkflowError> {
        let envelope_id = workflow.envelope_id;
        match self.entries.entry(envelope_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(InvalidTransitionError::new(
                format!("workflow for envelope {envelope_id} already exists"),
            )
            .into()),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let stored = StoredWorkflow {
                    workflow,
                    version: 1,
                };
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn save(
        &self,
        workflow: SequentialWorkflowData,
        expected_version: u64,
    ) -> Result<StoredWorkflow, WorkflowError> {
        let envelope_id = workflow.envelope_id;
        match self.entries.entry(envelope_id) {
            dashmap::mapref::entry::Entry::Occupied(mut slot) => {
                let found = slot.get().version;
                if found != expected_version {
                    return Err(VersionConflictError {
                        envelope_id,
                        expected: expected_version,
                        found,
                    }
                    .into());
                }
                let stored = StoredWorkflow {
                    workflow,
                    version: expected_version + 1,
                };
                slot.insert(stored.clone());
                Ok(stored)
            }
            dashmap::mapref::entry::Entry::Vacant(_) => {
                Err(WorkflowError::NotFound { envelope_id })
            }
        }
    }
}
