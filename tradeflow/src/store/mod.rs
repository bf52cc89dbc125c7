//! Persistence boundary for workflow aggregates.
//!
//! The engine performs read-modify-write cycles against a [`WorkflowStore`]
//! with optimistic concurrency: every save names the version it read, and a
//! concurrent writer surfaces as a version conflict the caller resolves by
//! re-reading. Envelopes are independent units of concurrency; there is no
//! cross-envelope coordination.

mod memory;

pub use memory::InMemoryWorkflowStore;

use crate::core::{EnvelopeId, SequentialWorkflowData};
use crate::errors::WorkflowError;
use async_trait::async_trait;

/// A workflow aggregate together with its store version.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWorkflow {
    /// The aggregate as persisted.
    pub workflow: SequentialWorkflowData,
    /// Monotonic version, bumped on every successful save.
    pub version: u64,
}

/// Keyed storage for workflow aggregates.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Loads the aggregate for an envelope, if one exists.
    ///
    /// Reads never block writers; serving a slightly stale snapshot is
    /// acceptable for status queries.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the backend fails.
    async fn load(
        &self,
        envelope_id: EnvelopeId,
    ) -> Result<Option<StoredWorkflow>, WorkflowError>;

    /// Persists a freshly built aggregate at version 1.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidTransition`] when the envelope
    /// already has a workflow, or [`WorkflowError::Store`] on backend
    /// failure.
    async fn insert(
        &self,
        workflow: SequentialWorkflowData,
    ) -> Result<StoredWorkflow, WorkflowError>;

    /// Saves a mutated aggregate if the stored version still matches.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Conflict`] when another writer saved first
    /// (re-read and retry), [`WorkflowError::NotFound`] when the envelope
    /// was never inserted, or [`WorkflowError::Store`] on backend failure.
    async fn save(
        &self,
        workflow: SequentialWorkflowData,
        expected_version: u64,
    ) -> Result<StoredWorkflow, WorkflowError>;
}
