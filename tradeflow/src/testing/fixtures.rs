//! Fixtures for exercising the engine in tests.

use crate::builder::build_workflow;
use crate::core::{
    AcidNumber, Actor, EntityId, EnvelopeId, Money, RequiredDocument, SequentialWorkflowData,
};
use crate::engine::WorkflowEngine;
use crate::errors::WorkflowError;
use crate::events::CollectingEventSink;
use crate::store::InMemoryWorkflowStore;
use std::sync::Arc;

/// A realistic document set: a free customs document, a free port document,
/// and a fee-bearing ministry permit, in routing order.
#[must_use]
pub fn sample_documents() -> Vec<RequiredDocument> {
    vec![
        RequiredDocument::new("commercial-invoice", "Commercial Invoice", "customs", "Customs Authority"),
        RequiredDocument::new("packing-list", "Packing List", "port", "Port Authority"),
        RequiredDocument::new("import-permit", "Import Permit", "ministry", "Ministry of Trade")
            .with_fee(Money::new(5000, "EGP")),
    ]
}

/// An actor reviewing for the given legal entity.
#[must_use]
pub fn entity_actor(entity_id: &str) -> Actor {
    Actor::legal_entity(format!("reviewer-{entity_id}"), EntityId::new(entity_id))
}

/// The envelope originator.
#[must_use]
pub fn submitter_actor() -> Actor {
    Actor::submitter("trader-1")
}

/// An engine wired to an in-memory store and a collecting event sink.
pub struct EngineHarness {
    /// The backing store.
    pub store: Arc<InMemoryWorkflowStore>,
    /// Captures every event the engine emits.
    pub sink: Arc<CollectingEventSink>,
    /// The engine under test.
    pub engine: WorkflowEngine,
}

impl EngineHarness {
    /// Creates a fresh harness.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryWorkflowStore::new());
        let sink = Arc::new(CollectingEventSink::new());
        let engine =
            WorkflowEngine::new(store.clone()).with_event_sink(sink.clone());
        Self {
            store,
            sink,
            engine,
        }
    }

    /// Builds and starts a workflow over the given documents.
    ///
    /// # Errors
    ///
    /// Propagates builder and engine errors unchanged.
    pub async fn start(
        &self,
        documents: Vec<RequiredDocument>,
    ) -> Result<SequentialWorkflowData, WorkflowError> {
        let workflow = build_workflow(documents, EnvelopeId::new(), AcidNumber::new("ACID-2024"))?;
        self.engine.start_workflow(workflow).await
    }
}

impl Default for EngineHarness {
    fn default() -> Self {
        Self::new()
    }
}
