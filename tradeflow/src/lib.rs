//! # Tradeflow
//!
//! A sequential workflow engine for trade-document envelopes.
//!
//! Tradeflow turns a list of required documents — each owned by a legal
//! entity such as customs, a port authority, a ministry, or a bank — into an
//! ordered multi-stage approval pipeline:
//!
//! - **Strict stage ordering**: one current stage at a time, advancing only
//!   on approval
//! - **Payment gating**: fee-bearing stages accept a decision only after the
//!   charge settles
//! - **Terminal rejection**: one rejected stage ends the workflow; later
//!   stages stay blocked
//! - **Per-stage authorization**: approval belongs to the owning entity,
//!   payment to the submitter
//! - **Event-driven observability**: a typed event after every successful
//!   mutation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradeflow::prelude::*;
//!
//! // Build the pipeline from the catalog's required documents
//! let workflow = WorkflowBuilder::new(envelope_id, acid_number)
//!     .documents(required_documents)
//!     .build()?;
//!
//! // Start it and drive it through the engine
//! let engine = WorkflowEngine::new(store);
//! let workflow = engine.start_workflow(workflow).await?;
//! let workflow = engine
//!     .complete_current_stage(workflow.envelope_id, 1, &actor)
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod auth;
pub mod builder;
pub mod core;
pub mod engine;
pub mod errors;
pub mod events;
pub mod projection;
pub mod store;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::{can_act_on_stage, can_pay_stage};
    pub use crate::builder::{build_workflow, WorkflowBuilder};
    pub use crate::core::{
        AcidNumber, Actor, ActorRole, DocumentId, EntityId, EnvelopeId, Money,
        PaymentResult, PaymentStatus, RequiredDocument, SequentialWorkflowData,
        StageStatus, WorkflowStage, WorkflowStatus,
    };
    pub use crate::engine::WorkflowEngine;
    pub use crate::errors::{
        EmptyWorkflowError, InvalidTransitionError, NotAuthorizedError,
        PaymentMismatchError, StaleStageError, VersionConflictError, WorkflowError,
    };
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, WorkflowEvent,
    };
    pub use crate::projection::WorkflowProgress;
    pub use crate::store::{InMemoryWorkflowStore, StoredWorkflow, WorkflowStore};
    pub use crate::utils::{iso_timestamp, Timestamp};
}
