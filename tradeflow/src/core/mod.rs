//! Core domain types: statuses, identities, money, documents, stages, and
//! the workflow aggregate.

mod document;
mod identity;
mod money;
mod stage;
mod status;
mod workflow;

pub use document::RequiredDocument;
pub use identity::{AcidNumber, Actor, ActorRole, DocumentId, EntityId, EnvelopeId};
pub use money::{Money, PaymentResult};
pub use stage::WorkflowStage;
pub use status::{PaymentStatus, StageStatus, WorkflowStatus};
pub use workflow::SequentialWorkflowData;
