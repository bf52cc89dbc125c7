//! Workflow-change notification.
//!
//! The engine emits a typed event after every successful mutation.
//! Consumers subscribe through an [`EventSink`] instead of polling the
//! store for changes.

mod event;
mod sink;

pub use event::WorkflowEvent;
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
