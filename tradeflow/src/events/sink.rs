//! Event sink trait and implementations.

use super::WorkflowEvent;
use async_trait::async_trait;
use tracing::{debug, info, Level};

/// Trait for sinks that receive workflow-change events.
///
/// Sinks decouple consumers from the engine: dashboards, notification
/// senders, and audit logs subscribe here instead of re-fetching the
/// aggregate on a timer.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    async fn emit(&self, event: &WorkflowEvent);

    /// Tries to emit an event without blocking.
    ///
    /// This method must never panic. Errors are logged but suppressed.
    fn try_emit(&self, event: &WorkflowEvent);
}

/// A no-op event sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &WorkflowEvent) {
        // Intentionally empty - discards all events
    }

    fn try_emit(&self, _event: &WorkflowEvent) {
        // Intentionally empty - discards all events
    }
}

/// An event sink that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    /// The log level to use.
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging event sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    fn log_event(&self, event: &WorkflowEvent) {
        match self.level {
            Level::DEBUG => {
                debug!(
                    event_type = %event.event_type,
                    envelope_id = %event.envelope_id,
                    event_data = ?event.data,
                    "Event: {}", event.event_type
                );
            }
            _ => {
                info!(
                    event_type = %event.event_type,
                    envelope_id = %event.envelope_id,
                    event_data = ?event.data,
                    "Event: {}", event.event_type
                );
            }
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: &WorkflowEvent) {
        self.log_event(event);
    }

    fn try_emit(&self, event: &WorkflowEvent) {
        self.log_event(event);
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<WorkflowEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event types, in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .map(|event| event.event_type.clone())
            .collect()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: &WorkflowEvent) {
        self.events.write().push(event.clone());
    }

    fn try_emit(&self, event: &WorkflowEvent) {
        self.events.write().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EnvelopeId;

    #[tokio::test]
    async fn test_noop_sink_discards() {
        let sink = NoOpEventSink;
        sink.emit(&WorkflowEvent::workflow_completed(EnvelopeId::new()))
            .await;
    }

    #[tokio::test]
    async fn test_collecting_sink_records_in_order() {
        let sink = CollectingEventSink::new();
        let envelope_id = EnvelopeId::new();

        sink.emit(&WorkflowEvent::workflow_started(envelope_id, 3)).await;
        sink.try_emit(&WorkflowEvent::stage_completed(envelope_id, 1));

        assert_eq!(
            sink.event_types(),
            vec!["workflow.started".to_string(), "stage.completed".to_string()]
        );
    }

    #[test]
    fn test_collecting_sink_clear() {
        let sink = CollectingEventSink::new();
        sink.try_emit(&WorkflowEvent::workflow_completed(EnvelopeId::new()));
        sink.clear();
        assert!(sink.events().is_empty());
    }
}
