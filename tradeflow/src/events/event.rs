//! Workflow event type emitted after successful mutations.

use crate::core::EnvelopeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event describing one successful workflow mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// The event type (e.g., "workflow.started", "stage.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// The envelope whose workflow changed.
    pub envelope_id: EnvelopeId,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl WorkflowEvent {
    /// Creates a new workflow event.
    #[must_use]
    pub fn new(event_type: impl Into<String>, envelope_id: EnvelopeId) -> Self {
        Self {
            event_type: event_type.into(),
            envelope_id,
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Creates a "workflow.started" event.
    #[must_use]
    pub fn workflow_started(envelope_id: EnvelopeId, total_stages: u32) -> Self {
        Self::new("workflow.started", envelope_id)
            .add_data("total_stages", serde_json::json!(total_stages))
    }

    /// Creates a "stage.completed" event.
    #[must_use]
    pub fn stage_completed(envelope_id: EnvelopeId, stage_number: u32) -> Self {
        Self::new("stage.completed", envelope_id)
            .add_data("stage_number", serde_json::json!(stage_number))
    }

    /// Creates a "stage.rejected" event.
    #[must_use]
    pub fn stage_rejected(envelope_id: EnvelopeId, stage_number: u32, reason: &str) -> Self {
        Self::new("stage.rejected", envelope_id)
            .add_data("stage_number", serde_json::json!(stage_number))
            .add_data("reason", serde_json::json!(reason))
    }

    /// Creates a "stage.payment_completed" event.
    #[must_use]
    pub fn payment_completed(envelope_id: EnvelopeId, stage_number: u32) -> Self {
        Self::new("stage.payment_completed", envelope_id)
            .add_data("stage_number", serde_json::json!(stage_number))
    }

    /// Creates a "workflow.completed" event.
    #[must_use]
    pub fn workflow_completed(envelope_id: EnvelopeId) -> Self {
        Self::new("workflow.completed", envelope_id)
    }
}
