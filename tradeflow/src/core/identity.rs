//! Typed identifiers for envelopes, documents, legal entities, and actors.
//!
//! Identity is always carried as a dedicated type. Resolving a document to
//! its owning entity happens in the catalog that produces the required
//! documents; the engine never matches on display names.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies a submission envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvelopeId(pub Uuid);

impl EnvelopeId {
    /// Creates a new random envelope ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EnvelopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnvelopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies a required document within the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Creates a document ID from a catalog identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies a legal entity (customs authority, port, ministry, bank).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Creates an entity ID from a registry identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The shipment-tracking identifier carried for display and audit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcidNumber(pub String);

impl AcidNumber {
    /// Creates an ACID number.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}

impl fmt::Display for AcidNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The role an actor holds when calling into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// A reviewing legal entity (may approve or reject its own stages).
    LegalEntity,
    /// The envelope originator (may pay stage fees).
    Submitter,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegalEntity => write!(f, "legal_entity"),
            Self::Submitter => write!(f, "submitter"),
        }
    }
}

/// An authenticated caller, as supplied by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier of the user behind the call.
    pub actor_id: String,
    /// The role the identity provider granted.
    pub role: ActorRole,
    /// The legal entity this actor acts for, when the role is `LegalEntity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity_id: Option<EntityId>,
}

impl Actor {
    /// Creates an actor acting for a legal entity.
    #[must_use]
    pub fn legal_entity(actor_id: impl Into<String>, entity_id: EntityId) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: ActorRole::LegalEntity,
            legal_entity_id: Some(entity_id),
        }
    }

    /// Creates a submitter actor.
    #[must_use]
    pub fn submitter(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: ActorRole::Submitter,
            legal_entity_id: None,
        }
    }

    /// Returns true if this actor acts for the given entity.
    #[must_use]
    pub fn acts_for(&self, entity_id: &EntityId) -> bool {
        self.role == ActorRole::LegalEntity && self.legal_entity_id.as_ref() == Some(entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_id_unique() {
        assert_ne!(EnvelopeId::new(), EnvelopeId::new());
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("customs-eg");
        assert_eq!(id.to_string(), "customs-eg");
    }

    #[test]
    fn test_actor_acts_for() {
        let customs = EntityId::new("customs");
        let actor = Actor::legal_entity("user-1", customs.clone());

        assert!(actor.acts_for(&customs));
        assert!(!actor.acts_for(&EntityId::new("port")));
    }

    #[test]
    fn test_submitter_acts_for_nothing() {
        let actor = Actor::submitter("trader-7");
        assert!(!actor.acts_for(&EntityId::new("customs")));
    }

    #[test]
    fn test_actor_role_serialize() {
        let json = serde_json::to_string(&ActorRole::LegalEntity).unwrap();
        assert_eq!(json, r#""legal_entity""#);
    }
}
