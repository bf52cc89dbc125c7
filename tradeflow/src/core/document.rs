//! Required-document input to the workflow builder.

use super::identity::{DocumentId, EntityId};
use super::money::Money;
use serde::{Deserialize, Serialize};

/// A document the envelope must carry, as produced by the procedure/goods
/// catalog. Immutable input to the workflow builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    /// Catalog identifier of the document.
    pub id: DocumentId,
    /// Human-readable document name.
    pub name: String,
    /// The legal entity that reviews this document.
    pub legal_entity_id: EntityId,
    /// Display name of the reviewing entity.
    pub legal_entity_name: String,
    /// Whether the document is mandatory for the selected goods.
    pub is_required: bool,
    /// Review fee, if the entity charges one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Money>,
}

impl RequiredDocument {
    /// Creates a required document with no fee.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        legal_entity_id: impl Into<String>,
        legal_entity_name: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(id),
            name: name.into(),
            legal_entity_id: EntityId::new(legal_entity_id),
            legal_entity_name: legal_entity_name.into(),
            is_required: true,
            fee: None,
        }
    }

    /// Sets the review fee.
    #[must_use]
    pub fn with_fee(mut self, fee: Money) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Marks the document as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    /// Returns the fee when it actually charges something.
    ///
    /// A zero or negative fee from the catalog is treated as no fee.
    #[must_use]
    pub fn chargeable_fee(&self) -> Option<&Money> {
        self.fee.as_ref().filter(|fee| fee.is_chargeable())
    }
}
