//! Money in minor units and payment-provider results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of money in minor units (cents, piastres) of a currency.
///
/// Stage fees and payment results carry `Money`; two amounts are equal only
/// when both the minor-unit count and the currency code match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's minor units.
    pub minor_units: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Money {
    /// Creates an amount.
    #[must_use]
    pub fn new(minor_units: i64, currency: impl Into<String>) -> Self {
        Self {
            minor_units,
            currency: currency.into(),
        }
    }

    /// Returns true if the amount charges nothing.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Returns true if this amount represents a collectable fee.
    #[must_use]
    pub fn is_chargeable(&self) -> bool {
        self.minor_units > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.minor_units, self.currency)
    }
}

/// The final outcome of a payment-provider charge, delivered to the engine
/// as data. The engine never calls out to a payment network itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Whether the provider reports the charge as captured.
    pub succeeded: bool,
    /// The amount the provider charged.
    pub amount: Money,
    /// Provider-side reference for audit trails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PaymentResult {
    /// Creates a successful payment result.
    #[must_use]
    pub fn success(amount: Money) -> Self {
        Self {
            succeeded: true,
            amount,
            reference: None,
        }
    }

    /// Creates a failed payment result.
    #[must_use]
    pub fn failure(amount: Money) -> Self {
        Self {
            succeeded: false,
            amount,
            reference: None,
        }
    }

    /// Attaches the provider reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}
