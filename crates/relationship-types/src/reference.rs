//! Payload returned by the reference contract.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Entry of the reference contract: a named holder and the amount it
/// reports. The amount stays a string; only its presence matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "Amount", alias = "amount", default)]
    pub amount: String,
}

impl ReferenceRecord {
    /// Decode a reference contract response payload.
    ///
    /// # Errors
    /// Returns [`crate::RelationshipError::Serialization`] if the payload is
    /// not a JSON object of this shape.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// Whether the reference reports a counter-order.
    ///
    /// An empty amount, or one that reads as the number zero, means no.
    /// Any other non-empty amount means yes.
    #[must_use]
    pub fn has_counter_order(&self) -> bool {
        let amount = self.amount.trim();
        if amount.is_empty() {
            return false;
        }
        match Decimal::from_str(amount) {
            Ok(value) => !value.is_zero(),
            Err(_) => true,
        }
    }
}
