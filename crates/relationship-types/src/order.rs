//! Order types for the relationship chaincode.
//!
//! An order's identity is its full six-field tuple. The tuple is the state
//! key; the only thing stored under it is the [`OrderStatus`] bytes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RelationshipError, Result, constants};

/// Which side of the trade the caller takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = RelationshipError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(RelationshipError::invalid_argument(format!(
                "side must be \"buy\" or \"sell\", got {other:?}"
            ))),
        }
    }
}

/// Lifecycle status of an order. Moves `Initiated -> Matched`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Initiated,
    Matched,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Matched => "matched",
        }
    }

    /// Raw bytes stored in the ledger for this status.
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Parse the raw ledger value back into a status.
    ///
    /// # Errors
    /// Returns [`RelationshipError::MalformedValue`] for any other bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes {
            b"initiated" => Ok(Self::Initiated),
            b"matched" => Ok(Self::Matched),
            other => Err(RelationshipError::MalformedValue {
                reason: format!(
                    "unknown order status {:?}",
                    String::from_utf8_lossy(other)
                ),
            }),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six fields that identify an order. Two submissions are the same
/// order iff every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderTuple {
    pub buyer: String,
    pub seller: String,
    pub asset: String,
    pub qty: String,
    pub price: String,
    pub reference: String,
}

impl OrderTuple {
    /// Fields in composite key order.
    #[must_use]
    pub fn key_parts(&self) -> [&str; constants::ORDER_KEY_ARITY] {
        [
            &self.buyer,
            &self.seller,
            &self.asset,
            &self.qty,
            &self.price,
            &self.reference,
        ]
    }

    /// Rebuild a tuple from decoded composite key parts.
    ///
    /// # Errors
    /// Returns [`RelationshipError::MalformedKey`] unless exactly six parts
    /// are given.
    pub fn from_key_parts(parts: Vec<String>) -> Result<Self> {
        let arity = parts.len();
        let Ok([buyer, seller, asset, qty, price, reference]) =
            <[String; constants::ORDER_KEY_ARITY]>::try_from(parts)
        else {
            return Err(RelationshipError::malformed_key(format!(
                "expected {} key parts, found {arity}",
                constants::ORDER_KEY_ARITY
            )));
        };
        Ok(Self {
            buyer,
            seller,
            asset,
            qty,
            price,
            reference,
        })
    }

    /// Reject tuples with an empty field.
    ///
    /// # Errors
    /// Returns [`RelationshipError::InvalidArgument`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; constants::ORDER_KEY_ARITY] =
            ["buyer", "seller", "asset", "qty", "price", "reference"];
        for (name, value) in NAMES.iter().zip(self.key_parts()) {
            if value.is_empty() {
                return Err(RelationshipError::invalid_argument(format!(
                    "{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// A recorded order as returned by `query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub buyer: String,
    pub seller: String,
    pub asset: String,
    pub qty: String,
    pub price: String,
    pub reference: String,
    pub status: OrderStatus,
}

impl Order {
    #[must_use]
    pub fn new(tuple: OrderTuple, status: OrderStatus) -> Self {
        Self {
            buyer: tuple.buyer,
            seller: tuple.seller,
            asset: tuple.asset,
            qty: tuple.qty,
            price: tuple.price,
            reference: tuple.reference,
            status,
        }
    }

    /// The identity tuple of this order.
    #[must_use]
    pub fn tuple(&self) -> OrderTuple {
        OrderTuple {
            buyer: self.buyer.clone(),
            seller: self.seller.clone(),
            asset: self.asset.clone(),
            qty: self.qty.clone(),
            price: self.price.clone(),
            reference: self.reference.clone(),
        }
    }
}
