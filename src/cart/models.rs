//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One article/quantity pair. At most one line per article exists in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub article_number: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(article_number: impl Into<String>, quantity: u32) -> Self {
        Self {
            article_number: article_number.into(),
            quantity,
        }
    }
}

/// A user's cart. Positions keep first-insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    pub positions: Vec<CartLine>,
}

impl Cart {
    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.positions.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn line(&self, article_number: &str) -> Option<&CartLine> {
        self.positions
            .iter()
            .find(|l| l.article_number == article_number)
    }
}

/// A cart line merged with live catalog data. Never stored.
///
/// When the catalog lookup failed, `description` is empty and `price` is
/// zero; consumers must read that as "details unavailable".
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDisplay {
    pub article_number: String,
    pub quantity: u32,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
}

/// Display-ready cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartDisplay {
    pub positions: Vec<CartLineDisplay>,
    /// Sum of quantities, degraded lines included.
    pub total_positions: u64,
}

/// Opaque identifier handed out on order submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Caller Inputs
// =============================================================================

/// Returns the default quantity (1) for incoming lines
fn default_quantity() -> i64 {
    1
}

/// An unvalidated line as sent by a client.
///
/// Quantity is signed so that zero and negative values reach validation
/// instead of failing deserialization with an opaque message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub article_number: String,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Body of `POST /carts/:username/lines`
#[derive(Debug, Deserialize)]
pub struct AddLinesRequest {
    pub items: Vec<LineInput>,
}

/// Response for order submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Status of the operation
    pub status: String,

    pub order_id: OrderId,
}
