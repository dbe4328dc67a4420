//! Pending order types
//!
//! A pending order is one price level of the book: at most one row exists
//! per distinct price per side, and resubmitting at the same price merges
//! quantity into the existing row.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// A pending order resting in the book at one price level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl PendingOrder {
    /// Create a new pending order with a fresh id
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self {
            id: OrderId::new(),
            price,
            quantity,
        }
    }
}
