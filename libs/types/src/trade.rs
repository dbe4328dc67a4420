//! Completed trade types
//!
//! A trade is the immutable record of one settlement event. Rows are
//! append-only: never mutated or deleted once written.

use crate::ids::TradeId;
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable completed trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub price: Price,
    pub quantity: Quantity,
    /// Unix nanos at settlement
    pub executed_at: i64,
}

impl Trade {
    /// Create a new trade record with a fresh id
    pub fn new(price: Price, quantity: Quantity, executed_at: i64) -> Self {
        Self {
            id: TradeId::new(),
            price,
            quantity,
            executed_at,
        }
    }

    /// Calculate trade value (price × quantity)
    pub fn trade_value(&self) -> Decimal {
        self.price.as_decimal() * Decimal::from(self.quantity.get())
    }
}
