use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /seller-orders`
#[derive(Debug, Clone, Deserialize)]
pub struct SellerOrderRequest {
    pub seller_price: Decimal,
    pub seller_qty: i64,
}

/// Body of `POST /buyer-orders`
#[derive(Debug, Clone, Deserialize)]
pub struct BuyerOrderRequest {
    pub buyer_price: Decimal,
    pub buyer_qty: i64,
}

/// Body of `POST /match-orders`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchOrdersRequest {
    pub buyer_price: Decimal,
    pub buyer_qty: i64,
}

/// Confirmation wrapper for mutating endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
