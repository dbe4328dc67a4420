//! Order intake
//!
//! Normalizes incoming orders into the book: merge into the existing price
//! level or create a new one. Intake never attempts a match and never
//! records a trade; exactly one pending row changes per submission.

use tracing::info;

use types::numeric::{Price, Quantity};
use types::order::{PendingOrder, Side};

use crate::error::BookResult;
use crate::store::OrderBookStore;

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// A new price level was created
    Created(PendingOrder),
    /// Quantity was merged into the existing level; the row carries the
    /// new total
    Merged(PendingOrder),
}

impl SubmitResult {
    /// The stored row after the submission
    pub fn order(&self) -> &PendingOrder {
        match self {
            SubmitResult::Created(order) | SubmitResult::Merged(order) => order,
        }
    }
}

/// Submit an order into the book at its price level
///
/// `Price` and `Quantity` are valid by construction, so nothing malformed
/// reaches storage from here.
pub async fn submit(
    store: &OrderBookStore,
    side: Side,
    price: Price,
    quantity: Quantity,
) -> BookResult<SubmitResult> {
    let (order, created) = store.upsert_pending(side, &price, quantity).await?;

    if created {
        info!(?side, price = %price, quantity = %quantity, "pending order created");
        Ok(SubmitResult::Created(order))
    } else {
        info!(?side, price = %price, total = %order.quantity, "pending order merged");
        Ok(SubmitResult::Merged(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn qty(v: i64) -> Quantity {
        Quantity::try_new(v).unwrap()
    }

    #[tokio::test]
    async fn test_submit_creates_new_price_level() {
        let store = OrderBookStore::in_memory().await.unwrap();

        let result = submit(&store, Side::SELL, price("100.5"), qty(10))
            .await
            .unwrap();

        assert!(matches!(result, SubmitResult::Created(_)));
        assert_eq!(result.order().quantity.get(), 10);
    }

    #[tokio::test]
    async fn test_submit_merges_quantity_at_existing_price() {
        let store = OrderBookStore::in_memory().await.unwrap();

        submit(&store, Side::SELL, price("100.5"), qty(10))
            .await
            .unwrap();
        let result = submit(&store, Side::SELL, price("100.5"), qty(4))
            .await
            .unwrap();

        match result {
            SubmitResult::Merged(order) => assert_eq!(order.quantity.get(), 14),
            other => panic!("expected merge, got {other:?}"),
        }

        let rows = store.list_pending(Side::SELL).await.unwrap();
        assert_eq!(rows.len(), 1, "merging must not create a second row");
    }

    #[tokio::test]
    async fn test_submit_records_no_trade() {
        let store = OrderBookStore::in_memory().await.unwrap();

        submit(&store, Side::BUY, price("100.5"), qty(10))
            .await
            .unwrap();
        submit(&store, Side::SELL, price("100.5"), qty(10))
            .await
            .unwrap();

        assert!(store.list_trades().await.unwrap().is_empty());
    }
}
