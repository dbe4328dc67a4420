//! Read-only book queries
//!
//! Snapshot listings of the three collections. Reads run concurrently with
//! writers and reflect some committed state, never a torn write.

use types::order::{PendingOrder, Side};
use types::trade::Trade;

use crate::error::BookResult;
use crate::store::OrderBookStore;

/// All pending sell orders, unordered
pub async fn pending_sell_orders(store: &OrderBookStore) -> BookResult<Vec<PendingOrder>> {
    store.list_pending(Side::SELL).await
}

/// All pending buy orders, unordered
pub async fn pending_buy_orders(store: &OrderBookStore) -> BookResult<Vec<PendingOrder>> {
    store.list_pending(Side::BUY).await
}

/// All completed trades, unordered
pub async fn completed_trades(store: &OrderBookStore) -> BookResult<Vec<Trade>> {
    store.list_trades().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::submit;
    use types::numeric::{Price, Quantity};

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn qty(v: i64) -> Quantity {
        Quantity::try_new(v).unwrap()
    }

    #[tokio::test]
    async fn test_listings_reflect_submissions() {
        let store = OrderBookStore::in_memory().await.unwrap();

        submit(&store, Side::SELL, price("101"), qty(5)).await.unwrap();
        submit(&store, Side::SELL, price("102"), qty(6)).await.unwrap();
        submit(&store, Side::BUY, price("99"), qty(7)).await.unwrap();

        assert_eq!(pending_sell_orders(&store).await.unwrap().len(), 2);
        assert_eq!(pending_buy_orders(&store).await.unwrap().len(), 1);
        assert!(completed_trades(&store).await.unwrap().is_empty());
    }
}
