//! Matcher
//!
//! Settles a buy order against the pending sell order at the buyer's exact
//! price. The whole read-decide-mutate sequence runs inside one
//! transaction under the store's write gate: either every effect lands or
//! none do, and no other writer commits in between.

use chrono::Utc;
use tracing::info;

use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

use crate::error::{BookError, BookResult};
use crate::store::OrderBookStore;

/// How a match consumed the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Both sides fully consumed
    Exact,
    /// Buyer fully consumed; the sell level keeps its remainder
    SellerRemains,
    /// Seller fully consumed; the buy level keeps its remainder
    BuyerRemains,
}

/// Outcome of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub settlement: Settlement,
    pub trade: Trade,
}

impl MatchReport {
    /// Human-readable confirmation for the caller
    pub fn confirmation(&self) -> String {
        "Orders matched successfully".to_string()
    }
}

/// Match a buy order of (`buyer_price`, `buyer_qty`) against the book
///
/// Fails with [`BookError::NoMatch`] and no state change when no sell
/// order rests at that exact price. The pending buy row at that price is
/// removed or reduced if present; the matcher does not require one, since
/// the buyer's quantity comes from the caller.
///
/// Partial settlements record the larger side's *remainder* as the traded
/// quantity, not the filled quantity. Kept as-is pending confirmation of
/// the intended settlement rule; see DESIGN.md.
pub async fn match_orders(
    store: &OrderBookStore,
    buyer_price: Price,
    buyer_qty: Quantity,
) -> BookResult<MatchReport> {
    let _write = store.write_lock().await;
    let mut tx = store.begin().await?;

    let seller = store
        .find_pending(&mut *tx, Side::SELL, &buyer_price)
        .await?
        .ok_or(BookError::NoMatch { price: buyer_price })?;

    let seller_qty = seller.quantity;
    let executed_at = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);

    let report = if buyer_qty == seller_qty {
        store.delete_pending(&mut *tx, Side::BUY, &buyer_price).await?;
        store
            .reduce_or_delete_by_id(&mut *tx, Side::SELL, seller.id, 0)
            .await?;

        let trade = Trade::new(buyer_price, buyer_qty, executed_at);
        store.record_trade(&mut *tx, &trade).await?;

        MatchReport {
            settlement: Settlement::Exact,
            trade,
        }
    } else if let Some(seller_remainder) = seller_qty.checked_sub(buyer_qty) {
        // Buyer is smaller: buy row gone, sell level reduced
        store.delete_pending(&mut *tx, Side::BUY, &buyer_price).await?;
        store
            .reduce_or_delete_by_id(&mut *tx, Side::SELL, seller.id, seller_remainder.get())
            .await?;

        let trade = Trade::new(buyer_price, seller_remainder, executed_at);
        store.record_trade(&mut *tx, &trade).await?;

        MatchReport {
            settlement: Settlement::SellerRemains,
            trade,
        }
    } else {
        // Buyer is larger: sell row gone, buy level reduced
        let buyer_remainder = buyer_qty
            .checked_sub(seller_qty)
            .ok_or_else(|| BookError::Corrupt("buyer remainder underflow".to_string()))?;

        store
            .reduce_or_delete_by_id(&mut *tx, Side::SELL, seller.id, 0)
            .await?;
        store
            .reduce_or_delete_by_price(&mut *tx, Side::BUY, &buyer_price, buyer_remainder.get())
            .await?;

        let trade = Trade::new(buyer_price, buyer_remainder, executed_at);
        store.record_trade(&mut *tx, &trade).await?;

        MatchReport {
            settlement: Settlement::BuyerRemains,
            trade,
        }
    };

    tx.commit().await?;

    info!(
        price = %report.trade.price,
        quantity = %report.trade.quantity,
        settlement = ?report.settlement,
        "orders matched"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::submit;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn qty(v: i64) -> Quantity {
        Quantity::try_new(v).unwrap()
    }

    #[tokio::test]
    async fn test_exact_match_consumes_both_sides() {
        let store = OrderBookStore::in_memory().await.unwrap();
        submit(&store, Side::SELL, price("100.5"), qty(10)).await.unwrap();
        submit(&store, Side::BUY, price("100.5"), qty(10)).await.unwrap();

        let report = match_orders(&store, price("100.5"), qty(10)).await.unwrap();

        assert_eq!(report.settlement, Settlement::Exact);
        assert_eq!(report.trade.quantity.get(), 10);
        assert!(store.list_pending(Side::SELL).await.unwrap().is_empty());
        assert!(store.list_pending(Side::BUY).await.unwrap().is_empty());

        let trades = store.list_trades().await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price, price("100.5"));
    }

    #[tokio::test]
    async fn test_smaller_buyer_leaves_seller_remainder() {
        let store = OrderBookStore::in_memory().await.unwrap();
        submit(&store, Side::SELL, price("100.5"), qty(10)).await.unwrap();
        submit(&store, Side::BUY, price("100.5"), qty(4)).await.unwrap();

        let report = match_orders(&store, price("100.5"), qty(4)).await.unwrap();

        assert_eq!(report.settlement, Settlement::SellerRemains);
        // The remainder, not the filled quantity, is what settles
        assert_eq!(report.trade.quantity.get(), 6);

        let sells = store.list_pending(Side::SELL).await.unwrap();
        assert_eq!(sells.len(), 1);
        assert_eq!(sells[0].quantity.get(), 6);
        assert!(store.list_pending(Side::BUY).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_larger_buyer_leaves_buy_remainder() {
        let store = OrderBookStore::in_memory().await.unwrap();
        submit(&store, Side::SELL, price("100.5"), qty(4)).await.unwrap();
        submit(&store, Side::BUY, price("100.5"), qty(10)).await.unwrap();

        let report = match_orders(&store, price("100.5"), qty(10)).await.unwrap();

        assert_eq!(report.settlement, Settlement::BuyerRemains);
        assert_eq!(report.trade.quantity.get(), 6);

        assert!(store.list_pending(Side::SELL).await.unwrap().is_empty());
        let buys = store.list_pending(Side::BUY).await.unwrap();
        assert_eq!(buys.len(), 1);
        assert_eq!(buys[0].quantity.get(), 6);
    }

    #[tokio::test]
    async fn test_match_without_pending_buy_row_still_settles() {
        let store = OrderBookStore::in_memory().await.unwrap();
        submit(&store, Side::SELL, price("100.5"), qty(10)).await.unwrap();

        // No pending buy row: the buyer quantity comes from the caller
        let report = match_orders(&store, price("100.5"), qty(10)).await.unwrap();

        assert_eq!(report.settlement, Settlement::Exact);
        assert!(store.list_pending(Side::SELL).await.unwrap().is_empty());
        assert_eq!(store.list_trades().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_match_changes_nothing() {
        let store = OrderBookStore::in_memory().await.unwrap();
        submit(&store, Side::SELL, price("99"), qty(10)).await.unwrap();
        submit(&store, Side::BUY, price("100.5"), qty(10)).await.unwrap();

        let err = match_orders(&store, price("100.5"), qty(10)).await.unwrap_err();
        assert!(matches!(err, BookError::NoMatch { .. }));

        assert_eq!(store.list_pending(Side::SELL).await.unwrap().len(), 1);
        assert_eq!(store.list_pending(Side::BUY).await.unwrap().len(), 1);
        assert!(store.list_trades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_exact_price_matches() {
        let store = OrderBookStore::in_memory().await.unwrap();
        // A better-priced seller exists, but the spread is never crossed
        submit(&store, Side::SELL, price("99"), qty(10)).await.unwrap();

        let err = match_orders(&store, price("100"), qty(10)).await.unwrap_err();
        assert!(matches!(err, BookError::NoMatch { .. }));
    }
}
