//! Order book store
//!
//! Durable key-by-price storage for pending orders and completed trades,
//! backed by SQLite through sqlx. The store exclusively owns the three
//! collections; every other module mutates rows only through it.
//!
//! Writers are serialized through an in-process gate while WAL journaling
//! lets readers keep a snapshot-consistent view concurrent with writes.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteExecutor, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{PendingOrder, Side};
use types::trade::Trade;

use crate::error::{BookError, BookResult};

/// Durable storage for pending orders and completed trades
///
/// Cloning shares the underlying pool and write gate.
#[derive(Clone)]
pub struct OrderBookStore {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

/// Pending table for one side of the book
fn pending_table(side: Side) -> &'static str {
    match side {
        Side::BUY => "pending_buy_orders",
        Side::SELL => "pending_sell_orders",
    }
}

impl OrderBookStore {
    /// Open (creating if missing) the database at `url` and ensure the
    /// schema exists
    pub async fn connect(url: &str, max_connections: u32) -> BookResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// In-process database for tests; the single connection keeps the
    /// memory database alive
    pub async fn in_memory() -> BookResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> BookResult<Self> {
        let store = Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the three tables if they do not exist
    ///
    /// The UNIQUE constraint on price backs the one-row-per-price invariant
    /// even under concurrent submissions.
    pub async fn init_schema(&self) -> BookResult<()> {
        for table in [Side::SELL, Side::BUY].map(pending_table) {
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id       TEXT PRIMARY KEY,
                    price    TEXT NOT NULL UNIQUE,
                    quantity INTEGER NOT NULL CHECK (quantity > 0)
                )"
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS completed_trades (
                id          TEXT PRIMARY KEY,
                price       TEXT NOT NULL,
                quantity    INTEGER NOT NULL,
                executed_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Start a transaction; dropping it without commit rolls every
    /// statement back
    pub async fn begin(&self) -> BookResult<Transaction<'_, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Serialize conflicting writers
    ///
    /// Held across a whole read-decide-mutate transaction so no other
    /// writer commits between the read and the write. Readers are not
    /// gated.
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    /// Exact-price lookup of a pending order; `None` when absent
    pub async fn find_pending(
        &self,
        executor: impl SqliteExecutor<'_>,
        side: Side,
        price: &Price,
    ) -> BookResult<Option<PendingOrder>> {
        let sql = format!(
            "SELECT id, price, quantity FROM {} WHERE price = ?",
            pending_table(side)
        );

        let row = sqlx::query(&sql)
            .bind(price.to_string())
            .fetch_optional(executor)
            .await?;

        row.map(pending_from_row).transpose()
    }

    /// Insert a new price level or merge quantity into the existing one
    ///
    /// A single statement, so the existence check cannot race the write.
    /// Returns the stored row and whether it was newly created; a merge
    /// keeps the original row id.
    pub async fn upsert_pending(
        &self,
        side: Side,
        price: &Price,
        quantity: Quantity,
    ) -> BookResult<(PendingOrder, bool)> {
        let sql = format!(
            "INSERT INTO {} (id, price, quantity) VALUES (?, ?, ?)
             ON CONFLICT(price) DO UPDATE SET quantity = quantity + excluded.quantity
             RETURNING id, price, quantity",
            pending_table(side)
        );

        let candidate = OrderId::new();

        let _write = self.write_gate.lock().await;
        let row = sqlx::query(&sql)
            .bind(candidate.to_string())
            .bind(price.to_string())
            .bind(quantity.get())
            .fetch_one(&self.pool)
            .await?;

        let stored = pending_from_row(row)?;
        let created = stored.id == candidate;
        debug!(?side, price = %price, quantity = %stored.quantity, created, "upserted pending order");

        Ok((stored, created))
    }

    /// Set a pending order's quantity by row id, deleting the row when
    /// `new_quantity` is zero or negative
    pub async fn reduce_or_delete_by_id(
        &self,
        executor: impl SqliteExecutor<'_>,
        side: Side,
        id: OrderId,
        new_quantity: i64,
    ) -> BookResult<()> {
        let table = pending_table(side);

        if new_quantity <= 0 {
            let sql = format!("DELETE FROM {table} WHERE id = ?");
            sqlx::query(&sql).bind(id.to_string()).execute(executor).await?;
        } else {
            let sql = format!("UPDATE {table} SET quantity = ? WHERE id = ?");
            sqlx::query(&sql)
                .bind(new_quantity)
                .bind(id.to_string())
                .execute(executor)
                .await?;
        }

        Ok(())
    }

    /// Set the pending order's quantity at a price level, deleting the row
    /// when `new_quantity` is zero or negative; a no-op when no row rests
    /// at that price
    pub async fn reduce_or_delete_by_price(
        &self,
        executor: impl SqliteExecutor<'_>,
        side: Side,
        price: &Price,
        new_quantity: i64,
    ) -> BookResult<()> {
        let table = pending_table(side);

        if new_quantity <= 0 {
            let sql = format!("DELETE FROM {table} WHERE price = ?");
            sqlx::query(&sql)
                .bind(price.to_string())
                .execute(executor)
                .await?;
        } else {
            let sql = format!("UPDATE {table} SET quantity = ? WHERE price = ?");
            sqlx::query(&sql)
                .bind(new_quantity)
                .bind(price.to_string())
                .execute(executor)
                .await?;
        }

        Ok(())
    }

    /// Remove the pending order at a price level; returns the number of
    /// rows removed (0 or 1)
    pub async fn delete_pending(
        &self,
        executor: impl SqliteExecutor<'_>,
        side: Side,
        price: &Price,
    ) -> BookResult<u64> {
        let sql = format!("DELETE FROM {} WHERE price = ?", pending_table(side));

        let result = sqlx::query(&sql)
            .bind(price.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Append one immutable completed-trade row
    pub async fn record_trade(
        &self,
        executor: impl SqliteExecutor<'_>,
        trade: &Trade,
    ) -> BookResult<()> {
        sqlx::query(
            "INSERT INTO completed_trades (id, price, quantity, executed_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(trade.id.to_string())
        .bind(trade.price.to_string())
        .bind(trade.quantity.get())
        .bind(trade.executed_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Unordered snapshot of one side's pending orders
    pub async fn list_pending(&self, side: Side) -> BookResult<Vec<PendingOrder>> {
        let sql = format!("SELECT id, price, quantity FROM {}", pending_table(side));

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(pending_from_row).collect()
    }

    /// Unordered snapshot of all completed trades
    pub async fn list_trades(&self) -> BookResult<Vec<Trade>> {
        let rows = sqlx::query("SELECT id, price, quantity, executed_at FROM completed_trades")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(trade_from_row).collect()
    }
}

fn pending_from_row(row: SqliteRow) -> BookResult<PendingOrder> {
    let id: String = row.try_get("id")?;
    let price: String = row.try_get("price")?;
    let quantity: i64 = row.try_get("quantity")?;

    Ok(PendingOrder {
        id: id
            .parse()
            .map_err(|e| BookError::Corrupt(format!("order id {id}: {e}")))?,
        price: price
            .parse()
            .map_err(|e| BookError::Corrupt(format!("price {price}: {e}")))?,
        quantity: Quantity::try_new(quantity)
            .map_err(|e| BookError::Corrupt(format!("quantity {quantity}: {e}")))?,
    })
}

fn trade_from_row(row: SqliteRow) -> BookResult<Trade> {
    let id: String = row.try_get("id")?;
    let price: String = row.try_get("price")?;
    let quantity: i64 = row.try_get("quantity")?;
    let executed_at: i64 = row.try_get("executed_at")?;

    Ok(Trade {
        id: id
            .parse()
            .map_err(|e| BookError::Corrupt(format!("trade id {id}: {e}")))?,
        price: price
            .parse()
            .map_err(|e| BookError::Corrupt(format!("price {price}: {e}")))?,
        quantity: Quantity::try_new(quantity)
            .map_err(|e| BookError::Corrupt(format!("quantity {quantity}: {e}")))?,
        executed_at,
    })
}
