//! Order book core
//!
//! Exact-price order matching over durable storage. Orders rest in the
//! book at one row per price per side; a match consumes the pending sell
//! order at the buyer's exact price and appends an immutable completed
//! trade.
//!
//! **Key invariants:**
//! - At most one pending row per distinct price per side
//! - Completed trades are append-only
//! - Every match commits atomically or not at all
//! - Stored prices and quantities are strictly positive

pub mod error;
pub mod intake;
pub mod matcher;
pub mod query;
pub mod store;

pub use error::{BookError, BookResult};
pub use intake::{submit, SubmitResult};
pub use matcher::{match_orders, MatchReport, Settlement};
pub use store::OrderBookStore;
