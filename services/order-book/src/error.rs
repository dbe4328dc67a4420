//! Error taxonomy for the order book core

use thiserror::Error;
use types::errors::OrderError;
use types::numeric::Price;

/// Errors surfaced by book operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BookError {
    /// Malformed input, rejected before touching storage
    #[error("Validation error: {0}")]
    Validation(#[from] OrderError),

    /// No pending sell order exists at the requested price
    #[error("No pending sell order at price {price}")]
    NoMatch { price: Price },

    /// Underlying persistence failure; any in-flight transaction has been
    /// rolled back
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A stored row failed to parse back into domain types
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub type BookResult<T> = Result<T, BookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_display() {
        let err = BookError::NoMatch {
            price: "100.5".parse().unwrap(),
        };
        assert_eq!(err.to_string(), "No pending sell order at price 100.5");
    }

    #[test]
    fn test_validation_error_wraps_order_error() {
        let err: BookError = OrderError::InvalidQuantity("0".to_string()).into();
        assert!(matches!(err, BookError::Validation(_)));
    }
}
