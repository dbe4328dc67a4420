//! Validation error taxonomy
//!
//! Rejections raised before any input reaches storage, using thiserror

use thiserror::Error;

/// Order validation errors
///
/// Raised by the `Price` and `Quantity` constructors, so malformed values
/// cannot be represented past the intake boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_display() {
        let err = OrderError::InvalidPrice("-3".to_string());
        assert_eq!(err.to_string(), "Invalid price: -3");
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = OrderError::InvalidQuantity("0".to_string());
        assert_eq!(err.to_string(), "Invalid quantity: 0");
    }
}
