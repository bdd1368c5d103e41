//! # Error Types
//!
//! Domain-specific error types for workshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  workshop-core errors (this file)                                       │
//! │  └── CoreError        - Type coercion and amount range failures         │
//! │                                                                         │
//! │  workshop-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures (wraps CoreError)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no validation error: empty names and negative
//! quantities are accepted and stored as typed.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Text from a price field could not be read as an amount.
    #[error("Invalid amount: '{input}'")]
    InvalidAmount { input: String },

    /// A line total or order total does not fit in `i64` cents.
    #[error("Amount out of range")]
    AmountOutOfRange,

    /// A quantity cannot be negated into a stock movement.
    #[error("Quantity out of range: {quantity}")]
    QuantityOutOfRange { quantity: i64 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount {
            input: "12a".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid amount: '12a'");
        assert_eq!(CoreError::AmountOutOfRange.to_string(), "Amount out of range");
        assert_eq!(
            CoreError::QuantityOutOfRange { quantity: i64::MIN }.to_string(),
            format!("Quantity out of range: {}", i64::MIN)
        );
    }
}
