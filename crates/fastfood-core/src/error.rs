//! # Error Types
//!
//! Domain-specific error types for fastfood-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fastfood-core errors (this file)                                      │
//! │  └── CoreError        - Domain lookups and price parsing               │
//! │                                                                         │
//! │  fastfood-client errors (separate crate)                               │
//! │  └── ClientError      - Network, storage and payment failures          │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the REPL shows                            │
//! │                                                                         │
//! │  Flow: CoreError → ClientError → ApiError → terminal                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Product id is not part of the loaded catalog.
    ///
    /// ## When This Occurs
    /// - The catalog is still pending or failed to load
    /// - The id was mistyped
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A price could not be turned into integer cents.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = CoreError::InvalidPrice {
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid price 'abc': not a number");
    }
}
