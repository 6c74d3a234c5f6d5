//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  REPL line ──► Command Function ──► Result<T, ApiError>                 │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  Backend down? ─── ClientError::Network ─────────┐                      │
//! │  Wrong password? ─ ClientError::Http(401) ───────┤                      │
//! │  Unknown product? ─ CoreError::ProductNotFound ──┼──► ApiError          │
//! │  Checkout refused? ─ ClientError::Checkout ──────┘       │              │
//! │                                                          ▼              │
//! │                                        "error [AUTH_ERROR] ..."         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error ends the session; the REPL prints it and reads the next line.

use fastfood_client::ClientError;
use fastfood_core::CoreError;
use serde::Serialize;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or command argument
    NotFound,

    /// Bad input or bad configuration
    ValidationError,

    /// Backend unreachable or answered with garbage
    NetworkError,

    /// Credentials rejected
    AuthError,

    /// Payment client unavailable or checkout refused
    PaymentError,

    /// Token file could not be read or written
    StorageError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_) => ApiError::validation(err.to_string()),
            ClientError::Http { .. } if err.is_unauthorized() => {
                ApiError::new(ErrorCode::AuthError, "Invalid credentials")
            }
            ClientError::Http { status, body } => ApiError::new(
                ErrorCode::NetworkError,
                if body.is_empty() {
                    format!("Server answered HTTP {}", status)
                } else {
                    format!("Server answered HTTP {}: {}", status, body)
                },
            ),
            ClientError::Network(e) => {
                ApiError::new(ErrorCode::NetworkError, format!("Server unreachable: {}", e))
            }
            ClientError::Decode(e) => ApiError::new(
                ErrorCode::NetworkError,
                format!("Unexpected response from server: {}", e),
            ),
            ClientError::Storage(e) => {
                ApiError::new(ErrorCode::StorageError, format!("Could not store token: {}", e))
            }
            ClientError::PaymentUnavailable(_) | ClientError::Checkout(_) => {
                ApiError::new(ErrorCode::PaymentError, err.to_string())
            }
            ClientError::Core(e) => ApiError::from(e),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidPrice { .. } => ApiError::validation(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
