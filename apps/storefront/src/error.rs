//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfinity                             │
//! │                                                                         │
//! │  UI                          Rust Backend                               │
//! │  ──                          ────────────                               │
//! │                                                                         │
//! │  {"command": "add_to_cart", ...}                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage failed? ─── StoreError::Storage ──────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule violated? ─── CoreError::NotAuthenticated ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok": false, "error": {"code": "NOT_AUTHENTICATED",                   │
//! │                          "message": "Please login to add items to cart"}}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfinity_core::{CoreError, ValidationError};
use shopfinity_store::{AuthError, StorageError, StoreError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMPTY_CART",
///   "message": "Your cart is empty"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart, checkout or profile action without a signed-in user
    NotAuthenticated,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Negative quantity, or one the cart total cannot hold
    InvalidQuantity,

    /// Form input failed validation
    ValidationError,

    /// Unknown email or wrong password
    InvalidCredentials,

    /// Email already registered, or an update for another user
    Conflict,

    /// Unknown product or account
    NotFound,

    /// Storage read/write failed
    StorageError,

    /// Malformed invocation
    BadRequest,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Replaces the message, keeping the code.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthenticated => {
                ApiError::new(ErrorCode::NotAuthenticated, "Please login to continue")
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Your cart is empty"),
            CoreError::InvalidQuantity { requested } if requested < 0 => ApiError::new(
                ErrorCode::InvalidQuantity,
                format!("Quantity cannot be negative (got {})", requested),
            ),
            CoreError::InvalidQuantity { requested } => ApiError::new(
                ErrorCode::InvalidQuantity,
                format!("Quantity {} would exceed the maximum cart total", requested),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Storage write failed");
        ApiError::new(ErrorCode::StorageError, "Could not save your changes")
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Storage(e) => e.into(),
            StoreError::PersistenceRead { key, reason } => {
                tracing::error!(key = %key, reason = %reason, "Unreadable record");
                ApiError::new(ErrorCode::StorageError, "Stored data could not be read")
            }
            StoreError::UserMismatch { .. } => {
                ApiError::new(ErrorCode::Conflict, "Session changed, please sign in again")
            }
        }
    }
}

/// Converts account directory errors to API errors.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            AuthError::EmailTaken { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            AuthError::InvalidCredentials => {
                ApiError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
            }
            AuthError::AccountNotFound { user_id } => ApiError::not_found("Account", &user_id),
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
                ApiError::internal("Could not create account")
            }
            AuthError::Store(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
