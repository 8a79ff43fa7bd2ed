//! # Error Types
//!
//! Domain-specific error types for shopfinity-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfinity-core errors (this file)                                    │
//! │  ├── CoreError        - Session/cart rule violations                   │
//! │  └── ValidationError  - Form and input validation failures             │
//! │                                                                         │
//! │  shopfinity-store errors (separate crate)                              │
//! │  ├── StorageError     - Key-value backend failures                     │
//! │  ├── StoreError       - Session store operation failures               │
//! │  └── AuthError        - Mock account directory failures                │
//! │                                                                         │
//! │  Storefront app errors                                                 │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable. A failed operation never leaves the session
//! half-updated, so callers can surface the message and carry on.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Session and cart rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A cart or checkout action was attempted with no active user.
    ///
    /// ## User Workflow
    /// ```text
    /// Guest clicks "Add to cart"
    ///      │
    ///      ▼
    /// add_to_cart() → NotAuthenticated
    ///      │
    ///      ▼
    /// UI shows: "Please login to add items to cart"
    /// ```
    #[error("No user is signed in")]
    NotAuthenticated,

    /// Checkout was attempted with zero cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A negative quantity was requested, or one that would push the cart
    /// subtotal past `cart::MAX_SUBTOTAL`.
    #[error("Invalid quantity: {requested}")]
    InvalidQuantity { requested: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the registration, login and profile forms and by value parsing
/// at the configuration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed email, unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
