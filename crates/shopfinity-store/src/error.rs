//! # Store Error Types
//!
//! Error types for storage, session and account operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError ← backend failures (write, rename, encode)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError ← adds CoreError, malformed records, user mismatch         │
//! │       │                                                                 │
//! │       ├──► AuthError ← account directory failures                      │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← serialized for the UI                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use shopfinity_core::{CoreError, ValidationError};
use thiserror::Error;

// =============================================================================
// Storage Error
// =============================================================================

/// Key-value backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Parent directory can't be created
    /// - Disk full or read-only
    /// - Rename of the temp file fails
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record or the storage document could not be encoded.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// The backend refused the write.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Encode(err.to_string())
    }
}

/// Result type for storage backends.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Store Error
// =============================================================================

/// Session store failures.
///
/// Every variant leaves the in-memory session exactly as it was before the
/// failed call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the operation (not signed in, empty cart, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persisted record could not be decoded.
    ///
    /// ## When This Occurs
    /// - Hand-edited storage file
    /// - Record written by an incompatible version
    ///
    /// Session loads recover from this by resetting the record.
    #[error("Malformed record '{key}': {reason}")]
    PersistenceRead { key: String, reason: String },

    /// The backend failed to write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A user update targeted someone other than the active user.
    #[error("User mismatch: active user is {active}, update is for {requested}")]
    UserMismatch { active: String, requested: String },
}

impl StoreError {
    pub fn persistence_read(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::PersistenceRead {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for session store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Auth Error
// =============================================================================

/// Mock account directory failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another account already uses this email.
    #[error("An account with email '{email}' already exists")]
    EmailTaken { email: String },

    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No account with this id.
    #[error("Account not found: {user_id}")]
    AccountNotFound { user_id: String },

    /// Hashing the password failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Reading or writing the account list failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Store(StoreError::Storage(err))
    }
}

/// Result type for account directory operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through_message() {
        let err: StoreError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_persistence_read_names_key() {
        let err = StoreError::persistence_read("cart_u1", "expected a sequence");
        assert_eq!(
            err.to_string(),
            "Malformed record 'cart_u1': expected a sequence"
        );
    }

    #[test]
    fn test_storage_error_converts_into_auth_error() {
        let err: AuthError = StorageError::Unavailable("quota exceeded".into()).into();
        assert!(matches!(err, AuthError::Store(StoreError::Storage(_))));
    }
}
