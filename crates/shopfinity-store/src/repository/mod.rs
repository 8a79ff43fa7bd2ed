//! # Repository Module
//!
//! Typed records over the key-value substrate.
//!
//! ## Key Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Key                 Value                          Repository          │
//! │  ──────────────────  ─────────────────────────────  ─────────────────   │
//! │  currentUser         User                           SessionRepository   │
//! │  cart_<userId>       [CartLine, ...]                CartRepository      │
//! │  orders_<userId>     [Order, ...] newest first      OrderRepository     │
//! │  mockUsers           [Account, ...]                 AccountRepository   │
//! │                                                                         │
//! │  Absent key ≡ empty value. Malformed value → StoreError::PersistenceRead│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories are stateless; they take the storage by reference so the
//! session store stays the single owner. Writes that must land together are
//! built as `(key, value)` entries and handed to [`Storage::set_many`].

pub mod accounts;
pub mod cart;
pub mod orders;
pub mod session;

pub use accounts::{AccountRepository, StoredAccount};
pub use cart::CartRepository;
pub use orders::OrderRepository;
pub use session::SessionRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StorageResult, StoreError, StoreResult};
use crate::storage::Storage;

// =============================================================================
// Keys
// =============================================================================

/// Pointer to the signed-in user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Mock account list.
pub const ACCOUNTS_KEY: &str = "mockUsers";

/// `cart_<userId>`
pub fn cart_key(user_id: &str) -> String {
    format!("cart_{}", user_id)
}

/// `orders_<userId>`
pub fn orders_key(user_id: &str) -> String {
    format!("orders_{}", user_id)
}

// =============================================================================
// Record Codec
// =============================================================================

/// Decodes the record under `key`. `Ok(None)` when absent.
pub(crate) fn read_record<S, T>(storage: &S, key: &str) -> StoreResult<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.get(key) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::persistence_read(key, e)),
    }
}

/// Encodes `value` as a `(key, value)` entry ready for storage.
pub(crate) fn encode_record<T>(key: String, value: &T) -> StorageResult<(String, String)>
where
    T: Serialize + ?Sized,
{
    Ok((key, serde_json::to_string(value)?))
}
