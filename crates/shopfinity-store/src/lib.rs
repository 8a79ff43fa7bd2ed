//! # shopfinity-store: Session & Persistence Layer for Shopfinity
//!
//! This crate keeps the storefront session (signed-in user, cart, order
//! history) consistent across login, logout and reloads, mirroring it into
//! a local key-value store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfinity Data Flow                             │
//! │                                                                         │
//! │  Storefront command (add_to_cart)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopfinity-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SessionStore  │    │  Repositories │    │   Storage    │  │   │
//! │  │   │ (session.rs)  │    │ (repository/) │    │  (storage/)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ user, cart,   │───►│ Session, Cart │───►│ Memory       │  │   │
//! │  │   │ orders        │    │ Order, Account│    │ File (JSON)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │          │                                                      │   │
//! │  │          └──► AccountDirectory (auth.rs, mockUsers)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     storage.json                                │   │
//! │  │   ~/.local/share/shopfinity/storage.json                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`session`] - The session & cart store
//! - [`auth`] - Mock account directory
//! - [`repository`] - Typed records and the key layout
//! - [`storage`] - Key-value backends
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust
//! use shopfinity_core::{Money, ProductId, ProductRecord, User};
//! use shopfinity_store::{MemoryStorage, SessionStore};
//!
//! let mut store = SessionStore::new(MemoryStorage::new());
//! store.restore_session();
//!
//! store.login(User {
//!     id: "u1".into(),
//!     name: "Ada".into(),
//!     email: "ada@example.test".into(),
//!     phone: None,
//!     address: None,
//!     date_of_birth: None,
//!     created_at: chrono::Utc::now(),
//! })?;
//!
//! store.add_to_cart(&ProductRecord {
//!     id: ProductId(1),
//!     title: "Backpack".into(),
//!     price: Money::from_cents(3000),
//!     image: String::new(),
//!     description: String::new(),
//!     category: String::new(),
//!     rating: None,
//! })?;
//!
//! let order = store.checkout()?;
//! assert_eq!(order.total.cents(), 4000);
//! # Ok::<(), shopfinity_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod repository;
pub mod session;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::AccountDirectory;
pub use error::{AuthError, StorageError, StoreError, StoreResult};
pub use session::{RestoreOutcome, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
