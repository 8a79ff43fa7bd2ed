//! # Storefront Commands
//!
//! Everything the UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── session.rs  ◄─── Session snapshot, logout
//! ├── account.rs  ◄─── Register, login, profile
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── order.rs    ◄─── Checkout, order history
//! └── catalog.rs  ◄─── Product listing and lookup
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  {"command": "add_to_cart", "args": {"product": {...}}}                 │
//! │         │                                                               │
//! │         │ (one JSON line on stdin, see `invoke`)                        │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn add_to_cart(                                                        │
//! │      state: &mut AppState,   ◄── Owned by the invoke loop               │
//! │      product: ProductRecord, ◄── From args                              │
//! │  ) -> Result<CartMutation, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok": true, "data": {"message": "Item added to cart", "cart": ...}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never pick toast wording inside the store; the store returns
//! outcomes and the messages are chosen here.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod session;

use shopfinity_core::{CoreError, User};

use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in user, or `NOT_AUTHENTICATED`.
fn require_user(state: &AppState) -> Result<&User, ApiError> {
    state
        .store()
        .current_user()
        .ok_or_else(|| CoreError::NotAuthenticated.into())
}

#[cfg(test)]
pub(crate) mod test_support {
    use shopfinity_core::RegistrationForm;
    use shopfinity_store::MemoryStorage;

    use super::account::register;
    use super::session::SessionResponse;
    use crate::state::{AppConfig, AppState, DataLocation};

    /// In-memory state over an eight-product demo catalog.
    pub fn test_state() -> AppState {
        let config = AppConfig {
            data: DataLocation::Memory,
            ..AppConfig::default()
        };
        AppState::with_parts(
            config,
            Box::new(MemoryStorage::new()),
            crate::demo::demo_catalog(8),
        )
    }

    pub fn sign_up(state: &mut AppState, email: &str) -> SessionResponse {
        register(
            state,
            RegistrationForm {
                name: "Ada Lovelace".to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            },
        )
        .unwrap()
    }
}
