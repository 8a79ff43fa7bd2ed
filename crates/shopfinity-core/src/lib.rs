//! # shopfinity-core: Pure Domain Logic for the Shopfinity Storefront
//!
//! Cart math, order snapshots, shipping rules, form validation and catalog
//! filtering as plain functions over plain data. Nothing here touches
//! storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Shopfinity Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI collaborators                             │   │
//! │  │    Listing ──► Cart ──► Checkout ──► Order history / Profile    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON invocations                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront commands                          │   │
//! │  │    login, add_to_cart, update_quantity, checkout, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          shopfinity-store (session store + key-value)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfinity-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │  order   │ │ catalog │ │   │
//! │  │   │  User   │ │  Money  │ │  Cart   │ │  Order   │ │ filter  │ │   │
//! │  │   │ Product │ │ decimal │ │CartLine │ │ History  │ │         │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, ProductRecord, form inputs)
//! - [`money`] - Money type with integer cents
//! - [`cart`] - Cart and cart lines
//! - [`order`] - Orders, shipping policy, order history, order ids
//! - [`catalog`] - Listing filters
//! - [`validation`] - Form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfinity_core::cart::Cart;
//! use shopfinity_core::order::ShippingPolicy;
//! use shopfinity_core::types::{ProductId, ProductRecord};
//! use shopfinity_core::Money;
//!
//! let backpack = ProductRecord {
//!     id: ProductId(1),
//!     title: "Backpack".into(),
//!     price: Money::from_cents(6000),
//!     image: String::new(),
//!     description: String::new(),
//!     category: String::new(),
//!     rating: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_product(&backpack).unwrap();
//! cart.add_product(&backpack).unwrap();
//!
//! // 60.00 × 2 = 120.00, over the free shipping threshold
//! let totals = cart.totals(&ShippingPolicy::default());
//! assert_eq!(totals.total.cents(), 12000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLine, QuantityChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderHistory, OrderIdGenerator, OrderStatus, OrderTotals, ShippingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotals strictly above this ship free (100.00).
pub const FREE_SHIPPING_OVER: Money = Money::from_cents(10_000);

/// Flat shipping fee at or below the threshold (10.00).
pub const FLAT_SHIPPING_FEE: Money = Money::from_cents(1_000);

/// Default price ceiling of the listing filter (1000.00).
pub const DEFAULT_MAX_PRICE: Money = Money::from_cents(100_000);

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;
