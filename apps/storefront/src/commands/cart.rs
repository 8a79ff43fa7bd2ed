//! # Cart Commands
//!
//! Cart manipulation for the signed-in user.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │ History  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout                           │
//! │                   update_quantity   (order.rs)                         │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   quantity 0 ──────────────────────►                   │
//! │                                                      (line removed)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A guest sees an empty cart; every mutation requires a signed-in user.

use serde::Serialize;
use shopfinity_core::{AddOutcome, CartLine, OrderTotals, ProductId, ProductRecord, QuantityChange};
use tracing::debug;

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

/// Cart contents with totals.
///
/// ## Serialization
/// ```json
/// { "items": [ { "id": 1, "title": "...", "price": 50.0, "image": "...", "quantity": 2 } ],
///   "itemCount": 2,
///   "totals": { "subtotal": 100.0, "shipping": 10.0, "total": 110.0 },
///   "formattedTotal": "$110.00" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    /// Σ quantities.
    pub item_count: u64,
    pub totals: OrderTotals,
    pub formatted_total: String,
}

impl CartResponse {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let store = state.store();
        let totals = store.cart_totals();
        CartResponse {
            items: store.cart().lines().to_vec(),
            item_count: store.cart_count(),
            formatted_total: state.config().format_money(totals.total),
            totals,
        }
    }
}

/// Result of a cart mutation: toast text plus the updated cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutation {
    pub message: String,
    pub cart: CartResponse,
}

impl CartMutation {
    fn new(state: &AppState, message: &str) -> Self {
        CartMutation {
            message: message.to_string(),
            cart: CartResponse::from_state(state),
        }
    }
}

/// Current cart contents.
pub fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from_state(state)
}

/// Adds one unit of `product`.
///
/// ## Behavior
/// - Already in cart: quantity + 1
/// - Not in cart: new line with quantity 1
/// - Title, price and image are frozen at this moment
pub fn add_to_cart(state: &mut AppState, product: ProductRecord) -> Result<CartMutation, ApiError> {
    debug!(product_id = %product.id, "add_to_cart command");

    let outcome = state.store_mut().add_to_cart(&product).map_err(|e| {
        let err = ApiError::from(e);
        if err.code == ErrorCode::NotAuthenticated {
            err.with_message("Please login to add items to cart")
        } else {
            err
        }
    })?;

    let message = match outcome {
        AddOutcome::Created => "Item added to cart",
        AddOutcome::Incremented { .. } => "Item quantity updated in cart",
    };
    Ok(CartMutation::new(state, message))
}

/// Sets a line's quantity.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Negative quantity, or one past the cart ceiling: `INVALID_QUANTITY`,
///   cart unchanged
/// - Product not in cart: nothing changes
pub fn update_quantity(
    state: &mut AppState,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartMutation, ApiError> {
    debug!(product_id = %product_id, quantity, "update_quantity command");

    let change = state.store_mut().update_quantity(product_id, quantity)?;
    let message = match change {
        QuantityChange::Updated => "Item quantity updated in cart",
        QuantityChange::Removed => "Item removed from cart",
        QuantityChange::NotInCart => "Item is not in your cart",
    };
    Ok(CartMutation::new(state, message))
}

/// Removes a line.
pub fn remove_from_cart(state: &mut AppState, product_id: ProductId) -> Result<CartMutation, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let message = if state.store_mut().remove_from_cart(product_id)? {
        "Item removed from cart"
    } else {
        "Item is not in your cart"
    };
    Ok(CartMutation::new(state, message))
}
