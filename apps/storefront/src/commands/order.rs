//! # Order Commands
//!
//! Checkout and order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('checkout')                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Signed in?              no ──► NOT_AUTHENTICATED            │    │
//! │  │  2. Cart has lines?         no ──► EMPTY_CART                   │    │
//! │  │  3. SessionStore::checkout  (cart + history in one write)       │    │
//! │  │  4. Return order and the now-empty cart                         │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfinity_core::{Money, Order};
use tracing::debug;

use super::cart::CartResponse;
use super::require_user;
use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

/// Lifetime figures shown on the profile and orders pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub order_count: usize,

    #[serde(with = "shopfinity_core::money::decimal")]
    pub total_spent: Money,

    pub formatted_total_spent: String,

    pub items_purchased: u64,
}

impl OrderStats {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let history = state.store().order_history();
        let total_spent = history.lifetime_spend();
        OrderStats {
            order_count: history.len(),
            formatted_total_spent: state.config().format_money(total_spent),
            total_spent,
            items_purchased: history.items_purchased(),
        }
    }
}

/// Placed order plus the emptied cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    pub order: Order,
    pub cart: CartResponse,
}

/// Order history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub stats: OrderStats,
}

/// Places an order for everything in the cart.
pub fn checkout(state: &mut AppState) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");

    let order = state.store_mut().checkout().map_err(|e| {
        let err = ApiError::from(e);
        match err.code {
            ErrorCode::NotAuthenticated => err.with_message("Please login to checkout"),
            _ => err,
        }
    })?;

    Ok(CheckoutResponse {
        message: "Order placed successfully!".to_string(),
        order,
        cart: CartResponse::from_state(state),
    })
}

/// Signed-in user's orders.
pub fn get_orders(state: &AppState) -> Result<OrdersResponse, ApiError> {
    debug!("get_orders command");
    require_user(state)?;

    Ok(OrdersResponse {
        orders: state.store().order_history().orders().to_vec(),
        stats: OrderStats::from_state(state),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, update_quantity};
    use crate::commands::session::logout;
    use crate::commands::test_support::{sign_up, test_state};
    use shopfinity_core::OrderStatus;

    #[test]
    fn test_checkout_requires_login() {
        let mut state = test_state();
        let err = checkout(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_empty_cart_checkout() {
        let mut state = test_state();
        sign_up(&mut state, "ada@example.test");

        let err = checkout(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Your cart is empty");
        assert!(get_orders(&state).unwrap().orders.is_empty());
    }

    #[test]
    fn test_checkout_places_order_and_clears_cart() {
        let mut state = test_state();
        sign_up(&mut state, "ada@example.test");
        let first = state.catalog()[0].clone();
        let second = state.catalog()[1].clone();
        add_to_cart(&mut state, first.clone()).unwrap();
        add_to_cart(&mut state, second.clone()).unwrap();
        update_quantity(&mut state, second.id, 2).unwrap();

        let placed = checkout(&mut state).unwrap();
        assert_eq!(placed.message, "Order placed successfully!");
        assert_eq!(placed.order.status, OrderStatus::Processing);
        assert_eq!(placed.order.subtotal, first.price + second.price * 2);
        assert!(placed.cart.items.is_empty());

        let orders = get_orders(&state).unwrap();
        assert_eq!(orders.orders.len(), 1);
        assert_eq!(orders.orders[0].id, placed.order.id);
        assert_eq!(orders.stats.order_count, 1);
        assert_eq!(orders.stats.items_purchased, 3);
        assert_eq!(orders.stats.total_spent, placed.order.total);
    }

    #[test]
    fn test_newest_order_first() {
        let mut state = test_state();
        sign_up(&mut state, "ada@example.test");
        let product = state.catalog()[0].clone();

        add_to_cart(&mut state, product.clone()).unwrap();
        let older = checkout(&mut state).unwrap().order;
        add_to_cart(&mut state, product).unwrap();
        let newer = checkout(&mut state).unwrap().order;

        let orders = get_orders(&state).unwrap().orders;
        assert_eq!(orders[0].id, newer.id);
        assert_eq!(orders[1].id, older.id);
    }

    #[test]
    fn test_orders_hidden_after_logout() {
        let mut state = test_state();
        sign_up(&mut state, "ada@example.test");
        logout(&mut state).unwrap();

        let err = get_orders(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }
}
