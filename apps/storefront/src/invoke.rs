//! # Invoke Protocol
//!
//! One JSON request per line in, one JSON response per line out.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request                                                                │
//! │  {"command": "update_quantity", "args": {"productId": 3, "quantity": 2}}│
//! │  {"command": "get_cart"}                  ◄── no-arg commands           │
//! │                                                                         │
//! │  Response                                                               │
//! │  {"ok": true,  "data": { ... }}                                         │
//! │  {"ok": false, "error": {"code": "EMPTY_CART",                          │
//! │                          "message": "Your cart is empty"}}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line that is not a known command yields `BAD_REQUEST`; the loop keeps
//! going.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shopfinity_core::catalog::ProductFilter;
use shopfinity_core::{LoginForm, ProductId, ProductRecord, ProfileUpdate, RegistrationForm};
use tracing::{debug, warn};

use crate::commands::{account, cart, catalog, order, session};
use crate::error::ApiError;
use crate::state::AppState;

/// A parsed request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Invocation {
    GetSession,
    Logout,
    Register(RegistrationForm),
    Login(LoginForm),
    GetProfile,
    UpdateProfile(ProfileUpdate),
    GetCart,
    AddToCart {
        product: ProductRecord,
    },
    #[serde(rename_all = "camelCase")]
    UpdateQuantity {
        product_id: ProductId,
        quantity: i64,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        product_id: ProductId,
    },
    Checkout,
    GetOrders,
    ListProducts(ProductFilter),
    GetProduct {
        id: ProductId,
    },
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Parses and runs one request line.
pub fn handle_line(state: &mut AppState, line: &str) -> Response {
    let invocation: Invocation = match serde_json::from_str(line) {
        Ok(invocation) => invocation,
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            return Err(ApiError::bad_request(format!("Invalid request: {}", e))).into();
        }
    };

    let result = dispatch(state, invocation);
    if let Err(err) = &result {
        debug!(code = ?err.code, message = %err.message, "Command failed");
    }
    result.into()
}

/// Runs a parsed request against the state.
pub fn dispatch(state: &mut AppState, invocation: Invocation) -> Result<Value, ApiError> {
    match invocation {
        Invocation::GetSession => to_data(session::get_session(state)),
        Invocation::Logout => to_data(session::logout(state)?),
        Invocation::Register(form) => to_data(account::register(state, form)?),
        Invocation::Login(form) => to_data(account::login(state, form)?),
        Invocation::GetProfile => to_data(account::get_profile(state)?),
        Invocation::UpdateProfile(update) => to_data(account::update_profile(state, update)?),
        Invocation::GetCart => to_data(cart::get_cart(state)),
        Invocation::AddToCart { product } => to_data(cart::add_to_cart(state, product)?),
        Invocation::UpdateQuantity {
            product_id,
            quantity,
        } => to_data(cart::update_quantity(state, product_id, quantity)?),
        Invocation::RemoveFromCart { product_id } => {
            to_data(cart::remove_from_cart(state, product_id)?)
        }
        Invocation::Checkout => to_data(order::checkout(state)?),
        Invocation::GetOrders => to_data(order::get_orders(state)?),
        Invocation::ListProducts(filter) => to_data(catalog::list_products(state, filter)),
        Invocation::GetProduct { id } => to_data(catalog::get_product(state, id)?),
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Could not encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::test_state;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn send(state: &mut AppState, request: Value) -> Value {
        let response = handle_line(state, &request.to_string());
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_unit_command_without_args() {
        let mut state = test_state();
        let response = send(&mut state, json!({"command": "get_session"}));
        assert_eq!(response["ok"], true);
        assert_eq!(response["data"]["isAuthenticated"], false);
        assert!(response.get("error").is_none());
    }

    #[test]
    fn test_malformed_line_is_bad_request() {
        let mut state = test_state();
        let response = handle_line(&mut state, "not json");
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ErrorCode::BadRequest);

        let response = send(&mut state, json!({"command": "fly_to_moon"}));
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_shopping_session_over_the_wire() {
        let mut state = test_state();

        let response = send(
            &mut state,
            json!({"command": "register", "args": {
                "name": "Ada", "email": "ada@example.test",
                "password": "secret1", "confirmPassword": "secret1"
            }}),
        );
        assert_eq!(response["ok"], true);

        let response = send(
            &mut state,
            json!({"command": "add_to_cart", "args": {"product": {
                "id": 42, "title": "Lamp", "price": 60.0, "category": "home"
            }}}),
        );
        assert_eq!(response["data"]["message"], "Item added to cart");

        let response = send(
            &mut state,
            json!({"command": "update_quantity", "args": {"productId": 42, "quantity": 2}}),
        );
        assert_eq!(response["data"]["cart"]["totals"]["total"], 120.0);
        assert_eq!(response["data"]["cart"]["totals"]["shipping"], 0.0);

        let response = send(&mut state, json!({"command": "checkout"}));
        assert_eq!(response["data"]["message"], "Order placed successfully!");
        assert_eq!(response["data"]["order"]["status"], "Processing");

        let response = send(&mut state, json!({"command": "get_orders"}));
        assert_eq!(response["data"]["stats"]["orderCount"], 1);
    }

    #[test]
    fn test_out_of_range_prices_and_quantities_are_rejected() {
        let mut state = test_state();
        send(
            &mut state,
            json!({"command": "register", "args": {
                "name": "Ada", "email": "ada@example.test",
                "password": "secret1", "confirmPassword": "secret1"
            }}),
        );

        let response = send(
            &mut state,
            json!({"command": "add_to_cart", "args": {"product": {
                "id": 7, "title": "Refund", "price": -500.0, "category": "misc"
            }}}),
        );
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "BAD_REQUEST");
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("must not be negative"));

        let response = send(
            &mut state,
            json!({"command": "add_to_cart", "args": {"product": {
                "id": 8, "title": "Yacht", "price": 50000000.0, "category": "misc"
            }}}),
        );
        assert_eq!(response["ok"], true);

        let response = send(
            &mut state,
            json!({"command": "update_quantity", "args": {"productId": 8, "quantity": 4_000_000_000_i64}}),
        );
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "INVALID_QUANTITY");

        let response = send(&mut state, json!({"command": "get_cart"}));
        assert_eq!(response["data"]["itemCount"], 1);
        assert_eq!(response["data"]["totals"]["total"], 50000000.0);
    }

    #[test]
    fn test_error_envelope() {
        let mut state = test_state();
        let response = send(&mut state, json!({"command": "checkout"}));
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "NOT_AUTHENTICATED");
        assert!(response.get("data").is_none());
    }

    #[test]
    fn test_list_products_with_filter_args() {
        let mut state = test_state();
        let response = send(
            &mut state,
            json!({"command": "list_products", "args": {"category": "jewelery"}}),
        );
        assert_eq!(response["ok"], true);
        assert_eq!(response["data"]["total"], 2);
    }
}
