//! # Session Commands
//!
//! What the header needs on every render: who is signed in and the cart
//! badge count.

use serde::Serialize;
use shopfinity_core::User;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Session snapshot.
///
/// ## Serialization
/// ```json
/// { "user": { "id": "...", "name": "Ada", ... },
///   "isAuthenticated": true, "authChecked": true, "cartCount": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub is_authenticated: bool,

    /// False only before the startup restore has run.
    pub auth_checked: bool,

    /// Σ quantities across cart lines.
    pub cart_count: u64,
}

impl SessionResponse {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let store = state.store();
        SessionResponse {
            user: store.current_user().cloned(),
            is_authenticated: store.is_authenticated(),
            auth_checked: store.auth_checked(),
            cart_count: store.cart_count(),
        }
    }
}

/// Current session.
pub fn get_session(state: &AppState) -> SessionResponse {
    debug!("get_session command");
    SessionResponse::from_state(state)
}

/// Signs out after flushing cart and orders.
///
/// Signing out with nobody signed in is a no-op. If the flush fails the
/// user stays signed in.
pub fn logout(state: &mut AppState) -> Result<SessionResponse, ApiError> {
    debug!("logout command");
    state.store_mut().logout()?;
    Ok(SessionResponse::from_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::test_state;

    #[test]
    fn test_anonymous_session() {
        let state = test_state();
        let session = get_session(&state);
        assert!(session.user.is_none());
        assert!(!session.is_authenticated);
        assert!(session.auth_checked);
        assert_eq!(session.cart_count, 0);
    }

    #[test]
    fn test_logout_without_user_is_noop() {
        let mut state = test_state();
        let session = logout(&mut state).unwrap();
        assert!(!session.is_authenticated);
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let state = test_state();
        let json = serde_json::to_value(get_session(&state)).unwrap();
        assert_eq!(json["isAuthenticated"], false);
        assert_eq!(json["authChecked"], true);
        assert_eq!(json["cartCount"], 0);
    }
}
