//! # Account Commands
//!
//! Sign-up, sign-in and profile editing against the mock account directory.
//!
//! ```text
//! register ──► AccountDirectory::register ──► SessionStore::login
//! login    ──► AccountDirectory::authenticate ──► SessionStore::login
//! update_profile ──► AccountDirectory::update_profile
//!                ──► SessionStore::replace_current_user
//! ```

use serde::Serialize;
use shopfinity_core::{LoginForm, ProfileUpdate, RegistrationForm, User};
use tracing::debug;

use super::order::OrderStats;
use super::require_user;
use super::session::SessionResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Profile page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Present after an edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: User,
    /// Avatar letter.
    pub initial: char,
    pub stats: OrderStats,
}

impl ProfileResponse {
    fn build(state: &AppState, user: User, message: Option<&str>) -> Self {
        ProfileResponse {
            message: message.map(str::to_string),
            initial: user.initial(),
            user,
            stats: OrderStats::from_state(state),
        }
    }
}

/// Creates an account and signs it in.
pub fn register(state: &mut AppState, form: RegistrationForm) -> Result<SessionResponse, ApiError> {
    debug!("register command");
    let user = state.store_mut().accounts().register(&form)?;
    state.store_mut().login(user)?;
    Ok(SessionResponse::from_state(state))
}

/// Checks credentials and signs the account in.
pub fn login(state: &mut AppState, form: LoginForm) -> Result<SessionResponse, ApiError> {
    debug!("login command");
    let user = state.store_mut().accounts().authenticate(&form)?;
    state.store_mut().login(user)?;
    Ok(SessionResponse::from_state(state))
}

/// Signed-in user's profile with order statistics.
pub fn get_profile(state: &AppState) -> Result<ProfileResponse, ApiError> {
    debug!("get_profile command");
    let user = require_user(state)?.clone();
    Ok(ProfileResponse::build(state, user, None))
}

/// Saves profile edits for the signed-in user.
pub fn update_profile(state: &mut AppState, update: ProfileUpdate) -> Result<ProfileResponse, ApiError> {
    debug!("update_profile command");
    let user_id = require_user(state)?.id.clone();

    let user = state.store_mut().accounts().update_profile(&user_id, &update)?;
    state.store_mut().replace_current_user(user.clone())?;

    Ok(ProfileResponse::build(state, user, Some("Profile updated successfully")))
}
