//! # Mock Account Directory
//!
//! Sign-up, sign-in and profile edits over the `mockUsers` record.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  register(form) ──► validate ──► email free? ──► hash ──► mockUsers    │
//! │                                                           │             │
//! │                                                           ▼             │
//! │                                                  User ──► store.login  │
//! │                                                                         │
//! │  authenticate(form) ──► find by email ──► verify hash ──► User         │
//! │                              │ miss            │ mismatch               │
//! │                              └───────┬─────────┘                        │
//! │                                      ▼                                  │
//! │                             InvalidCredentials                          │
//! │                                                                         │
//! │  update_profile(id, form) ──► validate ──► email free? ──► mockUsers   │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                   User ──► store.replace_current_user  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This stands in for a real identity provider. Hashes keep plain passwords
//! out of the storage file, but the directory is not a security boundary.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use shopfinity_core::validation::{validate_login, validate_profile, validate_registration};
use shopfinity_core::{LoginForm, ProfileUpdate, RegistrationForm, User};

use crate::error::{AuthError, AuthResult};
use crate::repository::{AccountRepository, StoredAccount};
use crate::storage::Storage;

/// Account operations over a borrowed storage.
///
/// ## Usage
/// ```rust
/// use shopfinity_core::RegistrationForm;
/// use shopfinity_store::{AccountDirectory, MemoryStorage};
///
/// let mut storage = MemoryStorage::new();
/// let mut accounts = AccountDirectory::new(&mut storage);
/// let user = accounts
///     .register(&RegistrationForm {
///         name: "Ada".into(),
///         email: "ada@example.test".into(),
///         password: "secret1".into(),
///         confirm_password: "secret1".into(),
///     })
///     .unwrap();
/// assert_eq!(user.email, "ada@example.test");
/// ```
pub struct AccountDirectory<'a, S: Storage + ?Sized> {
    storage: &'a mut S,
}

impl<'a, S: Storage + ?Sized> AccountDirectory<'a, S> {
    pub fn new(storage: &'a mut S) -> Self {
        AccountDirectory { storage }
    }

    /// Creates an account and returns its user.
    pub fn register(&mut self, form: &RegistrationForm) -> AuthResult<User> {
        let valid = validate_registration(form)?;

        let mut accounts = AccountRepository::load(&*self.storage)?;
        if find_by_email(&accounts, &valid.email).is_some() {
            return Err(AuthError::EmailTaken { email: valid.email });
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: valid.name,
            email: valid.email,
            phone: None,
            address: None,
            date_of_birth: None,
            created_at: Utc::now(),
        };

        accounts.push(StoredAccount {
            user: user.clone(),
            password_hash: hash_password(&form.password)?,
        });
        AccountRepository::save(&mut *self.storage, &accounts)?;

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// Checks an email/password pair.
    pub fn authenticate(&self, form: &LoginForm) -> AuthResult<User> {
        validate_login(form)?;

        let accounts = AccountRepository::load(&*self.storage)?;
        let account = match find_by_email(&accounts, form.email.trim()) {
            Some(account) => account,
            None => {
                debug!("Sign-in for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(&form.password, &account.password_hash) {
            debug!(user_id = %account.user.id, "Sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account.user.clone())
    }

    /// Applies a profile edit and returns the updated user.
    pub fn update_profile(&mut self, user_id: &str, update: &ProfileUpdate) -> AuthResult<User> {
        let profile = validate_profile(update)?;

        let mut accounts = AccountRepository::load(&*self.storage)?;

        if let Some(other) = find_by_email(&accounts, &profile.email) {
            if other.user.id != user_id {
                return Err(AuthError::EmailTaken {
                    email: profile.email,
                });
            }
        }

        let account = accounts
            .iter_mut()
            .find(|a| a.user.id == user_id)
            .ok_or_else(|| AuthError::AccountNotFound {
                user_id: user_id.to_string(),
            })?;

        account.user.name = profile.name;
        account.user.email = profile.email;
        account.user.phone = profile.phone;
        account.user.address = profile.address;
        account.user.date_of_birth = profile.date_of_birth;
        let user = account.user.clone();

        AccountRepository::save(&mut *self.storage, &accounts)?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Looks up an account's user by id.
    pub fn find(&self, user_id: &str) -> AuthResult<Option<User>> {
        let accounts = AccountRepository::load(&*self.storage)?;
        Ok(accounts
            .into_iter()
            .find(|a| a.user.id == user_id)
            .map(|a| a.user))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn find_by_email<'a>(accounts: &'a [StoredAccount], email: &str) -> Option<&'a StoredAccount> {
    let email = email.to_lowercase();
    accounts.iter().find(|a| a.user.email.to_lowercase() == email)
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
