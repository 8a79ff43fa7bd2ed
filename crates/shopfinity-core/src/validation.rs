//! # Validation Module
//!
//! Form validation for the account flows.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (UI collaborator)                                       │
//! │  └── Immediate feedback on blank fields                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                               │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Account directory                                            │
//! │  └── Email uniqueness                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator reports the first failing field only.
//!
//! ## Usage
//! ```rust
//! use shopfinity_core::types::RegistrationForm;
//! use shopfinity_core::validation::validate_registration;
//!
//! let form = RegistrationForm {
//!     name: "Ada".into(),
//!     email: "ada@example.test".into(),
//!     password: "secret1".into(),
//!     confirm_password: "secret1".into(),
//! };
//! assert!(validate_registration(&form).is_ok());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{LoginForm, ProfileUpdate, RegistrationForm};
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted display name.
const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted email address.
const MAX_EMAIL_LENGTH: usize = 254;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Validates an email address and returns it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one `@`, with something on both sides
/// - No whitespace
///
/// ## Example
/// ```rust
/// use shopfinity_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.test").is_ok());
/// assert!(validate_email("ada.example.test").is_err());
/// assert!(validate_email("@example.test").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format("email", "must not contain spaces"));
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next();
    match (domain, parts.next()) {
        (Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::invalid_format(
            "email",
            "must look like name@domain",
        )),
    }
}

/// Validates a new password.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date-of-birth input. Blank means none.
pub fn validate_date_of_birth(input: &str) -> ValidationResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::invalid_format("date of birth", "expected YYYY-MM-DD"))
}

fn optional(input: &str) -> Option<String> {
    let input = input.trim();
    (!input.is_empty()).then(|| input.to_string())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Cleaned registration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
}

/// Validates the sign-up form.
///
/// ## Rules (checked in order)
/// 1. All four fields filled in
/// 2. Email well-formed
/// 3. Password and confirmation match
/// 4. Password at least [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<ValidRegistration> {
    if form.name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }
    if form.email.trim().is_empty() {
        return Err(ValidationError::required("email"));
    }
    if form.password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    if form.confirm_password.is_empty() {
        return Err(ValidationError::required("password confirmation"));
    }

    let name = validate_name(&form.name)?;
    let email = validate_email(&form.email)?;

    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "password confirmation".to_string(),
        });
    }

    validate_password(&form.password)?;

    Ok(ValidRegistration { name, email })
}

/// Validates the sign-in form. Only presence is checked; credentials are
/// the directory's job.
pub fn validate_login(form: &LoginForm) -> ValidationResult<()> {
    if form.email.trim().is_empty() {
        return Err(ValidationError::required("email"));
    }
    if form.password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Cleaned profile fields, ready to apply to a [`crate::types::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Validates the profile edit form.
pub fn validate_profile(update: &ProfileUpdate) -> ValidationResult<ValidProfile> {
    Ok(ValidProfile {
        name: validate_name(&update.name)?,
        email: validate_email(&update.email)?,
        phone: optional(&update.phone),
        address: optional(&update.address),
        date_of_birth: validate_date_of_birth(&update.date_of_birth)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
