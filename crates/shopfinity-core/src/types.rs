//! # Domain Types
//!
//! Core domain types shared by the store and the storefront app.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │  ProductRecord  │   │   Form inputs   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (ProductId) │   │  Registration   │       │
//! │  │  name, email    │   │  title, price   │   │  Login          │       │
//! │  │  phone, address │   │  image          │   │  ProfileUpdate  │       │
//! │  │  dateOfBirth    │   │  category       │   │                 │       │
//! │  │  createdAt      │   │  rating         │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Cart types live in [`crate::cart`], order types in [`crate::order`].  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Records use camelCase keys so the persisted layout matches what the
//! browser storefront wrote (`dateOfBirth`, `createdAt`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A storefront account holder.
///
/// The session store treats this as an opaque key (`id`) plus payload.
/// Credentials never live on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, stable identifier (UUID v4). Keys the per-user records.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_of_birth: Option<NaiveDate>,

    /// When the account was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// First letter of the display name, upper-cased (avatar badge).
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }
}

// =============================================================================
// Product
// =============================================================================

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

/// Customer rating summary attached to catalog products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product as supplied by the catalog collaborator.
///
/// ## Wire Format
/// Matches the public catalog JSON, where `price` is a JSON number:
/// ```json
/// { "id": 1, "title": "Fjallraven Backpack", "price": 109.95,
///   "description": "...", "category": "men's clothing",
///   "image": "https://...", "rating": { "rate": 3.9, "count": 120 } }
/// ```
///
/// The store passes these through unchanged into the cart; it never checks
/// that the product still exists in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    pub id: ProductId,

    pub title: String,

    /// Unit price, non-negative.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub rating: Option<Rating>,
}

// =============================================================================
// Form Inputs
// =============================================================================

/// Sign-up form contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign-in form contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Profile edit form contents.
///
/// Optional fields arrive as strings from the form; blank means "not
/// provided". `date_of_birth` uses the `YYYY-MM-DD` format of a date input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub date_of_birth: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_record_from_catalog_json() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.test/81fPKd-2AYL.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.unwrap().count, 120);
    }

    #[test]
    fn test_product_record_optional_fields_default() {
        let product: ProductRecord =
            serde_json::from_str(r#"{"id": 7, "title": "Ring", "price": 9.99}"#).unwrap();
        assert!(product.image.is_empty());
        assert!(product.description.is_empty());
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_user_uses_camel_case_keys() {
        let user = User {
            id: "u-1".to_string(),
            name: "ada".to_string(),
            email: "ada@example.test".to_string(),
            phone: None,
            address: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-12-10");
        assert!(json.get("createdAt").is_some());
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn test_user_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "u-2",
            "name": "Grace",
            "email": "grace@example.test",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.phone.is_none());
        assert!(user.date_of_birth.is_none());
    }
}
