//! `cart_<userId>` records.

use shopfinity_core::Cart;

use super::{cart_key, encode_record, read_record};
use crate::error::{StorageResult, StoreResult};
use crate::storage::Storage;

/// Per-user cart records.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartRepository;

impl CartRepository {
    /// Loads a user's cart. Absent ≡ empty.
    pub fn load<S: Storage + ?Sized>(storage: &S, user_id: &str) -> StoreResult<Cart> {
        Ok(read_record(storage, &cart_key(user_id))?.unwrap_or_default())
    }

    /// Entry for a combined write.
    pub fn entry(user_id: &str, cart: &Cart) -> StorageResult<(String, String)> {
        encode_record(cart_key(user_id), cart)
    }

    pub fn save<S: Storage + ?Sized>(storage: &mut S, user_id: &str, cart: &Cart) -> StorageResult<()> {
        let (key, value) = Self::entry(user_id, cart)?;
        storage.set(&key, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_cart_record_layout_matches_browser_format() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                "cart_u1",
                r#"[{"id":3,"title":"Hard Drive","price":64,"image":"hd.jpg","quantity":2}]"#,
            )
            .unwrap();

        let cart = CartRepository::load(&storage, "u1").unwrap();
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 12800);

        CartRepository::save(&mut storage, "u2", &cart).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&storage.get("cart_u2").unwrap()).unwrap();
        assert_eq!(raw[0]["price"], 64.0);
        assert_eq!(raw[0]["quantity"], 2);
    }

    #[test]
    fn test_absent_cart_is_empty() {
        let storage = MemoryStorage::new();
        assert!(CartRepository::load(&storage, "nobody").unwrap().is_empty());
    }
}
