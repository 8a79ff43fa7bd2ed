//! `orders_<userId>` records.

use shopfinity_core::OrderHistory;

use super::{encode_record, orders_key, read_record};
use crate::error::{StorageResult, StoreResult};
use crate::storage::Storage;

/// Per-user order history records.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderRepository;

impl OrderRepository {
    /// Loads a user's order history. Absent ≡ empty.
    pub fn load<S: Storage + ?Sized>(storage: &S, user_id: &str) -> StoreResult<OrderHistory> {
        Ok(read_record(storage, &orders_key(user_id))?.unwrap_or_default())
    }

    /// Entry for a combined write.
    pub fn entry(user_id: &str, history: &OrderHistory) -> StorageResult<(String, String)> {
        encode_record(orders_key(user_id), history)
    }
}
