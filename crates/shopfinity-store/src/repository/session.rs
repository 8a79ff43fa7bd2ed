//! The `currentUser` pointer.

use shopfinity_core::User;

use super::{encode_record, read_record, CURRENT_USER_KEY};
use crate::error::{StorageResult, StoreResult};
use crate::storage::Storage;

/// Reads and writes the signed-in user record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionRepository;

impl SessionRepository {
    pub fn load<S: Storage + ?Sized>(storage: &S) -> StoreResult<Option<User>> {
        read_record(storage, CURRENT_USER_KEY)
    }

    pub fn save<S: Storage + ?Sized>(storage: &mut S, user: &User) -> StorageResult<()> {
        let (key, value) = encode_record(CURRENT_USER_KEY.to_string(), user)?;
        storage.set(&key, &value)
    }

    pub fn clear<S: Storage + ?Sized>(storage: &mut S) -> StorageResult<()> {
        storage.remove(CURRENT_USER_KEY)
    }
}
