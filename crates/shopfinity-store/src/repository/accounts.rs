//! `mockUsers` record: the mock account list.

use serde::{Deserialize, Serialize};
use shopfinity_core::User;

use super::{encode_record, read_record, ACCOUNTS_KEY};
use crate::error::{StorageResult, StoreResult};
use crate::storage::Storage;

/// A user plus their password hash (PHC string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Account list storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountRepository;

impl AccountRepository {
    /// All accounts. Absent ≡ none.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> StoreResult<Vec<StoredAccount>> {
        Ok(read_record(storage, ACCOUNTS_KEY)?.unwrap_or_default())
    }

    pub fn save<S: Storage + ?Sized>(storage: &mut S, accounts: &[StoredAccount]) -> StorageResult<()> {
        let (key, value) = encode_record(ACCOUNTS_KEY.to_string(), accounts)?;
        storage.set(&key, &value)
    }
}
