// src/records/mod.rs
//! Logical record types stored in the vault
//!
//! Each type is serialized to JSON, encrypted, and kept in its own
//! [`RecordStore`](crate::store::RecordStore).

use serde::de::DeserializeOwned;
use serde::Serialize;

mod account;
mod transaction;

pub use account::Account;
pub use transaction::{Transaction, TransactionDraft, TransactionKind};

/// A record with a unique string key, storable in a `RecordStore`
pub trait VaultRecord: Serialize + DeserializeOwned {
    /// Label used in user-facing messages ("Account", "Transaction")
    const KIND: &'static str;

    /// Unique across every live record of the same store
    fn unique_key(&self) -> &str;
}
