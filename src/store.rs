// src/store.rs
//! Generic encrypted collection store
//!
//! One file per collection: a JSON array of `{iv, data}` entries, each entry
//! one record encrypted under the session key. Every operation is a whole-file
//! cycle (read, decrypt, transform, re-encrypt, write) run under the store's
//! own lock, so concurrent callers never interleave a read with another
//! caller's write.
//!
//! Entries are decoded one at a time. An entry that is not a well-formed
//! `{iv, data}` object, or does not decrypt under the session key, is skipped
//! when listing and counted in [`Listing::unreadable`]. Mutations carry such
//! entries over as the raw JSON they were read as instead of dropping them.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::aliases::DerivedKey32;
use crate::crypto::{encrypt, EncryptedRecord};
use crate::error::{CoreError, Result};
use crate::file_ops::{read_json, remove_if_exists, write_json_atomic};
use crate::records::VaultRecord;
use crate::session::Session;

/// Result of a best-effort listing
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    /// Entries that failed to decrypt or parse and were left out
    pub unreadable: usize,
}

enum Slot<T> {
    Open(T),
    Sealed(Value),
}

impl<T> Slot<T> {
    fn open(&self) -> Option<&T> {
        match self {
            Slot::Open(record) => Some(record),
            Slot::Sealed(_) => None,
        }
    }
}

pub struct RecordStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: VaultRecord> RecordStore<T> {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encrypt and add `record`; its key must not be taken yet
    pub fn append(&self, record: T, session: &Session) -> Result<()> {
        let _guard = self.lock.lock();
        let mut slots = self.load(session.key())?;

        if let Some(existing) = find(&slots, record.unique_key()) {
            return Err(duplicate::<T>(existing));
        }

        debug!(kind = T::KIND, total = slots.len() + 1, "appending record");
        slots.push(Slot::Open(record));
        self.store(slots, session.key())
    }

    /// Every record that decrypts under the session key
    pub fn list_all(&self, session: &Session) -> Result<Listing<T>> {
        let _guard = self.lock.lock();
        let slots = self.load(session.key())?;

        let mut records = Vec::with_capacity(slots.len());
        let mut unreadable = 0;
        for slot in slots {
            match slot {
                Slot::Open(record) => records.push(record),
                Slot::Sealed(_) => unreadable += 1,
            }
        }

        if unreadable > 0 {
            warn!(kind = T::KIND, unreadable, path = %self.path.display(), "skipped unreadable records");
        }
        Ok(Listing {
            records,
            unreadable,
        })
    }

    /// The record keyed `key`, if it is readable under the session key
    pub fn find_by_key(&self, key: &str, session: &Session) -> Result<T> {
        let _guard = self.lock.lock();
        let slots = self.load(session.key())?;

        slots
            .into_iter()
            .find_map(|slot| match slot {
                Slot::Open(record) if record.unique_key() == key => Some(record),
                _ => None,
            })
            .ok_or_else(|| not_found::<T>(key))
    }

    /// Replace the record keyed `old_key` with `record`
    ///
    /// The new key may equal `old_key` or be unused; clashing with any other
    /// record is `DuplicateKey`. A missing `old_key` is `NotFound` and
    /// nothing is written.
    pub fn update(&self, old_key: &str, record: T, session: &Session) -> Result<()> {
        let _guard = self.lock.lock();
        let mut slots = self.load(session.key())?;

        let position = position_of(&slots, old_key).ok_or_else(|| not_found::<T>(old_key))?;

        let new_key = record.unique_key();
        if new_key != old_key {
            if let Some(existing) = find(&slots, new_key) {
                return Err(duplicate::<T>(existing));
            }
        }

        debug!(kind = T::KIND, renamed = new_key != old_key, "updating record");
        slots[position] = Slot::Open(record);
        self.store(slots, session.key())
    }

    /// Remove the record keyed `key` and hand it back
    pub fn delete_by_key(&self, key: &str, session: &Session) -> Result<T> {
        let _guard = self.lock.lock();
        let mut slots = self.load(session.key())?;

        let position = position_of(&slots, key).ok_or_else(|| not_found::<T>(key))?;
        let removed = match slots.remove(position) {
            Slot::Open(record) => record,
            Slot::Sealed(_) => return Err(not_found::<T>(key)),
        };

        debug!(kind = T::KIND, remaining = slots.len(), "deleted record");
        self.store(slots, session.key())?;
        Ok(removed)
    }

    /// Delete the collection file
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        if remove_if_exists(&self.path)? {
            warn!(kind = T::KIND, path = %self.path.display(), "collection removed");
        }
        Ok(())
    }

    fn load(&self, key: &DerivedKey32) -> Result<Vec<Slot<T>>> {
        let entries: Vec<Value> = read_json(&self.path)?.unwrap_or_default();

        Ok(entries
            .into_iter()
            .map(|entry| match open_entry(&entry, key) {
                Some(record) => Slot::Open(record),
                None => Slot::Sealed(entry),
            })
            .collect())
    }

    fn store(&self, slots: Vec<Slot<T>>, key: &DerivedKey32) -> Result<()> {
        let entries = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Open(record) => seal(&record, key),
                Slot::Sealed(entry) => Ok(entry),
            })
            .collect::<Result<Vec<_>>>()?;

        write_json_atomic(&self.path, &entries)
    }
}

fn open_entry<T: VaultRecord>(entry: &Value, key: &DerivedKey32) -> Option<T> {
    let sealed = EncryptedRecord::deserialize(entry).ok()?;
    let plain = sealed.open(key).ok()?;
    serde_json::from_slice(plain.expose_secret()).ok()
}

fn seal<T: VaultRecord>(record: &T, key: &DerivedKey32) -> Result<Value> {
    let json = serde_json::to_vec(record)?;
    Ok(serde_json::to_value(encrypt(&json, key)?)?)
}

fn position_of<T: VaultRecord>(slots: &[Slot<T>], key: &str) -> Option<usize> {
    slots
        .iter()
        .position(|slot| slot.open().is_some_and(|r| r.unique_key() == key))
}

fn find<'a, T: VaultRecord>(slots: &'a [Slot<T>], key: &str) -> Option<&'a T> {
    slots
        .iter()
        .filter_map(Slot::open)
        .find(|r| r.unique_key() == key)
}

fn not_found<T: VaultRecord>(key: &str) -> CoreError {
    CoreError::NotFound {
        kind: T::KIND,
        id: key.to_string(),
    }
}

fn duplicate<T: VaultRecord>(existing: &T) -> CoreError {
    CoreError::DuplicateKey {
        kind: T::KIND,
        id: existing.unique_key().to_string(),
    }
}
