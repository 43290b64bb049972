// src/crypto/mod.rs
//! Pure cryptographic operations — no I/O
//!
//! All functions work exclusively on in-memory buffers:
//! - `kdf`: passphrase + salt → 256-bit key (PBKDF2-HMAC-SHA256)
//! - `encrypt` / `decrypt`: AES-256-GCM with a fresh 16-byte IV per call

use serde::{Deserialize, Serialize};

use crate::aliases::{DerivedKey32, PlainText};
use crate::error::Result;

mod decrypt;
mod encrypt;
pub mod kdf;

pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use kdf::{derive_key, generate_salt, Salt};

/// The on-disk unit for every stored record: `{"iv": hex, "data": hex}`
///
/// `data` is ciphertext followed by the 16-byte GCM tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    #[serde(with = "hex")]
    pub iv: Vec<u8>,
    #[serde(with = "hex")]
    pub data: Vec<u8>,
}

impl EncryptedRecord {
    /// Shorthand for [`decrypt`] on this record's own IV and data
    pub fn open(&self, key: &DerivedKey32) -> Result<PlainText> {
        decrypt(&self.iv, &self.data, key)
    }
}
