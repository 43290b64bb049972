// src/crypto/kdf.rs
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::aliases::DerivedKey32;
use crate::consts::{KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use crate::error::{CoreError, Result};

pub type Salt = [u8; SALT_LEN];

/// Fresh random salt — not secret, stored next to what it protects
pub fn generate_salt() -> Salt {
    rand::random()
}

/// Derive the 256-bit record key from a passphrase
///
/// Deterministic for a given `(passphrase, salt)`; only fails when the salt
/// is not exactly [`SALT_LEN`] bytes.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<DerivedKey32> {
    if salt.len() != SALT_LEN {
        return Err(CoreError::InvalidSalt(salt.len()));
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut out);
    Ok(DerivedKey32::new(out))
}
