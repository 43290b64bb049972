// src/crypto/decrypt.rs
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::Aead;
use aes_gcm::Nonce;

use super::encrypt::cipher_for;
use crate::aliases::{DerivedKey32, PlainText};
use crate::consts::IV_LEN;
use crate::error::{CoreError, Result};

/// Decrypt `ciphertext` (with trailing tag) → plaintext (in-memory)
///
/// Any failure, whether wrong key, flipped byte, truncated data or malformed IV,
/// collapses into [`CoreError::Decryption`]. Callers cannot tell them apart.
pub fn decrypt(iv: &[u8], ciphertext: &[u8], key: &DerivedKey32) -> Result<PlainText> {
    if iv.len() != IV_LEN {
        return Err(CoreError::Decryption);
    }
    let cipher = cipher_for(key).ok_or(CoreError::Decryption)?;

    cipher
        .decrypt(Nonce::<U16>::from_slice(iv), ciphertext)
        .map(PlainText::new)
        .map_err(|_| CoreError::Decryption)
}
