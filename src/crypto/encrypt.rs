// src/crypto/encrypt.rs
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};

use super::EncryptedRecord;
use crate::aliases::DerivedKey32;
use crate::consts::IV_LEN;
use crate::error::{CoreError, Result};

/// AES-256-GCM with a 128-bit IV, matching the stored IV width
pub(crate) type RecordCipher = AesGcm<Aes256, U16>;

pub(crate) fn cipher_for(key: &DerivedKey32) -> Option<RecordCipher> {
    RecordCipher::new_from_slice(key.expose_secret()).ok()
}

/// Encrypt plaintext under `key` with a fresh random IV (in-memory)
pub fn encrypt(plaintext: &[u8], key: &DerivedKey32) -> Result<EncryptedRecord> {
    let cipher = cipher_for(key).ok_or(CoreError::Encryption)?;
    let iv: [u8; IV_LEN] = rand::random();

    let data = cipher
        .encrypt(Nonce::<U16>::from_slice(&iv), plaintext)
        .map_err(|_| CoreError::Encryption)?;

    Ok(EncryptedRecord {
        iv: iv.to_vec(),
        data,
    })
}
