// src/passphrase.rs
//! Master passphrase registration and verification
//!
//! The vault is either *Unset* (no token file) or *Set* (token file present).
//! The token is `{salt, iv, data}` where `data` is the sentinel encrypted
//! under the key derived from the passphrase and `salt`. The passphrase
//! itself is never stored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aliases::{DerivedKey32, MasterPassphrase};
use crate::consts::{SALT_LEN, SENTINEL, TOKEN_FILE_NAME};
use crate::crypto::{decrypt, derive_key, encrypt, generate_salt, Salt};
use crate::error::{CoreError, Result};
use crate::file_ops::{read_json, remove_if_exists, write_json_atomic};
use crate::session::Session;

/// Persisted proof-of-passphrase, one per vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationToken {
    #[serde(with = "hex")]
    pub salt: Vec<u8>,
    #[serde(with = "hex")]
    pub iv: Vec<u8>,
    #[serde(with = "hex")]
    pub data: Vec<u8>,
}

pub struct PassphraseVault {
    token_path: PathBuf,
    lock: Mutex<()>,
}

impl PassphraseVault {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            token_path: data_dir.as_ref().join(TOKEN_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// True when the vault is in the *Set* state
    pub fn is_registered(&self) -> bool {
        self.token_path.exists()
    }

    /// Set the master passphrase; refuses to overwrite an existing one
    pub fn register(&self, passphrase: &MasterPassphrase) -> Result<()> {
        let _guard = self.lock.lock();

        if self.is_registered() {
            return Err(CoreError::AlreadyRegistered);
        }
        if passphrase.expose_secret().trim().is_empty() {
            return Err(CoreError::Invalid(
                "Please enter a valid master password.".into(),
            ));
        }

        let salt = generate_salt();
        let key = derive_key(passphrase.expose_secret().as_bytes(), &salt)?;
        let sealed = encrypt(SENTINEL.as_bytes(), &key)?;

        let token = ValidationToken {
            salt: salt.to_vec(),
            iv: sealed.iv,
            data: sealed.data,
        };
        write_json_atomic(&self.token_path, &token)?;

        info!(path = %self.token_path.display(), "master passphrase registered");
        Ok(())
    }

    /// Check `passphrase` against the stored token
    ///
    /// `Ok(false)` for a wrong passphrase or any decryption anomaly;
    /// `Err(NotRegistered)` when there is no token to check against.
    pub fn verify(&self, passphrase: &MasterPassphrase) -> Result<bool> {
        Ok(self.check(passphrase)?.is_some())
    }

    /// Verify and, on success, open a session reusing the derived key
    pub fn unlock(
        &self,
        passphrase: MasterPassphrase,
        inactivity_timeout: Duration,
    ) -> Result<Session> {
        match self.check(&passphrase)? {
            Some((salt, key)) => {
                info!("vault unlocked");
                Ok(Session::from_parts(passphrase, salt, key, inactivity_timeout))
            }
            None => Err(CoreError::WrongPassphrase),
        }
    }

    /// Remove the token, returning the vault to *Unset*
    pub fn wipe(&self) -> Result<()> {
        let _guard = self.lock.lock();
        if remove_if_exists(&self.token_path)? {
            warn!(path = %self.token_path.display(), "validation token removed");
        }
        Ok(())
    }

    pub fn read_token(&self) -> Result<ValidationToken> {
        read_json(&self.token_path)?.ok_or(CoreError::NotRegistered)
    }

    fn check(&self, passphrase: &MasterPassphrase) -> Result<Option<(Salt, DerivedKey32)>> {
        let token = self.read_token()?;

        let Ok(salt) = Salt::try_from(token.salt.as_slice()) else {
            warn!(len = token.salt.len(), expected = SALT_LEN, "token salt malformed");
            return Ok(None);
        };
        let key = derive_key(passphrase.expose_secret().as_bytes(), &salt)?;

        match decrypt(&token.iv, &token.data, &key) {
            Ok(plain) if plain.expose_secret().as_slice() == SENTINEL.as_bytes() => {
                Ok(Some((salt, key)))
            }
            _ => Ok(None),
        }
    }
}
