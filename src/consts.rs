// src/consts.rs
//! Shared constants — security parameters and defaults

/// PBKDF2-HMAC-SHA256 work factor for every passphrase → key derivation.
///
/// Fixed and part of the on-disk format: changing it makes existing vaults
/// unreadable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes (stored hex-encoded next to the validation token)
pub const SALT_LEN: usize = 16;

/// IV length in bytes, fresh for every encryption
pub const IV_LEN: usize = 16;

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Known plaintext whose successful decryption proves the passphrase
pub const SENTINEL: &str = "VALID";

/// Validation token file name inside the data directory
pub const TOKEN_FILE_NAME: &str = "password.enc";

/// Encrypted account collection
pub const ACCOUNTS_FILE_NAME: &str = "accounts.enc";

/// Encrypted transaction collection
pub const TRANSACTIONS_FILE_NAME: &str = "transactions.enc";

/// Session is dropped after this many seconds without input
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 300;

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "record-vault";
