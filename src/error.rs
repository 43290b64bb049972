// src/error.rs
//! Public error type for the entire crate
//!
//! The `Display` text of each variant is what the boundary layer shows the
//! user, so keep them short and free of secrets.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No master password set. Please register first.")]
    NotRegistered,

    #[error("A master password is already set. Wipe the vault to register a new one.")]
    AlreadyRegistered,

    #[error("Incorrect master password.")]
    WrongPassphrase,

    #[error("Master password not in session.")]
    NotAuthenticated,

    #[error("Session expired due to inactivity.")]
    SessionExpired,

    #[error("Failed to encrypt record.")]
    Encryption,

    #[error("Wrong key or corrupted record.")]
    Decryption,

    #[error("Invalid salt length: expected 16 bytes, got {0}")]
    InvalidSalt(usize),

    #[error("{kind} '{id}' not found.")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} '{id}' already exists!")]
    DuplicateKey { kind: &'static str, id: String },

    #[error("{0}")]
    Invalid(String),

    #[error("Failed to persist vault data: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Vault file is corrupted: {0}")]
    CorruptFile(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<hex::FromHexError> for CoreError {
    fn from(err: hex::FromHexError) -> Self {
        CoreError::CorruptFile(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
