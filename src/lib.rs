// src/lib.rs
//! record-vault — a passphrase-gated, encrypted-at-rest record store
//!
//! Features:
//! - PBKDF2-HMAC-SHA256 key derivation (100 000 iterations)
//! - AES-256-GCM per record, fresh IV per encryption
//! - Sentinel-based passphrase verification, passphrase never stored
//! - Whole-file read-modify-write stores, one lock per file
//! - zeroizing wrappers so key material is wiped on drop

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod file_ops;
pub mod generate;
pub mod passphrase;
pub mod records;
pub mod service;
pub mod session;
pub mod store;

// Re-export everything users need at the crate root
pub use aliases::{DerivedKey32, MasterPassphrase, PlainText};
pub use config::{load as load_config, Config};
pub use crypto::EncryptedRecord;
pub use error::{CoreError, Result as CoreResult};
pub use generate::GeneratedCredentials;
pub use passphrase::{PassphraseVault, ValidationToken};
pub use records::{Account, Transaction, TransactionDraft, TransactionKind, VaultRecord};
pub use service::{AppInfo, Response, VaultService};
pub use session::Session;
pub use store::{Listing, RecordStore};
