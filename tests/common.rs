// tests/common.rs
//! Shared test utilities — logging setup and fresh vaults

#![allow(dead_code)] // each test binary uses a different subset

use std::time::Duration;

use record_vault::{MasterPassphrase, PassphraseVault, Session, VaultService};
use tempfile::{tempdir, TempDir};

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const PASSPHRASE: &str = "hunter2";

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// Empty vault in its own temp dir; keep the `TempDir` alive for the test
pub fn fresh_service() -> (TempDir, VaultService) {
    setup();
    let dir = tempdir().expect("create temp dir");
    let service = VaultService::new(dir.path(), Duration::from_secs(300));
    (dir, service)
}

/// Registered and unlocked with [`PASSPHRASE`]
pub fn unlocked_service() -> (TempDir, VaultService) {
    let (dir, service) = fresh_service();
    assert!(service.register(PASSPHRASE).success);
    assert!(service.verify(PASSPHRASE).success);
    (dir, service)
}

/// Register `passphrase` in a throwaway vault and unlock it
///
/// Each call gets a fresh salt, so two sessions never share a key even for
/// the same passphrase.
pub fn session(passphrase: &str) -> Session {
    let dir = tempdir().expect("create temp dir");
    let vault = PassphraseVault::new(dir.path());
    let pass = || MasterPassphrase::new(passphrase.to_string());

    vault.register(&pass()).expect("register");
    vault
        .unlock(pass(), Duration::from_secs(300))
        .expect("unlock")
}
