// src/session.rs
//! The unlocked state of the vault
//!
//! A `Session` only comes into existence through a successful passphrase
//! check in [`PassphraseVault::unlock`](crate::passphrase::PassphraseVault::unlock)
//! and holds the key material in zeroizing wrappers. Dropping it is the logout: nothing on
//! disk is touched.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::aliases::{DerivedKey32, MasterPassphrase};
use crate::crypto::Salt;

/// Unlocked vault state; obtainable only from a passphrase check
///
/// ```compile_fail
/// use record_vault::Session;
/// let build = Session::from_parts;
/// ```
pub struct Session {
    passphrase: MasterPassphrase,
    salt: Salt,
    key: DerivedKey32,
    inactivity_timeout: Duration,
    last_activity: Mutex<Instant>,
}

impl Session {
    pub(crate) fn from_parts(
        passphrase: MasterPassphrase,
        salt: Salt,
        key: DerivedKey32,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            passphrase,
            salt,
            key,
            inactivity_timeout,
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn key(&self) -> &DerivedKey32 {
        &self.key
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn passphrase(&self) -> &MasterPassphrase {
        &self.passphrase
    }

    pub fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout
    }

    /// Record user activity, restarting the inactivity clock
    pub fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.last_activity.lock())
    }

    /// True once `now` is at least the inactivity timeout past the last activity
    pub fn is_idle_at(&self, now: Instant) -> bool {
        self.idle_for(now) >= self.inactivity_timeout
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle_at(Instant::now())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("salt", &hex::encode(self.salt))
            .field("inactivity_timeout", &self.inactivity_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{derive_key, generate_salt};

    fn session(timeout: Duration) -> Session {
        let salt = generate_salt();
        let key = derive_key(b"hunter2", &salt).unwrap();
        Session::from_parts(MasterPassphrase::new("hunter2".into()), salt, key, timeout)
    }

    #[test]
    fn test_idle_after_timeout_elapses() {
        let s = session(Duration::from_secs(300));
        let now = Instant::now();

        assert!(!s.is_idle_at(now));
        assert!(s.is_idle_at(now + Duration::from_secs(301)));
    }

    #[test]
    fn test_touch_restarts_clock() {
        let s = session(Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(60));
        assert!(s.is_idle());

        s.touch();
        assert!(!s.is_idle());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let s = session(Duration::from_secs(1));
        let printed = format!("{s:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("salt"));
    }
}
