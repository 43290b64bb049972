// src/aliases.rs
//! Secret wrapper types used throughout record-vault
//!
//! Every type here zeroizes its contents on drop and prints as `[REDACTED]`.
//! Read access goes through `expose_secret()` so secret use stays greppable.

use zeroize::Zeroizing;

macro_rules! secret_alias {
    ($name:ident, $inner:ty) => {
        pub struct $name(Zeroizing<$inner>);

        impl $name {
            pub fn new(value: $inner) -> Self {
                Self(Zeroizing::new(value))
            }

            pub fn expose_secret(&self) -> &$inner {
                &self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self::new(value)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(concat!(stringify!($name), "([REDACTED])"))
            }
        }
    };
}

// Fixed-size secrets
secret_alias!(DerivedKey32, [u8; 32]); // PBKDF2 output, lives only as long as the session

// Dynamic secrets
secret_alias!(MasterPassphrase, String); // The single vault unlock passphrase
secret_alias!(PlainText, Vec<u8>); // Serialized record before encryption / after decryption

impl DerivedKey32 {
    /// Fresh key from the OS-seeded thread RNG
    pub fn random() -> Self {
        Self::new(rand::random())
    }
}
