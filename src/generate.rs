// src/generate.rs
//! Random credentials for new accounts
//!
//! Passwords avoid look-alike characters (`0 O o 1 l I`) and symbols so they
//! can be read off a screen and typed by hand.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const GENERATED_PASSWORD_LEN: usize = 20;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";

const ADJECTIVES: &[&str] = &[
    "amber", "brisk", "calm", "clever", "dusty", "eager", "fuzzy", "gentle", "hidden", "jolly",
    "lucky", "mellow", "nimble", "quiet", "rapid", "silver", "sunny", "swift", "tidy", "witty",
];
const NOUNS: &[&str] = &[
    "badger", "cedar", "comet", "falcon", "fern", "harbor", "lantern", "maple", "meadow",
    "otter", "pebble", "raven", "river", "sparrow", "summit", "thistle", "tiger", "willow",
];

/// Username plus password, wire-compatible with [`Account`](crate::Account) field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCredentials {
    #[serde(rename = "userName")]
    pub username: String,
    pub password: String,
}

impl GeneratedCredentials {
    pub fn random() -> Self {
        Self {
            username: username(),
            password: friendly_password(GENERATED_PASSWORD_LEN),
        }
    }
}

/// Exactly `len` characters; from three up, at least one upper, lower and digit
pub fn friendly_password(len: usize) -> String {
    let mut rng = rand::rng();
    let classes = [UPPER, LOWER, DIGITS];

    let mut chars: Vec<u8> = classes.iter().take(len).map(|set| pick(&mut rng, set)).collect();
    while chars.len() < len {
        let set = classes[rng.random_range(0..classes.len())];
        chars.push(pick(&mut rng, set));
    }
    chars.shuffle(&mut rng);
    chars.into_iter().map(char::from).collect()
}

/// `adjective_noun` followed by two digits, e.g. `swift_otter42`
pub fn username() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{adjective}_{noun}{:02}", rng.random_range(0..100))
}

fn pick(rng: &mut impl Rng, set: &[u8]) -> u8 {
    set[rng.random_range(0..set.len())]
}
