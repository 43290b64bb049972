// src/config/mod.rs
//! Configuration system for record-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, Logging, Paths, SessionSettings, CONFIG_ENV, DATA_DIR_ENV};

mod app;
mod defaults;
