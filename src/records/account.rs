// src/records/account.rs
use serde::{Deserialize, Serialize};

use super::VaultRecord;
use crate::error::{CoreError, Result};

/// Login credential, keyed by `name`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(rename = "userName")]
    pub username: String,
    pub password: String,
    pub url: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
        notes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            url: url.into(),
            notes,
        }
    }

    /// Trim the name and notes, drop blank notes, require a name
    ///
    /// Username, password and url are stored exactly as given.
    pub fn normalized(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(CoreError::Invalid("Account name is required!".into()));
        }

        self.notes = self
            .notes
            .iter()
            .map(|note| note.trim())
            .filter(|note| !note.is_empty())
            .map(str::to_string)
            .collect();
        Ok(self)
    }
}

impl VaultRecord for Account {
    const KIND: &'static str = "Account";

    fn unique_key(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("notes", &self.notes.len())
            .finish()
    }
}
