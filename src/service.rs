// src/service.rs
//! Request/response boundary for the UI layer
//!
//! Every operation answers with a [`Response`]: a success flag, a message
//! meant for display, and optional data. Errors never cross this boundary as
//! anything but their message.
//!
//! The service owns the session slot. All record operations go through
//! [`VaultService::active_session`], which refuses without a session and
//! expires an idle one before touching any file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::aliases::MasterPassphrase;
use crate::config::Config;
use crate::consts::{ACCOUNTS_FILE_NAME, TRANSACTIONS_FILE_NAME};
use crate::error::{CoreError, Result};
use crate::generate::GeneratedCredentials;
use crate::passphrase::PassphraseVault;
use crate::records::{Account, Transaction, TransactionDraft, VaultRecord};
use crate::session::Session;
use crate::store::{Listing, RecordStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T = ()> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(err: &CoreError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub app_version: String,
    pub app_data_dir: PathBuf,
}

pub struct VaultService {
    data_dir: PathBuf,
    inactivity_timeout: Duration,
    passphrase: PassphraseVault,
    accounts: RecordStore<Account>,
    transactions: RecordStore<Transaction>,
    session: Mutex<Option<Arc<Session>>>,
}

impl VaultService {
    pub fn new<P: AsRef<Path>>(data_dir: P, inactivity_timeout: Duration) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            passphrase: PassphraseVault::new(&data_dir),
            accounts: RecordStore::new(data_dir.join(ACCOUNTS_FILE_NAME)),
            transactions: RecordStore::new(data_dir.join(TRANSACTIONS_FILE_NAME)),
            session: Mutex::new(None),
            inactivity_timeout,
            data_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.paths.data_dir, config.inactivity_timeout())
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            app_data_dir: self.data_dir.clone(),
        }
    }

    // ── passphrase ────────────────────────────────────────────────

    pub fn has_passphrase(&self) -> bool {
        self.passphrase.is_registered()
    }

    pub fn register(&self, passphrase: &str) -> Response {
        let passphrase = MasterPassphrase::new(passphrase.to_string());
        respond(
            self.passphrase.register(&passphrase),
            "Master password created successfully.",
        )
    }

    /// Check the passphrase and, on success, open the session
    pub fn verify(&self, passphrase: &str) -> Response {
        let passphrase = MasterPassphrase::new(passphrase.to_string());
        match self.passphrase.unlock(passphrase, self.inactivity_timeout) {
            Ok(session) => {
                *self.session.lock() = Some(Arc::new(session));
                Response::ok("Login successful.")
            }
            Err(err) => Response::fail(&err),
        }
    }

    // ── session ───────────────────────────────────────────────────

    pub fn is_unlocked(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Record user input so the inactivity clock restarts
    pub fn touch(&self) {
        if let Some(session) = self.session.lock().as_ref() {
            session.touch();
        }
    }

    pub fn logout(&self) {
        if self.session.lock().take().is_some() {
            info!("session closed");
        }
    }

    pub fn inactivity_timeout(&self) {
        if self.session.lock().take().is_some() {
            info!("session closed after inactivity");
        }
    }

    fn active_session(&self) -> Result<Arc<Session>> {
        let mut slot = self.session.lock();
        let session = slot
            .as_ref()
            .map(Arc::clone)
            .ok_or(CoreError::NotAuthenticated)?;

        if session.is_idle() {
            *slot = None;
            info!("session expired due to inactivity");
            return Err(CoreError::SessionExpired);
        }

        session.touch();
        Ok(session)
    }

    // ── accounts ──────────────────────────────────────────────────

    pub fn save_account(&self, account: Account) -> Response {
        let result = self.active_session().and_then(|session| {
            let account = account.normalized()?;
            self.accounts.append(account, &session)
        });
        respond(result, "Account saved successfully.")
    }

    pub fn list_accounts(&self) -> Response<Vec<Account>> {
        let result = self
            .active_session()
            .and_then(|session| self.accounts.list_all(&session));
        respond_listing(result)
    }

    /// Exact, case-sensitive lookup by name
    pub fn find_account(&self, name: &str) -> Response<Account> {
        let result = self
            .active_session()
            .and_then(|session| self.accounts.find_by_key(name.trim(), &session));

        match result {
            Ok(account) => Response::with_data(account, "Account found."),
            Err(err) => Response::fail(&err),
        }
    }

    /// Random username and 20-character password to prefill a new account
    pub fn generate_credentials(&self) -> Response<GeneratedCredentials> {
        match self.active_session() {
            Ok(_) => Response::with_data(GeneratedCredentials::random(), "Credentials generated."),
            Err(err) => Response::fail(&err),
        }
    }

    /// Replace the account named `old_name`; the name itself may change
    pub fn update_account(&self, old_name: &str, updated: Account) -> Response {
        let result = self.active_session().and_then(|session| {
            let updated = updated.normalized()?;
            self.accounts.update(old_name.trim(), updated, &session)
        });
        respond(result, "Account updated successfully.")
    }

    pub fn delete_account(&self, name: &str) -> Response {
        let result = self
            .active_session()
            .and_then(|session| self.accounts.delete_by_key(name.trim(), &session));
        respond(result.map(drop), "Account deleted successfully.")
    }

    // ── transactions ──────────────────────────────────────────────

    /// Validate and store a transaction; the response carries its new id
    pub fn record_transaction(&self, draft: TransactionDraft) -> Response<String> {
        let result = self.active_session().and_then(|session| {
            let transaction = draft.into_transaction(today())?;
            let id = transaction.id.clone();
            self.transactions.append(transaction, &session)?;
            Ok(id)
        });

        match result {
            Ok(id) => Response::with_data(id, "Transaction recorded successfully."),
            Err(err) => Response::fail(&err),
        }
    }

    pub fn list_transactions(&self) -> Response<Vec<Transaction>> {
        let result = self
            .active_session()
            .and_then(|session| self.transactions.list_all(&session));
        respond_listing(result)
    }

    pub fn delete_transaction(&self, id: &str) -> Response {
        let result = self
            .active_session()
            .and_then(|session| self.transactions.delete_by_key(id, &session));
        respond(result.map(drop), "Transaction deleted successfully.")
    }

    // ── reset ─────────────────────────────────────────────────────

    /// Destroy the vault: token and both collections. The only way back to
    /// a state where `register` is accepted again.
    ///
    /// The token goes first: if a later step fails, the leftover collections
    /// can no longer be unlocked and the next `wipe_vault` removes them.
    pub fn wipe_vault(&self) -> Response {
        self.logout();
        let steps: [(&str, &dyn Fn() -> Result<()>); 3] = [
            ("token", &|| self.passphrase.wipe()),
            ("accounts", &|| self.accounts.clear()),
            ("transactions", &|| self.transactions.clear()),
        ];

        for (step, run) in steps {
            if let Err(err) = run() {
                error!(step, error = %err, "vault wipe failed");
                return Response::fail(&err);
            }
        }

        warn!(data_dir = %self.data_dir.display(), "vault wiped");
        Response::ok("Vault wiped. Register a new master password.")
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn respond(result: Result<()>, success: &str) -> Response {
    match result {
        Ok(()) => Response::ok(success),
        Err(err) => Response::fail(&err),
    }
}

fn respond_listing<T: VaultRecord>(result: Result<Listing<T>>) -> Response<Vec<T>> {
    match result {
        Ok(Listing {
            records,
            unreadable: 0,
        }) => {
            let message = format!("Loaded {} {}(s).", records.len(), T::KIND.to_lowercase());
            Response::with_data(records, message)
        }
        Ok(Listing {
            records,
            unreadable,
        }) => {
            let message = format!(
                "Loaded {} {}(s); {unreadable} record(s) could not be decrypted and were skipped.",
                records.len(),
                T::KIND.to_lowercase(),
            );
            Response::with_data(records, message)
        }
        Err(err) => Response::fail(&err),
    }
}
