// tests/service_tests.rs
//! End-to-end flows through the request/response boundary
mod common;

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{Days, Local};
use common::{fresh_service, unlocked_service, PASSPHRASE};
use record_vault::consts::{ACCOUNTS_FILE_NAME, TOKEN_FILE_NAME, TRANSACTIONS_FILE_NAME};
use record_vault::{Account, TransactionDraft, TransactionKind, VaultService};
use tempfile::tempdir;

fn github() -> Account {
    Account::new(
        "GitHub",
        "alice",
        "p@ss",
        "https://github.com",
        vec!["2FA on".into()],
    )
}

fn plain(name: &str) -> Account {
    Account::new(name, "user", "pw", "", vec![])
}

fn draft(amount: f64) -> TransactionDraft {
    TransactionDraft {
        date: Local::now().date_naive(),
        kind: TransactionKind::Debit,
        category: "Groceries".into(),
        amount,
        note: "weekly shop".into(),
    }
}

fn account_names(service: &VaultService) -> Vec<String> {
    let response = service.list_accounts();
    assert!(response.success, "{}", response.message);
    response.data.unwrap().into_iter().map(|a| a.name).collect()
}

// ── passphrase ────────────────────────────────────────────────────

#[test]
fn test_register_and_verify_scenario() {
    let (_dir, service) = fresh_service();
    assert!(!service.has_passphrase());

    let registered = service.register("hunter2");
    assert!(registered.success);
    assert!(service.has_passphrase());

    let ok = service.verify("hunter2");
    assert!(ok.success);
    assert_eq!(ok.message, "Login successful.");
    assert!(service.is_unlocked());

    let wrong = service.verify("wrong");
    assert!(!wrong.success);
    assert_eq!(wrong.message, "Incorrect master password.");
}

#[test]
fn test_verify_before_register_is_not_registered() {
    let (_dir, service) = fresh_service();

    let response = service.verify("hunter2");

    assert!(!response.success);
    assert_eq!(
        response.message,
        "No master password set. Please register first."
    );
    assert!(!service.is_unlocked());
}

#[test]
fn test_second_register_is_refused() {
    let (_dir, service) = unlocked_service();

    let response = service.register("another");

    assert!(!response.success);
    assert!(service.verify(PASSPHRASE).success);
}

// ── session gating ───────────────────────────────────────────────

#[test]
fn test_record_ops_without_session_touch_no_files() {
    let (dir, service) = fresh_service();
    service.register(PASSPHRASE);

    let responses = [
        service.save_account(github()),
        service.update_account("GitHub", github()),
        service.delete_account("GitHub"),
        service.delete_transaction("id"),
    ];
    for response in responses {
        assert!(!response.success);
        assert_eq!(response.message, "Master password not in session.");
    }
    assert!(!service.list_accounts().success);
    assert!(!service.list_transactions().success);
    assert!(!service.record_transaction(draft(5.0)).success);

    assert!(!dir.path().join(ACCOUNTS_FILE_NAME).exists());
    assert!(!dir.path().join(TRANSACTIONS_FILE_NAME).exists());
}

#[test]
fn test_logout_clears_session_but_keeps_data() {
    let (_dir, service) = unlocked_service();
    assert!(service.save_account(github()).success);

    service.logout();
    assert!(!service.is_unlocked());
    assert!(!service.list_accounts().success);

    assert!(service.verify(PASSPHRASE).success);
    assert_eq!(account_names(&service), vec!["GitHub"]);
}

#[test]
fn test_inactivity_timeout_clears_session() {
    let (_dir, service) = unlocked_service();
    service.inactivity_timeout();

    let response = service.list_accounts();
    assert!(!response.success);
    assert_eq!(response.message, "Master password not in session.");
}

#[test]
fn test_idle_session_expires_on_next_call() {
    common::setup();
    let dir = tempdir().unwrap();
    let service = VaultService::new(dir.path(), Duration::from_millis(200));
    service.register(PASSPHRASE);
    assert!(service.verify(PASSPHRASE).success);
    assert!(service.list_accounts().success);

    thread::sleep(Duration::from_millis(400));

    let expired = service.list_accounts();
    assert!(!expired.success);
    assert_eq!(expired.message, "Session expired due to inactivity.");
    assert!(!service.is_unlocked());
}

// ── accounts ─────────────────────────────────────────────────────

#[test]
fn test_save_and_list_account_scenario() {
    let (_dir, service) = unlocked_service();

    assert!(service.save_account(github()).success);
    let listed = service.list_accounts().data.unwrap();

    assert_eq!(listed, vec![github()]);
}

#[test]
fn test_delete_account_scenario() {
    let (_dir, service) = unlocked_service();
    service.save_account(plain("A"));
    service.save_account(plain("B"));

    assert!(service.delete_account("A").success);
    assert_eq!(account_names(&service), vec!["B"]);

    let missing = service.delete_account("A");
    assert!(!missing.success);
    assert_eq!(missing.message, "Account 'A' not found.");
}

#[test]
fn test_update_account_scenario() {
    let (_dir, service) = unlocked_service();
    service.save_account(plain("A"));

    assert!(service.update_account("A", plain("A2")).success);
    assert_eq!(account_names(&service), vec!["A2"]);

    let dup = service.save_account(plain("A2"));
    assert!(!dup.success);
    assert_eq!(dup.message, "Account 'A2' already exists!");
}

#[test]
fn test_update_unknown_account_is_not_found() {
    let (_dir, service) = unlocked_service();
    service.save_account(plain("A"));

    let response = service.update_account("nope", plain("B"));

    assert!(!response.success);
    assert_eq!(account_names(&service), vec!["A"]);
}

#[test]
fn test_save_account_requires_name() {
    let (_dir, service) = unlocked_service();

    let response = service.save_account(plain("   "));

    assert!(!response.success);
    assert_eq!(response.message, "Account name is required!");
}

#[test]
fn test_find_account_by_exact_name() {
    let (_dir, service) = unlocked_service();
    service.save_account(github());
    service.save_account(plain("Bank"));

    let found = service.find_account(" GitHub ");
    assert!(found.success);
    assert_eq!(found.message, "Account found.");
    assert_eq!(found.data, Some(github()));

    let missing = service.find_account("github");
    assert!(!missing.success);
    assert_eq!(missing.message, "Account 'github' not found.");
    assert!(missing.data.is_none());
}

#[test]
fn test_generated_credentials_can_be_saved() {
    let (_dir, service) = unlocked_service();

    let generated = service.generate_credentials().data.unwrap();
    assert_eq!(generated.password.len(), 20);
    assert!(!generated.username.is_empty());
    assert_ne!(service.generate_credentials().data.unwrap(), generated);

    let account = Account::new("Forum", &generated.username, &generated.password, "", vec![]);
    assert!(service.save_account(account).success);
    let stored = service.find_account("Forum").data.unwrap();
    assert_eq!(stored.password, generated.password);
}

#[test]
fn test_generate_credentials_requires_session() {
    let (_dir, service) = fresh_service();
    let response = service.generate_credentials();
    assert!(!response.success);
    assert_eq!(response.message, "Master password not in session.");
}

#[test]
fn test_listing_twice_is_stable() {
    let (_dir, service) = unlocked_service();
    service.save_account(plain("A"));
    service.save_account(github());

    assert_eq!(service.list_accounts(), service.list_accounts());
}

// ── transactions ─────────────────────────────────────────────────

#[test]
fn test_record_list_delete_transaction() {
    let (_dir, service) = unlocked_service();

    let recorded = service.record_transaction(draft(42.5));
    assert!(recorded.success, "{}", recorded.message);
    let id = recorded.data.unwrap();

    let listed = service.list_transactions().data.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].amount, 42.5);
    assert_eq!(listed[0].kind, TransactionKind::Debit);

    assert!(service.delete_transaction(&id).success);
    assert!(service.list_transactions().data.unwrap().is_empty());
    assert!(!service.delete_transaction(&id).success);
}

#[test]
fn test_invalid_transactions_never_reach_disk() {
    let (dir, service) = unlocked_service();

    for amount in [0.0, -10.0] {
        let response = service.record_transaction(draft(amount));
        assert!(!response.success);
        assert_eq!(
            response.message,
            "Transaction amount must be greater than zero."
        );
    }

    let mut future = draft(5.0);
    future.date = Local::now().date_naive().checked_add_days(Days::new(1)).unwrap();
    let response = service.record_transaction(future);
    assert!(!response.success);
    assert_eq!(response.message, "Transaction date cannot be in the future.");

    assert!(!dir.path().join(TRANSACTIONS_FILE_NAME).exists());
}

// ── reset & info ─────────────────────────────────────────────────

#[test]
fn test_wipe_vault_allows_fresh_registration() {
    let (dir, service) = unlocked_service();
    service.save_account(github());
    service.record_transaction(draft(1.0));

    assert!(service.wipe_vault().success);

    assert!(!service.is_unlocked());
    assert!(!service.has_passphrase());
    for name in [TOKEN_FILE_NAME, ACCOUNTS_FILE_NAME, TRANSACTIONS_FILE_NAME] {
        assert!(!dir.path().join(name).exists(), "{name} survived wipe");
    }

    assert!(service.register("new-pass").success);
    assert!(service.verify("new-pass").success);
    assert!(service.list_accounts().data.unwrap().is_empty());
}

#[test]
fn test_interrupted_wipe_removes_token_first_and_can_be_retried() {
    let (dir, service) = unlocked_service();
    assert!(service.record_transaction(draft(1.0)).success);

    // a directory where the accounts file should be makes its removal fail
    let blocker = dir.path().join(ACCOUNTS_FILE_NAME);
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("inner"), b"x").unwrap();

    let response = service.wipe_vault();
    assert!(!response.success);
    assert!(!service.has_passphrase());
    assert!(dir.path().join(TRANSACTIONS_FILE_NAME).exists());

    fs::remove_dir_all(&blocker).unwrap();
    assert!(service.wipe_vault().success);
    assert!(!dir.path().join(TRANSACTIONS_FILE_NAME).exists());
}

#[test]
fn test_app_info_reports_data_dir() {
    let (dir, service) = fresh_service();
    let info = service.app_info();

    assert_eq!(info.app_data_dir, dir.path());
    assert_eq!(info.app_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_response_serializes_without_empty_data() {
    let (_dir, service) = fresh_service();
    let json = serde_json::to_value(service.verify("x")).unwrap();

    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());
}

// ── concurrency ──────────────────────────────────────────────────

#[test]
fn test_parallel_windows_share_one_service() {
    let (_dir, service) = unlocked_service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..4)
        .map(|w| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for i in 0..5 {
                    let response = service.save_account(plain(&format!("w{w}-{i}")));
                    assert!(response.success, "{}", response.message);
                    assert!(service.record_transaction(draft(1.0 + i as f64)).success);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(account_names(&service).len(), 20);
    assert_eq!(service.list_transactions().data.unwrap().len(), 20);
}
