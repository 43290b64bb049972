// src/bin/vault.rs
//! Command-line shell over the vault boundary
//!
//! One command per invocation: prompt for the master password, unlock,
//! run the command, log out.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use record_vault::{load_config, Account, Response, TransactionDraft, TransactionKind, VaultService};
use rpassword::prompt_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vault", version, about = "Encrypted credentials and transactions vault")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show whether a master password is set and where data lives
    Status,
    /// Set the master password for a new vault
    Register,
    /// Manage stored accounts
    #[command(subcommand)]
    Accounts(AccountCommand),
    /// Manage recorded transactions
    #[command(subcommand)]
    Transactions(TransactionCommand),
    /// Delete the password token and every stored record
    Wipe {
        /// Required: confirms the vault should be destroyed
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    List,
    /// Show one account by its exact name
    Find {
        name: String,
    },
    /// Print a random username and password for a new account
    Generate,
    Add(AccountArgs),
    Update {
        /// Current name of the account to change
        old_name: String,
        #[command(flatten)]
        account: AccountArgs,
    },
    Delete {
        name: String,
    },
}

#[derive(clap::Args)]
struct AccountArgs {
    name: String,
    #[arg(long, default_value = "")]
    username: String,
    #[arg(long, default_value = "")]
    url: String,
    /// May be repeated
    #[arg(long = "note")]
    notes: Vec<String>,
}

#[derive(Subcommand)]
enum TransactionCommand {
    List,
    Add {
        /// YYYY-MM-DD
        date: NaiveDate,
        /// credit or debit
        kind: TransactionKind,
        category: String,
        amount: f64,
        #[arg(long, default_value = "")]
        note: String,
    },
    Delete {
        id: String,
    },
}

fn main() -> Result<()> {
    let config = load_config();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    let cli = Cli::parse();
    let service = VaultService::from_config(config);

    match cli.command {
        Command::Status => {
            let app = service.app_info();
            println!("record-vault {}", app.app_version);
            println!("data dir: {}", app.app_data_dir.display());
            println!("master password set: {}", service.has_passphrase());
            Ok(())
        }
        Command::Register => {
            let first = prompt_password("New master password: ")?;
            let again = prompt_password("Repeat master password: ")?;
            if first != again {
                bail!("passwords do not match");
            }
            report(service.register(&first))
        }
        Command::Wipe { yes } => {
            if !yes {
                bail!("refusing to wipe without --yes");
            }
            report(service.wipe_vault())
        }
        Command::Accounts(cmd) => {
            unlock(&service)?;
            let outcome = run_accounts(&service, cmd);
            service.logout();
            outcome
        }
        Command::Transactions(cmd) => {
            unlock(&service)?;
            let outcome = run_transactions(&service, cmd);
            service.logout();
            outcome
        }
    }
}

fn unlock(service: &VaultService) -> Result<()> {
    let passphrase = prompt_password("Master password: ").context("failed to read password")?;
    let response = service.verify(&passphrase);
    if !response.success {
        bail!(response.message);
    }
    info!("{}", response.message);
    Ok(())
}

fn run_accounts(service: &VaultService, cmd: AccountCommand) -> Result<()> {
    match cmd {
        AccountCommand::List => {
            let response = service.list_accounts();
            for account in response.data.iter().flatten() {
                print_account(account);
            }
            report(response)
        }
        AccountCommand::Find { name } => {
            let response = service.find_account(&name);
            if let Some(account) = &response.data {
                print_account(account);
            }
            report(response)
        }
        AccountCommand::Generate => {
            let response = service.generate_credentials();
            if let Some(generated) = &response.data {
                println!("username: {}", generated.username);
                println!("password: {}", generated.password);
            }
            report(response)
        }
        AccountCommand::Add(args) => {
            let password = prompt_password("Account password: ")?;
            report(service.save_account(args.into_account(password)))
        }
        AccountCommand::Update { old_name, account } => {
            let password = prompt_password("Account password: ")?;
            report(service.update_account(&old_name, account.into_account(password)))
        }
        AccountCommand::Delete { name } => report(service.delete_account(&name)),
    }
}

fn run_transactions(service: &VaultService, cmd: TransactionCommand) -> Result<()> {
    match cmd {
        TransactionCommand::List => {
            let response = service.list_transactions();
            for t in response.data.iter().flatten() {
                println!(
                    "{}\t{}\t{}\t{:.2}\t{}\t{}",
                    t.date, t.kind, t.category, t.amount, t.note, t.id
                );
            }
            report(response)
        }
        TransactionCommand::Add {
            date,
            kind,
            category,
            amount,
            note,
        } => {
            let response = service.record_transaction(TransactionDraft {
                date,
                kind,
                category,
                amount,
                note,
            });
            if let Some(id) = &response.data {
                println!("{id}");
            }
            report(response)
        }
        TransactionCommand::Delete { id } => report(service.delete_transaction(&id)),
    }
}

fn print_account(account: &Account) {
    println!("{}\t{}\t{}", account.name, account.username, account.url);
    for note in &account.notes {
        println!("\t- {note}");
    }
}

impl AccountArgs {
    fn into_account(self, password: String) -> Account {
        Account::new(self.name, self.username, password, self.url, self.notes)
    }
}

fn report<T>(response: Response<T>) -> Result<()> {
    if response.success {
        println!("{}", response.message);
        Ok(())
    } else {
        bail!(response.message)
    }
}
