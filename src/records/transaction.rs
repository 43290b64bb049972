// src/records/transaction.rs
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VaultRecord;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(CoreError::Invalid(
                "Transaction type must be credit or debit.".into(),
            )),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => f.write_str("credit"),
            Self::Debit => f.write_str("debit"),
        }
    }
}

/// User input for a new transaction, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "transactionDate")]
    pub date: NaiveDate,
    #[serde(rename = "transactionType")]
    pub kind: TransactionKind,
    #[serde(rename = "transactionCategory")]
    pub category: String,
    #[serde(rename = "transactionAmount")]
    pub amount: f64,
    #[serde(rename = "transactionNote", default)]
    pub note: String,
}

impl TransactionDraft {
    /// All rule violations joined into one message, like the input form shows them
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        let mut errors = Vec::new();

        if self.date > today {
            errors.push("Transaction date cannot be in the future.");
        }
        if self.category.trim().is_empty() {
            errors.push("Transaction category is required.");
        }
        if !self.amount.is_finite() {
            errors.push("Transaction amount must be a number.");
        } else if self.amount <= 0.0 {
            errors.push("Transaction amount must be greater than zero.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Invalid(errors.join(" ")))
        }
    }

    /// Validate and assign a fresh id
    pub fn into_transaction(self, today: NaiveDate) -> Result<Transaction> {
        self.validate(today)?;
        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            date: self.date,
            kind: self.kind,
            category: self.category.trim().to_string(),
            amount: self.amount,
            note: self.note,
        })
    }
}

/// Recorded financial transaction, keyed by its generated `id`
///
/// Transactions are never edited, only recorded and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "transactionDate")]
    pub date: NaiveDate,
    #[serde(rename = "transactionType")]
    pub kind: TransactionKind,
    #[serde(rename = "transactionCategory")]
    pub category: String,
    #[serde(rename = "transactionAmount")]
    pub amount: f64,
    #[serde(rename = "transactionNote", default)]
    pub note: String,
}

impl VaultRecord for Transaction {
    const KIND: &'static str = "Transaction";

    fn unique_key(&self) -> &str {
        &self.id
    }
}
