use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::form4::types::{Filing, Transaction};

/// Dedup key for one line item. Built only from semantically stable filing
/// content — never from server-assigned row ids — so amended and
/// resubmitted filings dedup correctly across reprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(accession_number: &str, transaction: &Transaction) -> Self {
        let shares = transaction
            .shares
            .map(|s| s.normalize().to_string())
            .unwrap_or_default();
        let derivative = if transaction.is_derivative() { "D" } else { "N" };
        Fingerprint(format!(
            "{}|{}|{}|{}|{}|{}|{}",
            accession_number,
            transaction.owner_cik,
            transaction.security_title,
            transaction.transaction_date,
            transaction.code,
            shares,
            derivative,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-filing upsert accounting. Replaying a filing reports its whole batch
/// as duplicates and inserts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Storage boundary consumed by the pipeline. Implementations must make
/// `upsert_filing` idempotent: the batch for one accession number is written
/// all-or-nothing, and replays leave stored state unchanged.
#[async_trait]
pub trait FilingStore {
    async fn upsert_filing(&self, filing: &Filing) -> Result<UpsertOutcome>;
}

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryFilingStore;
pub use self::postgres::PgFilingStore;
