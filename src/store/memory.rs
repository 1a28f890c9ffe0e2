use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::{FilingStore, Fingerprint, UpsertOutcome};
use crate::form4::types::Filing;

/// Ephemeral store for tests and single-shot pipelines. Dedup is the same
/// fingerprint set a durable backend would key on.
#[derive(Default)]
pub struct MemoryFilingStore {
    fingerprints: RwLock<HashSet<String>>,
    filings: RwLock<HashMap<String, Filing>>,
}

impl MemoryFilingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filing(&self, accession_number: &str) -> Option<Filing> {
        self.filings.read().unwrap().get(accession_number).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.fingerprints.read().unwrap().len()
    }
}

#[async_trait]
impl FilingStore for MemoryFilingStore {
    async fn upsert_filing(&self, filing: &Filing) -> Result<UpsertOutcome> {
        let mut outcome = UpsertOutcome::default();
        {
            let mut seen = self.fingerprints.write().unwrap();
            for transaction in &filing.transactions {
                let fingerprint = Fingerprint::of(&filing.accession_number, transaction);
                if seen.insert(fingerprint.as_str().to_string()) {
                    outcome.inserted += 1;
                } else {
                    outcome.duplicates += 1;
                }
            }
        }
        self.filings
            .write()
            .unwrap()
            .entry(filing.accession_number.clone())
            .or_insert_with(|| filing.clone());

        debug!(
            "upserted filing {}: {} inserted, {} duplicates",
            filing.accession_number, outcome.inserted, outcome.duplicates
        );
        Ok(outcome)
    }
}
