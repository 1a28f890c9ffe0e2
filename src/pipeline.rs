use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form4::error::{Diagnostic, Form4Error};
use crate::form4::signal::{classify, Signal, Tier};
use crate::form4::types::{Filing, Transaction};
use crate::form4::{extract_filing, normalize::decode_document, normalize_document};

static ACCESSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}-\d{2}-\d{6}$").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub transaction: Transaction,
    pub signal: Signal,
}

/// One filing after the full normalize → extract → classify pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFiling {
    pub filing: Filing,
    pub signals: Vec<ClassifiedTransaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessedFiling {
    /// Transactions worth pushing to the alerting consumer. Low-tier
    /// line items are persisted but never alerted.
    pub fn alerts(&self) -> impl Iterator<Item = &ClassifiedTransaction> {
        self.alerts_at(Tier::Medium)
    }

    pub fn alerts_at(&self, floor: Tier) -> impl Iterator<Item = &ClassifiedTransaction> {
        self.signals.iter().filter(move |c| c.signal.tier >= floor)
    }
}

/// Run one filing through the core. Synchronous, single-pass and free of
/// shared state, so callers can fan out one task per filing.
pub fn process_filing(bytes: &[u8], accession_number: &str) -> Result<ProcessedFiling, Form4Error> {
    if !ACCESSION_RE.is_match(accession_number) {
        return Err(Form4Error::InvalidAccessionNumber(
            accession_number.to_string(),
        ));
    }

    let text = decode_document(bytes)?;
    let tree = normalize_document(&text)?;

    let mut diagnostics = Vec::new();
    let filing = extract_filing(&tree, accession_number, &mut diagnostics)?;

    for diagnostic in &diagnostics {
        warn!("filing {}: {}", accession_number, diagnostic);
    }

    // Classification preserves document order; dedup fingerprints and
    // display both depend on it for tie-breaking equal-timestamp rows.
    let signals = filing
        .transactions
        .iter()
        .map(|transaction| ClassifiedTransaction {
            transaction: transaction.clone(),
            signal: classify(transaction),
        })
        .collect::<Vec<_>>();

    info!(
        "processed filing {}: {} owners, {} transactions, {} footnotes",
        accession_number,
        filing.reporting_owners.len(),
        filing.transactions.len(),
        filing.footnotes.len(),
    );

    Ok(ProcessedFiling {
        filing,
        signals,
        diagnostics,
    })
}

/// Downstream notification boundary for High/Medium signals.
#[async_trait]
pub trait AlertSink {
    async fn notify(&self, accession_number: &str, alert: &ClassifiedTransaction) -> Result<()>;
}

/// Push alertable signals to a sink. Delivery failures are logged and
/// skipped; alerting never fails a filing that already extracted cleanly.
pub async fn dispatch_alerts(
    sink: &dyn AlertSink,
    processed: &ProcessedFiling,
    floor: Tier,
) -> usize {
    let accession = &processed.filing.accession_number;
    let mut delivered = 0;
    for alert in processed.alerts_at(floor) {
        match sink.notify(accession, alert).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                "filing {}: alert delivery failed for {}: {}",
                accession, alert.transaction.security_title, e
            ),
        }
    }
    delivered
}
