pub mod config;
pub mod form4;
pub mod pipeline;
pub mod store;

// Re-exports
pub use config::IngestConfig;
pub use form4::{classify, extract_filing, normalize_document, Filing, Form4Error, Signal, Tier};
pub use pipeline::{process_filing, ProcessedFiling};
pub use store::{FilingStore, Fingerprint, UpsertOutcome};
