use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal extraction errors. A filing that hits one of these is never
/// partially persisted; the caller decides whether to retry or quarantine.
#[derive(Debug, Error)]
pub enum Form4Error {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("missing required field: {path}")]
    MissingRequiredField { path: String },

    #[error("invalid value at {path}: {message}")]
    InvalidFieldValue { path: String, message: String },

    #[error("invalid accession number: {0}")]
    InvalidAccessionNumber(String),
}

impl Form4Error {
    pub fn missing(path: impl Into<String>) -> Self {
        Form4Error::MissingRequiredField { path: path.into() }
    }

    pub fn invalid(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Form4Error::InvalidFieldValue {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    DuplicateFootnoteId,
    UnrecognizedTransactionCode,
}

/// Non-fatal data-integrity findings. Processing continues with a documented
/// default; the finding is logged and handed back to the caller in-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
