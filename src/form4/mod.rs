pub mod codes;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod signal;
pub mod types;

pub use codes::TransactionCode;
pub use error::{Diagnostic, DiagnosticKind, Form4Error};
pub use extract::extract_filing;
pub use normalize::{decode_document, normalize_document};
pub use signal::{classify, Category, Signal, Tier};
pub use types::{
    AcquiredDisposed, DerivativeTerms, Filing, Footnote, Issuer, OwnershipNature, ReportingOwner,
    SecurityClass, Signature, Transaction,
};
