use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::codes::TransactionCode;

/// One fully extracted Form 4 submission. Built in a single pass over one
/// XML document; either complete or not constructed at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    pub accession_number: String,
    pub schema_version: Option<String>,
    pub document_type: Option<String>,
    pub period_of_report: Option<NaiveDate>,
    pub issuers: Vec<Issuer>,
    pub reporting_owners: Vec<ReportingOwner>,
    pub transactions: Vec<Transaction>,
    pub footnotes: Vec<Footnote>,
    pub signatures: Vec<Signature>,
}

impl Filing {
    /// Primary issuer. Form 4 filings carry exactly one in practice.
    pub fn issuer(&self) -> &Issuer {
        &self.issuers[0]
    }

    pub fn footnote(&self, id: &str) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub cik: String,
    pub name: String,
    pub trading_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerAddress {
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingOwner {
    pub cik: String,
    pub name: String,
    pub address: Option<OwnerAddress>,
    pub is_director: bool,
    pub is_officer: bool,
    pub is_ten_percent_owner: bool,
    pub is_other: bool,
    pub officer_title: Option<String>,
}

/// Whether the reported line item acquired or disposed of the security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquiredDisposed {
    Acquired,
    Disposed,
}

impl FromStr for AcquiredDisposed {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AcquiredDisposed::Acquired),
            "D" => Ok(AcquiredDisposed::Disposed),
            other => Err(format!("expected A or D, got {:?}", other)),
        }
    }
}

impl fmt::Display for AcquiredDisposed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquiredDisposed::Acquired => write!(f, "A"),
            AcquiredDisposed::Disposed => write!(f, "D"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnershipNature {
    Direct,
    Indirect,
}

impl FromStr for OwnershipNature {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "D" => Ok(OwnershipNature::Direct),
            "I" => Ok(OwnershipNature::Indirect),
            other => Err(format!("expected D or I, got {:?}", other)),
        }
    }
}

impl fmt::Display for OwnershipNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipNature::Direct => write!(f, "D"),
            OwnershipNature::Indirect => write!(f, "I"),
        }
    }
}

/// Terms present only on derivative securities (options, RSUs, phantom
/// stock). All fields are footnote-only in some filings, hence optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivativeTerms {
    pub underlying_title: Option<String>,
    pub underlying_shares: Option<Decimal>,
    pub conversion_or_exercise_price: Option<Decimal>,
    pub exercise_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SecurityClass {
    NonDerivative,
    Derivative(DerivativeTerms),
}

/// One reported line item, attributed to exactly one reporting owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub owner_cik: String,
    pub security_title: String,
    pub transaction_date: NaiveDate,
    pub code: TransactionCode,
    pub shares: Option<Decimal>,
    pub price_per_share: Option<Decimal>,
    pub acquired_disposed: AcquiredDisposed,
    pub shares_owned_following: Option<Decimal>,
    pub ownership: OwnershipNature,
    pub indirect_ownership_nature: Option<String>,
    pub security_class: SecurityClass,
    pub footnote_ids: Vec<String>,
}

impl Transaction {
    pub fn is_derivative(&self) -> bool {
        matches!(self.security_class, SecurityClass::Derivative(_))
    }

    pub fn derivative_terms(&self) -> Option<&DerivativeTerms> {
        match &self.security_class {
            SecurityClass::Derivative(terms) => Some(terms),
            SecurityClass::NonDerivative => None,
        }
    }
}

/// Free-text clarification keyed by an id unique within the filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub date: NaiveDate,
}
