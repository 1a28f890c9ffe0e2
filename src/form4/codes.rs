use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// SEC transaction codes as reported in box 3 of Form 4 tables. The set is
/// closed per the Form 4 instructions; anything outside it is carried as
/// `Other` so a bad code never drops a filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum TransactionCode {
    Purchase,
    Sale,
    VoluntarilyReported,
    Grant,
    DispositionToIssuer,
    TaxWithholding,
    DiscretionaryTransaction,
    Exercise,
    Conversion,
    ExpirationShort,
    ExpirationLong,
    OutOfTheMoneyExercise,
    InTheMoneyExercise,
    Gift,
    SmallAcquisition,
    Inheritance,
    DepositWithdrawalVotingTrust,
    OtherAcquisitionDisposition,
    EquitySwap,
    TenderOfShares,
    Other(String),
}

impl TransactionCode {
    pub fn is_known(&self) -> bool {
        !matches!(self, TransactionCode::Other(_))
    }

    pub fn list_codes() -> &'static str {
        &TRANSACTION_CODES
    }
}

impl TryFrom<String> for TransactionCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TransactionCode::from_str(&s)
    }
}

impl From<TransactionCode> for String {
    fn from(code: TransactionCode) -> String {
        code.to_string()
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionCode::Purchase => write!(f, "P"),
            TransactionCode::Sale => write!(f, "S"),
            TransactionCode::VoluntarilyReported => write!(f, "V"),
            TransactionCode::Grant => write!(f, "A"),
            TransactionCode::DispositionToIssuer => write!(f, "D"),
            TransactionCode::TaxWithholding => write!(f, "F"),
            TransactionCode::DiscretionaryTransaction => write!(f, "I"),
            TransactionCode::Exercise => write!(f, "M"),
            TransactionCode::Conversion => write!(f, "C"),
            TransactionCode::ExpirationShort => write!(f, "E"),
            TransactionCode::ExpirationLong => write!(f, "H"),
            TransactionCode::OutOfTheMoneyExercise => write!(f, "O"),
            TransactionCode::InTheMoneyExercise => write!(f, "X"),
            TransactionCode::Gift => write!(f, "G"),
            TransactionCode::SmallAcquisition => write!(f, "L"),
            TransactionCode::Inheritance => write!(f, "W"),
            TransactionCode::DepositWithdrawalVotingTrust => write!(f, "Z"),
            TransactionCode::OtherAcquisitionDisposition => write!(f, "J"),
            TransactionCode::EquitySwap => write!(f, "K"),
            TransactionCode::TenderOfShares => write!(f, "U"),
            TransactionCode::Other(s) => write!(f, "{}", s),
        }
    }
}

pub static TRANSACTION_CODES: Lazy<String> = Lazy::new(|| {
    TransactionCode::iter()
        .filter(|c| !matches!(c, TransactionCode::Other(_)))
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl FromStr for TransactionCode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<TransactionCode, String> {
        match s.trim().to_uppercase().as_str() {
            "P" => Ok(TransactionCode::Purchase),
            "S" => Ok(TransactionCode::Sale),
            "V" => Ok(TransactionCode::VoluntarilyReported),
            "A" => Ok(TransactionCode::Grant),
            "D" => Ok(TransactionCode::DispositionToIssuer),
            "F" => Ok(TransactionCode::TaxWithholding),
            "I" => Ok(TransactionCode::DiscretionaryTransaction),
            "M" => Ok(TransactionCode::Exercise),
            "C" => Ok(TransactionCode::Conversion),
            "E" => Ok(TransactionCode::ExpirationShort),
            "H" => Ok(TransactionCode::ExpirationLong),
            "O" => Ok(TransactionCode::OutOfTheMoneyExercise),
            "X" => Ok(TransactionCode::InTheMoneyExercise),
            "G" => Ok(TransactionCode::Gift),
            "L" => Ok(TransactionCode::SmallAcquisition),
            "W" => Ok(TransactionCode::Inheritance),
            "Z" => Ok(TransactionCode::DepositWithdrawalVotingTrust),
            "J" => Ok(TransactionCode::OtherAcquisitionDisposition),
            "K" => Ok(TransactionCode::EquitySwap),
            "U" => Ok(TransactionCode::TenderOfShares),
            _ => Ok(TransactionCode::Other(s.trim().to_string())),
        }
    }
}
