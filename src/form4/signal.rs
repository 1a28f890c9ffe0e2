use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::TransactionCode;
use super::types::{AcquiredDisposed, Transaction};

/// Market-significance tier. Ordered so that alert floors can be expressed
/// as a simple comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => write!(f, "low"),
            Tier::Medium => write!(f, "medium"),
            Tier::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    OpenMarketPurchase,
    OpenMarketSale,
    GrantAward,
    OptionExercise,
    Conversion,
    Gift,
    TaxWithholding,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::OpenMarketPurchase => write!(f, "open-market purchase"),
            Category::OpenMarketSale => write!(f, "open-market sale"),
            Category::GrantAward => write!(f, "grant/award"),
            Category::OptionExercise => write!(f, "option exercise"),
            Category::Conversion => write!(f, "conversion"),
            Category::Gift => write!(f, "gift"),
            Category::TaxWithholding => write!(f, "tax withholding"),
            Category::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub tier: Tier,
    pub category: Category,
}

impl Signal {
    const fn new(tier: Tier, category: Category) -> Self {
        Self { tier, category }
    }
}

/// Assign an importance tier and semantic category to one line item.
///
/// Total over every transaction code: unrecognized codes land on the
/// default arm rather than failing, since suppressing a filing is worse
/// than mis-tiering it. For code A on a derivative security, derivative
/// status takes precedence over the acquired/disposed flag (a grant of
/// options, not a cash acquisition).
pub fn classify(transaction: &Transaction) -> Signal {
    use AcquiredDisposed::{Acquired, Disposed};

    let derivative = transaction.is_derivative();
    match (&transaction.code, transaction.acquired_disposed, derivative) {
        (TransactionCode::Grant, _, true) => Signal::new(Tier::Low, Category::GrantAward),
        (TransactionCode::Grant, Acquired, false) => Signal::new(Tier::Low, Category::GrantAward),
        (TransactionCode::Purchase, Acquired, false) => {
            Signal::new(Tier::High, Category::OpenMarketPurchase)
        }
        (TransactionCode::Sale, Disposed, false) => {
            Signal::new(Tier::High, Category::OpenMarketSale)
        }
        (TransactionCode::Exercise, _, _) => Signal::new(Tier::Medium, Category::OptionExercise),
        (TransactionCode::Conversion, _, true) => Signal::new(Tier::Medium, Category::Conversion),
        (TransactionCode::Gift, _, _) => Signal::new(Tier::Low, Category::Gift),
        (TransactionCode::TaxWithholding, _, _) => {
            Signal::new(Tier::Low, Category::TaxWithholding)
        }
        _ => Signal::new(Tier::Medium, Category::Other),
    }
}
