//! Amount range filtering over normalized transactions.

use passbook_core::NormalizedTransaction;
use serde::{Deserialize, Serialize};

/// Inclusive bounds on the absolute transaction amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// min must not exceed max when both are set
    pub fn is_valid(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    pub fn contains(&self, txn: &NormalizedTransaction) -> bool {
        let amount = txn.abs_amount();
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Transactions inside `range`; everything when the range is unbounded
pub fn filter_by_amount<'a>(
    txns: &'a [NormalizedTransaction],
    range: &AmountRange,
) -> Vec<&'a NormalizedTransaction> {
    if range.is_unbounded() {
        return txns.iter().collect();
    }
    txns.iter().filter(|t| range.contains(t)).collect()
}

/// Parse a user-entered bound like "1,000,000". Negative or non-numeric
/// input gives `None`.
pub fn parse_amount_bound(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(',', "");
    let value: f64 = cleaned.parse().ok()?;
    if value.is_nan() || value < 0.0 {
        return None;
    }
    Some(value)
}
