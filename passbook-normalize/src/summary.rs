//! Per-statement totals over normalized transactions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use passbook_core::{ImportantKeywords, ImportantKind, NormalizedTransaction};
use serde::Serialize;

use crate::important::detect_important_kind;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    pub transaction_count: usize,
    pub deposit_count: usize,
    pub withdrawal_count: usize,
    pub total_deposits: f64,
    /// Absolute value
    pub total_withdrawals: f64,
    pub net: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Balance of the last row, statement order
    pub closing_balance: Option<f64>,
    pub important: BTreeMap<ImportantKind, usize>,
}

impl StatementSummary {
    pub fn from_transactions(txns: &[NormalizedTransaction], keywords: &ImportantKeywords) -> Self {
        let mut summary = StatementSummary {
            transaction_count: txns.len(),
            closing_balance: txns.last().map(|t| t.balance),
            ..Default::default()
        };

        for txn in txns {
            if txn.is_deposit() {
                summary.deposit_count += 1;
                summary.total_deposits += txn.abs_amount();
            } else {
                summary.withdrawal_count += 1;
                summary.total_withdrawals += txn.abs_amount();
            }

            if let Some(date) = txn.date() {
                summary.first_date = Some(summary.first_date.map_or(date, |d| d.min(date)));
                summary.last_date = Some(summary.last_date.map_or(date, |d| d.max(date)));
            }

            if let Some(kind) = detect_important_kind(&txn.memo, keywords) {
                *summary.important.entry(kind).or_insert(0) += 1;
            }
        }

        summary.net = summary.total_deposits - summary.total_withdrawals;
        summary
    }
}
