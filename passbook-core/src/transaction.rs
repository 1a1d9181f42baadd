//! Column mapping and normalized transaction types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cell::RawRow;

/// Semantic role a statement column can play
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "withdrawal")]
    Withdrawal,
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "balance")]
    Balance,
    #[serde(rename = "transaction-type")]
    TransactionType,
}

impl ColumnRole {
    /// Detection order used when scanning a header.
    pub const ALL: [ColumnRole; 5] = [
        ColumnRole::Date,
        ColumnRole::Withdrawal,
        ColumnRole::Deposit,
        ColumnRole::Balance,
        ColumnRole::TransactionType,
    ];

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Date => "거래일자",
            ColumnRole::Withdrawal => "출금액",
            ColumnRole::Deposit => "입금액",
            ColumnRole::Balance => "잔액",
            ColumnRole::TransactionType => "거래구분",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, ColumnRole::Date)
    }
}

/// Resolved role -> original header name, detected once per document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub date: Option<String>,
    pub withdrawal_amount: Option<String>,
    pub deposit_amount: Option<String>,
    pub balance: Option<String>,
    pub transaction_type: Option<String>,
}

impl ColumnMapping {
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Date => self.date.as_deref(),
            ColumnRole::Withdrawal => self.withdrawal_amount.as_deref(),
            ColumnRole::Deposit => self.deposit_amount.as_deref(),
            ColumnRole::Balance => self.balance.as_deref(),
            ColumnRole::TransactionType => self.transaction_type.as_deref(),
        }
    }

    pub fn set(&mut self, role: ColumnRole, header: impl Into<String>) {
        let slot = match role {
            ColumnRole::Date => &mut self.date,
            ColumnRole::Withdrawal => &mut self.withdrawal_amount,
            ColumnRole::Deposit => &mut self.deposit_amount,
            ColumnRole::Balance => &mut self.balance,
            ColumnRole::TransactionType => &mut self.transaction_type,
        };
        *slot = Some(header.into());
    }

    /// True when `header` already carries a role
    pub fn is_assigned(&self, header: &str) -> bool {
        ColumnRole::ALL
            .iter()
            .any(|role| self.get(*role) == Some(header))
    }

    /// Required roles that detection did not find
    pub fn missing_required(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| role.is_required() && self.get(*role).is_none())
            .collect()
    }

    /// Either separate deposit/withdrawal columns or a single amount column exist
    pub fn has_amount_columns(&self) -> bool {
        self.deposit_amount.is_some() || self.withdrawal_amount.is_some()
    }
}

/// Direction of money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "입금")]
    Deposit,
    #[serde(rename = "출금")]
    Withdrawal,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "입금",
            TransactionType::Withdrawal => "출금",
        }
    }

    /// Apply this direction's sign to an unsigned amount
    pub fn signed(&self, amount: f64) -> f64 {
        let magnitude = amount.abs();
        match self {
            TransactionType::Deposit => magnitude,
            // no negative zero in output
            TransactionType::Withdrawal if magnitude == 0.0 => 0.0,
            TransactionType::Withdrawal => -magnitude,
        }
    }
}

/// One bank transaction in the standard layout
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransaction {
    /// YYYY-MM-DD when the source date was recognised, the raw text otherwise
    pub transaction_date: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Positive = deposit, negative = withdrawal
    pub amount: f64,
    pub balance: f64,
    pub memo: String,
    /// Source row, kept for audit
    pub original_data: RawRow,
}

impl NormalizedTransaction {
    /// Calendar date, when the normalized date is a valid YYYY-MM-DD
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.transaction_date, "%Y-%m-%d").ok()
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionType::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionType::Withdrawal
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_roles_round_trip() {
        let mut mapping = ColumnMapping::default();
        mapping.set(ColumnRole::Deposit, "입금액");
        mapping.set(ColumnRole::Balance, "잔액");
        assert_eq!(mapping.get(ColumnRole::Deposit), Some("입금액"));
        assert!(mapping.is_assigned("잔액"));
        assert!(!mapping.is_assigned("비고"));
        assert_eq!(mapping.missing_required(), vec![ColumnRole::Date]);
        assert!(mapping.has_amount_columns());
    }

    #[test]
    fn test_signed_matches_direction() {
        assert_eq!(TransactionType::Deposit.signed(-5.0), 5.0);
        assert_eq!(TransactionType::Withdrawal.signed(5.0), -5.0);
    }

    #[test]
    fn test_transaction_serializes_with_korean_type() {
        let txn = NormalizedTransaction {
            transaction_date: "2024-01-05".to_string(),
            kind: TransactionType::Deposit,
            amount: 3000000.0,
            balance: 3000000.0,
            memo: "급여".to_string(),
            original_data: RawRow::new(),
        };
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "입금");
        assert_eq!(value["transactionDate"], "2024-01-05");
        assert_eq!(value["memo"], "급여");
        assert_eq!(txn.date(), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn test_unparseable_date_has_no_calendar_date() {
        let txn = NormalizedTransaction {
            transaction_date: "05/01/2024".to_string(),
            kind: TransactionType::Withdrawal,
            amount: -1.0,
            balance: 0.0,
            memo: String::new(),
            original_data: RawRow::new(),
        };
        assert_eq!(txn.date(), None);
        assert!(txn.is_withdrawal());
    }
}
