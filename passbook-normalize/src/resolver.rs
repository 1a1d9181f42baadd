//! Per-row transaction direction and signed amount.
//!
//! Banks encode direction in one of two ways:
//! - separate deposit/withdrawal columns (지급금액/입금금액, 찾으신금액/맡기신금액)
//! - one amount column plus a type column carrying [+]/[-] or 입금/출금 wording

use passbook_core::{ColumnMapping, RawRow, ResolverKeywords, TransactionType};

use crate::values::parse_amount;

/// Direction and signed amount of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub kind: TransactionType,
    /// Positive for deposits, negative (or zero) for withdrawals
    pub amount: f64,
}

impl Resolved {
    fn new(kind: TransactionType, unsigned: f64) -> Self {
        Self {
            kind,
            amount: kind.signed(unsigned),
        }
    }
}

/// Decide direction and signed amount for a row.
///
/// With a transaction-type column the mapped withdrawal column is read as a
/// generic amount column. Otherwise a positive deposit wins over a positive
/// withdrawal, and a row with neither is a zero withdrawal.
pub fn resolve_type_and_amount(
    row: &RawRow,
    mapping: &ColumnMapping,
    keywords: &ResolverKeywords,
) -> Resolved {
    if let Some(type_column) = mapping.transaction_type.as_deref() {
        return resolve_by_type_column(row, type_column, mapping, keywords);
    }

    let withdrawal = parse_amount(row.get_opt(mapping.withdrawal_amount.as_deref()));
    let deposit = parse_amount(row.get_opt(mapping.deposit_amount.as_deref()));

    if deposit > 0.0 {
        if withdrawal > 0.0 {
            tracing::debug!(deposit, withdrawal, "both amount columns set; treating row as deposit");
        }
        return Resolved::new(TransactionType::Deposit, deposit);
    }
    if withdrawal > 0.0 {
        return Resolved::new(TransactionType::Withdrawal, withdrawal);
    }

    Resolved::new(TransactionType::Withdrawal, 0.0)
}

fn resolve_by_type_column(
    row: &RawRow,
    type_column: &str,
    mapping: &ColumnMapping,
    keywords: &ResolverKeywords,
) -> Resolved {
    let type_cell = row.get(type_column);
    let type_text = if type_cell.is_empty() {
        String::new()
    } else {
        type_cell.to_text()
    };

    let is_deposit = keywords
        .deposit_markers
        .iter()
        .any(|marker| !marker.is_empty() && type_text.contains(marker.as_str()));

    let mut amount_cell = row.get_opt(mapping.withdrawal_amount.as_deref());
    if amount_cell.is_empty() {
        amount_cell = row.get(&keywords.amount_fallback_column);
    }
    let amount = parse_amount(amount_cell);

    let kind = if is_deposit {
        TransactionType::Deposit
    } else {
        TransactionType::Withdrawal
    };
    Resolved::new(kind, amount)
}
