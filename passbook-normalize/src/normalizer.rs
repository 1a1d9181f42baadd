//! Statement normalization: detect the layout once, then map each row onto
//! the standard 거래일자/구분/금액/잔액/비고 record.

use passbook_core::{ColumnMapping, NormalizedTransaction, NormalizerConfig, RawRow};
use serde::Serialize;
use thiserror::Error;

use crate::column_roles::detect_column_roles;
use crate::memo::extract_memo;
use crate::memo_column::detect_memo_column;
use crate::resolver::resolve_type_and_amount;
use crate::values::{normalize_date, parse_amount};

/// Why a single row was rejected. Rejected rows are logged and skipped.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("amount is not a finite number: {0}")]
    NonFiniteAmount(f64),

    #[error("balance in column '{column}' is not a finite number: {value}")]
    NonFiniteBalance { column: String, value: f64 },
}

/// Column layout detected for one document
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLayout {
    pub mapping: ColumnMapping,
    pub memo_column: Option<String>,
}

/// Normalizes statement rows with a fixed set of keyword tables
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Column roles and memo column for a document
    pub fn detect<S: AsRef<str>>(&self, headers: &[S], rows: &[RawRow]) -> DetectedLayout {
        let mapping = detect_column_roles(headers, &self.config.roles);
        let memo_column = detect_memo_column(headers, rows, &mapping, &self.config.memo);
        DetectedLayout {
            mapping,
            memo_column,
        }
    }

    /// Normalize every row with a resolvable date.
    ///
    /// Rows without a date are dropped; rows failing with a [`RowError`] are
    /// logged and dropped. Never fails as a whole.
    pub fn normalize<S: AsRef<str>>(&self, headers: &[S], rows: &[RawRow]) -> Vec<NormalizedTransaction> {
        if rows.is_empty() {
            return Vec::new();
        }

        let layout = self.detect(headers, rows);
        tracing::debug!(mapping = ?layout.mapping, "column mapping");
        tracing::debug!(memo_column = ?layout.memo_column, "memo column");

        let mut out = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;

        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(row, &layout) {
                Ok(Some(txn)) => out.push(txn),
                Ok(None) => skipped += 1,
                Err(err) => {
                    tracing::warn!(row = index, error = %err, raw = ?row, "skipping row");
                    skipped += 1;
                }
            }
        }

        tracing::info!(normalized = out.len(), skipped, "normalized statement rows");
        out
    }

    /// One row; `Ok(None)` when the row has no usable date.
    pub fn normalize_row(
        &self,
        row: &RawRow,
        layout: &DetectedLayout,
    ) -> Result<Option<NormalizedTransaction>, RowError> {
        let mapping = &layout.mapping;

        let transaction_date = normalize_date(row.get_opt(mapping.date.as_deref()));
        if transaction_date.is_empty() {
            return Ok(None);
        }

        let resolved = resolve_type_and_amount(row, mapping, &self.config.resolver);
        if !resolved.amount.is_finite() {
            return Err(RowError::NonFiniteAmount(resolved.amount));
        }

        let balance = parse_amount(row.get_opt(mapping.balance.as_deref()));
        if !balance.is_finite() {
            return Err(RowError::NonFiniteBalance {
                column: mapping.balance.clone().unwrap_or_default(),
                value: balance,
            });
        }

        let memo = extract_memo(
            row,
            resolved.kind,
            mapping,
            layout.memo_column.as_deref(),
            &self.config.resolver,
        );

        Ok(Some(NormalizedTransaction {
            transaction_date,
            kind: resolved.kind,
            amount: resolved.amount,
            balance,
            memo,
            original_data: row.clone(),
        }))
    }
}

/// Normalize with the default keyword tables.
pub fn normalize_transactions<S: AsRef<str>>(rows: &[RawRow], headers: &[S]) -> Vec<NormalizedTransaction> {
    Normalizer::new().normalize(headers, rows)
}
