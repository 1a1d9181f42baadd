//! passbook-normalize: column role detection, memo detection, value parsing
//! and row normalization for bank statements, plus important-transaction
//! tagging, amount filters and statement summaries.

pub mod column_roles;
pub mod filter;
pub mod important;
pub mod memo;
pub mod memo_column;
pub mod normalizer;
pub mod resolver;
pub mod summary;
pub mod values;

pub use column_roles::detect_column_roles;
pub use filter::{AmountRange, filter_by_amount, parse_amount_bound};
pub use important::{detect_important_kind, important_transactions, matched_keywords};
pub use memo::extract_memo;
pub use memo_column::detect_memo_column;
pub use normalizer::{DetectedLayout, Normalizer, RowError, normalize_transactions};
pub use resolver::{Resolved, resolve_type_and_amount};
pub use summary::StatementSummary;
pub use values::{normalize_date, parse_amount};
