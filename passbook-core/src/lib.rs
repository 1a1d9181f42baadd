//! passbook-core: raw statement cells, column roles, normalized transactions
//! and the keyword tables that drive detection.

pub mod cell;
pub mod keywords;
pub mod transaction;

pub use cell::{CellValue, RawRow};
pub use keywords::{
    ImportantKeywords, ImportantKind, KeywordRule, MemoDetection, NormalizerConfig,
    ResolverKeywords, RoleKeywords, normalize_header,
};
pub use transaction::{ColumnMapping, ColumnRole, NormalizedTransaction, TransactionType};
