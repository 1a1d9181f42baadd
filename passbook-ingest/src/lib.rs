//! passbook-ingest: statement file readers producing header + row tables for
//! the normalizer.

pub mod csv_table;
pub mod types;

pub use csv_table::{decode_statement_bytes, parse_csv_table, read_csv_table};
pub use types::RawTable;
