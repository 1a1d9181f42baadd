use passbook_core::RawRow;

/// Tabular statement data as read from a file, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column headers in file order; blanks become `column{N}`, repeats get a
    /// `_{N}` suffix so every header is unique
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Zero-based record index of the header row in the source file
    pub header_row: usize,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
