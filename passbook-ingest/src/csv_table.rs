//! CSV statement exports -> [`RawTable`].
//!
//! Bank exports usually open with a preamble (account holder, period, account
//! number) before the real header row, e.g.:
//!
//!   조회기간,2024.01.01 ~ 2024.01.31
//!   계좌번호,123-456-789012
//!   거래일자,적요,지급금액,입금금액,잔액,취급점
//!   2024.01.05,급여,,3000000,3000000,강남
//!
//! The header row is the first record with at least two headers recognised by
//! the normalizer's keyword tables.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{EUC_KR, Encoding};
use passbook_core::{CellValue, NormalizerConfig, RawRow};

use crate::types::RawTable;

/// Minimum recognised cells for a record to count as the header row
const MIN_RECOGNIZED_HEADERS: usize = 2;

/// Read a statement CSV from disk. UTF-8 (with or without BOM), UTF-16 with
/// BOM and EUC-KR files are accepted.
pub fn read_csv_table(path: impl AsRef<Path>, config: &NormalizerConfig) -> Result<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("opening {}", path.display()))?;
    let text = decode_statement_bytes(&bytes);
    parse_csv_table(text.as_bytes(), config).with_context(|| format!("parsing {}", path.display()))
}

/// Decode raw file bytes: BOM first, then UTF-8, else EUC-KR (the usual
/// encoding of Korean bank downloads).
pub fn decode_statement_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!("input is not UTF-8; decoding as EUC-KR");
            let (text, _) = EUC_KR.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

/// Parse CSV text into headers and rows.
///
/// Records before the header row are ignored, as are records whose cells are
/// all blank. Short records are padded with nulls; cells beyond the header
/// width are dropped.
pub fn parse_csv_table<R: Read>(reader: R, config: &NormalizerConfig) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(|c| c.to_string()).collect());
    }

    let Some(header_row) = find_header_row(&records, config) else {
        return Ok(RawTable::default());
    };

    let headers = unique_headers(&records[header_row]);
    let rows = records[header_row + 1..]
        .iter()
        .filter(|record| !is_blank(record))
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), to_cell(record.get(i))))
                .collect::<RawRow>()
        })
        .collect();

    tracing::debug!(header_row, ?headers, "csv header row");
    Ok(RawTable {
        headers,
        rows,
        header_row,
    })
}

fn find_header_row(records: &[Vec<String>], config: &NormalizerConfig) -> Option<usize> {
    records
        .iter()
        .position(|record| {
            record.iter().filter(|cell| config.recognizes_header(cell)).count()
                >= MIN_RECOGNIZED_HEADERS
        })
        .or_else(|| records.iter().position(|record| !is_blank(record)))
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn to_cell(raw: Option<&String>) -> CellValue {
    match raw.map(|s| s.trim()) {
        Some(s) if !s.is_empty() => CellValue::Text(s.to_string()),
        _ => CellValue::Null,
    }
}

fn unique_headers(record: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    record
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell.trim() {
                "" => format!("column{}", i + 1),
                h => h.to_string(),
            };
            let mut name = base.clone();
            if seen.contains(&name) {
                let n = next_suffix.entry(base.clone()).or_insert(2);
                loop {
                    name = format!("{}_{}", base, n);
                    *n += 1;
                    if !seen.contains(&name) {
                        break;
                    }
                }
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> RawTable {
        parse_csv_table(text.as_bytes(), &NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn test_skips_preamble_to_header_row() {
        let table = parse(
            "조회기간,2024.01.01 ~ 2024.01.31\n\
             계좌번호,123-456-789012\n\
             거래일자,적요,지급금액,입금금액,잔액\n\
             2024.01.05,급여,,3000000,3000000\n",
        );
        assert_eq!(table.header_row, 2);
        assert_eq!(table.headers, vec!["거래일자", "적요", "지급금액", "입금금액", "잔액"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("입금금액"), &CellValue::from("3000000"));
        assert_eq!(table.rows[0].get("지급금액"), &CellValue::Null);
    }

    #[test]
    fn test_falls_back_to_first_non_blank_row() {
        let table = parse("\nA,B\n1,2\n");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_pads_short_rows_and_skips_blank_rows() {
        let table = parse("거래일자,비고,잔액\n2024-01-05,메모\n,,\n");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("잔액"), &CellValue::Null);
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_blank_and_duplicate_headers_are_made_unique() {
        let table = parse("거래일자,잔액,,잔액\n20240105,1,2,3\n");
        assert_eq!(table.headers, vec!["거래일자", "잔액", "column3", "잔액_2"]);
        assert_eq!(table.rows[0].get("잔액_2"), &CellValue::from("3"));
    }

    #[test]
    fn test_renamed_duplicate_does_not_clobber_existing_header() {
        let table = parse("거래일자,잔액,잔액_2,잔액\n20240105,1,2,3\n");
        assert_eq!(table.headers, vec!["거래일자", "잔액", "잔액_2", "잔액_3"]);
        assert_eq!(table.rows[0].len(), 4);
        assert_eq!(table.rows[0].get("잔액_2"), &CellValue::from("2"));
        assert_eq!(table.rows[0].get("잔액_3"), &CellValue::from("3"));
    }

    #[test]
    fn test_empty_input() {
        let table = parse("");
        assert!(table.is_empty());
        assert!(table.headers.is_empty());
    }

    #[test]
    fn test_decodes_euc_kr_and_bom() {
        let (bytes, _, _) = EUC_KR.encode("거래일자,잔액\n");
        assert_eq!(decode_statement_bytes(&bytes), "거래일자,잔액\n");

        let mut with_bom = vec![0xEF, 0xBB, 0xBF];
        with_bom.extend_from_slice("비고".as_bytes());
        assert_eq!(decode_statement_bytes(&with_bom), "비고");
    }

    #[test]
    fn test_read_csv_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let (bytes, _, _) = EUC_KR.encode("거래일자,입금액,출금액\n2024-01-05,1000,\n");
        file.write_all(&bytes).unwrap();

        let table = read_csv_table(file.path(), &NormalizerConfig::default()).unwrap();
        assert_eq!(table.headers, vec!["거래일자", "입금액", "출금액"]);
        assert_eq!(table.rows[0].get("입금액"), &CellValue::from("1000"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_csv_table("/definitely/not/here.csv", &NormalizerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
