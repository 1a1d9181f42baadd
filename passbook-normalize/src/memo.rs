//! Memo text recovery per row.

use passbook_core::{CellValue, ColumnMapping, RawRow, ResolverKeywords, TransactionType, normalize_header};

use crate::values::looks_numeric;

/// Pull the memo text for one row.
///
/// Order: detected memo column, then the opposite amount column when it holds
/// text (some banks print the memo there), then any 적요/내용-like column,
/// then empty.
pub fn extract_memo(
    row: &RawRow,
    kind: TransactionType,
    mapping: &ColumnMapping,
    memo_column: Option<&str>,
    keywords: &ResolverKeywords,
) -> String {
    if let Some(column) = memo_column {
        let cell = row.get(column);
        if !cell.is_empty() {
            return cell.to_text().trim().to_string();
        }
    }

    let opposite = match kind {
        TransactionType::Deposit => mapping.withdrawal_amount.as_deref(),
        TransactionType::Withdrawal => mapping.deposit_amount.as_deref(),
    };
    if let Some(CellValue::Text(s)) = opposite.map(|col| row.get(col)) {
        if !s.is_empty() && !looks_numeric(s) {
            return s.trim().to_string();
        }
    }

    for (key, value) in row.iter() {
        let key = normalize_header(key);
        let hit = keywords
            .content_keys
            .iter()
            .any(|k| !k.is_empty() && key.contains(&normalize_header(k)));
        if hit {
            return if value.is_empty() {
                String::new()
            } else {
                value.to_text().trim().to_string()
            };
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping {
            date: Some("거래일자".to_string()),
            withdrawal_amount: Some("지급금액".to_string()),
            deposit_amount: Some("입금금액".to_string()),
            balance: Some("잔액".to_string()),
            transaction_type: None,
        }
    }

    fn extract(row: &RawRow, kind: TransactionType, memo_column: Option<&str>) -> String {
        extract_memo(row, kind, &mapping(), memo_column, &ResolverKeywords::default())
    }

    #[test]
    fn test_memo_column_wins() {
        let row: RawRow = [("비고", "  급여  "), ("지급금액", "김철수")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Deposit, Some("비고")), "급여");
    }

    #[test]
    fn test_misplaced_memo_in_opposite_amount_column() {
        let row: RawRow = [("입금금액", "50,000"), ("지급금액", "홍길동 ")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Deposit, None), "홍길동");

        let row: RawRow = [("입금금액", "관리비"), ("지급금액", "30,000")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, None), "관리비");
    }

    #[test]
    fn test_numeric_opposite_column_is_not_memo() {
        let row: RawRow = [("입금금액", "50,000"), ("지급금액", "0")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Deposit, None), "");
    }

    #[test]
    fn test_empty_memo_column_falls_through() {
        let row: RawRow = [("비고", ""), ("적요", "타행이체")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, Some("비고")), "타행이체");
    }

    #[test]
    fn test_whitespace_memo_cell_is_still_the_memo() {
        let row: RawRow = [("비고", "   "), ("적요", "타행이체")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, Some("비고")), "");
    }

    #[test]
    fn test_whitespace_in_opposite_amount_column_is_the_memo() {
        let row: RawRow = [("입금금액", "50,000"), ("지급금액", "  "), ("적요", "급여")]
            .into_iter()
            .collect();
        assert_eq!(extract(&row, TransactionType::Deposit, None), "");
    }

    #[test]
    fn test_first_content_key_column_wins_even_when_empty() {
        let row: RawRow = [("적요", ""), ("내용", "ATM출금")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, None), "");
    }

    #[test]
    fn test_content_key_scan_is_case_insensitive() {
        let row: RawRow = [("No", "1"), ("Transaction Description", " ATM ")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, None), "ATM");
    }

    #[test]
    fn test_numeric_memo_cell_rendered_as_text() {
        let row: RawRow = [("비고", CellValue::from(1234.0))].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, Some("비고")), "1234");
    }

    #[test]
    fn test_nothing_found() {
        let row: RawRow = [("No", "1")].into_iter().collect();
        assert_eq!(extract(&row, TransactionType::Withdrawal, None), "");
    }
}
