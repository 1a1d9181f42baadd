//! Header-based column role detection.

use passbook_core::{ColumnMapping, ColumnRole, RoleKeywords, normalize_header};

/// Assign semantic roles to statement headers.
///
/// Headers are scanned left to right and the first header matching a role's
/// keywords claims that role; later matches for the same role are ignored.
/// A single header may claim several roles (e.g. "입출금구분").
pub fn detect_column_roles<S: AsRef<str>>(headers: &[S], keywords: &RoleKeywords) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for original in headers {
        let original = original.as_ref();
        let header = normalize_header(original);
        if header.is_empty() {
            continue;
        }

        for role in ColumnRole::ALL {
            if mapping.get(role).is_some() {
                continue;
            }
            if keywords.rules(role).iter().any(|rule| rule.matches(&header)) {
                mapping.set(role, original);
            }
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(headers: &[&str]) -> ColumnMapping {
        detect_column_roles(headers, &RoleKeywords::default())
    }

    #[test]
    fn test_separate_columns_layout() {
        // 거래일자, 일련번호, 적요, 상태, 지급금액, 입금금액, 잔액, 취급점, 시각, Teller
        let m = detect(&[
            "거래일자", "일련번호", "적요", "상태", "지급금액", "입금금액", "잔액", "취급점", "시각",
            "Teller",
        ]);
        assert_eq!(m.date.as_deref(), Some("거래일자"));
        assert_eq!(m.withdrawal_amount.as_deref(), Some("지급금액"));
        assert_eq!(m.deposit_amount.as_deref(), Some("입금금액"));
        assert_eq!(m.balance.as_deref(), Some("잔액"));
        assert_eq!(m.transaction_type, None);
    }

    #[test]
    fn test_passbook_wording_layout() {
        let m = detect(&["거래일자", "내용", "찾으신금액", "맡기신금액", "비고", "잔액"]);
        assert_eq!(m.withdrawal_amount.as_deref(), Some("찾으신금액"));
        assert_eq!(m.deposit_amount.as_deref(), Some("맡기신금액"));
    }

    #[test]
    fn test_type_column_layout() {
        let m = detect(&["No", "거래일시", "거래구분", "거래금액", "거래후잔액", "은행", "계좌정보"]);
        assert_eq!(m.date.as_deref(), Some("거래일시"));
        assert_eq!(m.transaction_type.as_deref(), Some("거래구분"));
        assert_eq!(m.withdrawal_amount.as_deref(), Some("거래금액"));
        assert_eq!(m.balance.as_deref(), Some("거래후잔액"));
        assert_eq!(m.deposit_amount, None);
    }

    #[test]
    fn test_first_match_wins() {
        let m = detect(&["거래일자", "기산일자", "출금액", "출금수수료"]);
        assert_eq!(m.date.as_deref(), Some("거래일자"));
        assert_eq!(m.withdrawal_amount.as_deref(), Some("출금액"));
    }

    #[test]
    fn test_headers_normalized_before_matching() {
        let m = detect(&["Transaction Date", " Balance "]);
        assert_eq!(m.date.as_deref(), Some("Transaction Date"));
        assert_eq!(m.balance.as_deref(), Some(" Balance "));
    }

    #[test]
    fn test_stable_under_reordering() {
        let a = detect(&["거래일자", "입금액", "출금액", "잔액", "비고"]);
        let b = detect(&["비고", "잔액", "출금액", "입금액", "거래일자"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_headers() {
        let m = detect(&[]);
        assert_eq!(m, ColumnMapping::default());
    }
}
