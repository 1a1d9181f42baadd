//! Deterministic tagging of legally significant transactions (loan
//! executions, repayments, collateral, seizures) from memo text.
//!
//! Case-insensitive substring matching; no LLM needed for these.

use passbook_core::{ImportantKeywords, ImportantKind, NormalizedTransaction};

/// True when `memo` contains any keyword of `kind`
pub fn matches_kind(memo: &str, kind: ImportantKind, keywords: &ImportantKeywords) -> bool {
    if memo.is_empty() {
        return false;
    }
    let memo = memo.to_lowercase();
    keywords
        .keywords(kind)
        .iter()
        .any(|k| !k.is_empty() && memo.contains(&k.to_lowercase()))
}

/// First matching kind, in [`ImportantKind::ALL`] order
pub fn detect_important_kind(memo: &str, keywords: &ImportantKeywords) -> Option<ImportantKind> {
    ImportantKind::ALL
        .into_iter()
        .find(|kind| matches_kind(memo, *kind, keywords))
}

/// Every keyword found in `memo`, across all kinds
pub fn matched_keywords<'a>(memo: &str, keywords: &'a ImportantKeywords) -> Vec<&'a str> {
    if memo.is_empty() {
        return Vec::new();
    }
    let memo = memo.to_lowercase();
    ImportantKind::ALL
        .into_iter()
        .flat_map(|kind| keywords.keywords(kind))
        .filter(|k| !k.is_empty() && memo.contains(&k.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Transactions whose memo carries an important kind, paired with that kind
pub fn important_transactions<'a>(
    txns: &'a [NormalizedTransaction],
    keywords: &ImportantKeywords,
) -> Vec<(&'a NormalizedTransaction, ImportantKind)> {
    txns.iter()
        .filter_map(|t| detect_important_kind(&t.memo, keywords).map(|kind| (t, kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_kind() {
        let kw = ImportantKeywords::default();
        assert_eq!(detect_important_kind("주택담보대출금 입금", &kw), Some(ImportantKind::LoanExecution));
        assert_eq!(detect_important_kind("카드론 상환", &kw), Some(ImportantKind::Repayment));
        assert_eq!(detect_important_kind("근저당권 설정", &kw), Some(ImportantKind::Collateral));
        assert_eq!(detect_important_kind("법원 가압류", &kw), Some(ImportantKind::Seizure));
        assert_eq!(detect_important_kind("스타벅스", &kw), None);
        assert_eq!(detect_important_kind("", &kw), None);
    }

    #[test]
    fn test_first_kind_wins() {
        let kw = ImportantKeywords::default();
        // both 대출금 and 상환
        assert_eq!(detect_important_kind("대출금 상환", &kw), Some(ImportantKind::LoanExecution));
    }

    #[test]
    fn test_matched_keywords_collects_all() {
        let kw = ImportantKeywords::default();
        assert_eq!(matched_keywords("대출금 상환 후 압류 해제", &kw), vec!["대출금", "상환", "압류"]);
        assert!(matched_keywords("", &kw).is_empty());
    }

    #[test]
    fn test_custom_keywords_are_case_insensitive() {
        let kw = ImportantKeywords {
            seizure: vec!["Garnish".to_string()],
            ..Default::default()
        };
        assert!(matches_kind("WAGE GARNISHMENT", ImportantKind::Seizure, &kw));
    }
}
