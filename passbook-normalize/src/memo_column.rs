//! Memo column detection.
//!
//! Header names are trusted first: a keyword pass over priority tiers picks
//! the memo column when the bank labels it. Only when no header qualifies do
//! we fall back to scoring sample cells for how much they read like free text
//! (names, masked account numbers, transfer wording).

use std::sync::LazyLock;

use passbook_core::{CellValue, ColumnMapping, MemoDetection, RawRow, normalize_header};
use regex::Regex;

const PURE_NUMERIC_PENALTY: i64 = -20;
const DATE_SHAPED_PENALTY: i64 = -15;
const PER_KOREAN_CHAR: i64 = 2;
const PER_ENGLISH_WORD: i64 = 1;
const MASKED_NUMBER_BONUS: i64 = 10;
const TRANSACTION_VERB_BONUS: i64 = 15;
const MEMO_LENGTH_BONUS: i64 = 5;
const FINANCIAL_PATTERN_BONUS: i64 = 20;
const EXCLUDED_NAME_PENALTY: i64 = -30;

static PURE_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[₩W]?[0-9][0-9,]*(?:\.[0-9]+)?$").expect("pure numeric pattern")
});
static DATE_SHAPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}[-./][0-9]{1,2}[-./][0-9]{1,2}|^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?$")
        .expect("date shaped pattern")
});
static KOREAN_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]").expect("korean char pattern"));
static ENGLISH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("english word pattern"));
static MASKED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9][-\s]?(?:\*{2,}|X{2,})|(?:\*{2,}|X{2,})[-\s]?[0-9]")
        .expect("masked number pattern")
});

/// Find the free-text memo column, if any.
///
/// Columns already claimed by `mapping` are never candidates.
pub fn detect_memo_column<S: AsRef<str>>(
    headers: &[S],
    rows: &[RawRow],
    mapping: &ColumnMapping,
    cfg: &MemoDetection,
) -> Option<String> {
    let candidates: Vec<&str> = headers
        .iter()
        .map(|h| h.as_ref())
        .filter(|h| !h.trim().is_empty() && !mapping.is_assigned(h))
        .collect();

    if let Some(found) = keyword_match(&candidates, cfg) {
        return Some(found.to_string());
    }

    let mut best: Option<(&str, i64)> = None;
    for &candidate in &candidates {
        let score = score_memo_candidate(candidate, rows, cfg);
        tracing::trace!(column = candidate, score, "memo candidate scored");
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score >= cfg.min_score)
        .map(|(col, _)| col.to_string())
}

/// Keyword priority decides, not column order: every candidate is tried
/// against the first keyword before any is tried against the second.
fn keyword_match<'a>(candidates: &[&'a str], cfg: &MemoDetection) -> Option<&'a str> {
    let normalized: Vec<String> = candidates.iter().map(|c| normalize_header(c)).collect();

    for keyword in cfg.keyword_tiers.iter().flatten() {
        let keyword = normalize_header(keyword);
        if keyword.is_empty() {
            continue;
        }
        for (candidate, name) in candidates.iter().zip(&normalized) {
            if name.contains(&keyword) && !is_excluded(name, cfg) {
                return Some(*candidate);
            }
        }
    }
    None
}

fn is_excluded(normalized_name: &str, cfg: &MemoDetection) -> bool {
    cfg.exclusions
        .iter()
        .any(|ex| normalized_name.contains(&normalize_header(ex)))
}

/// Content score of one candidate column over the sampled rows.
pub fn score_memo_candidate(header: &str, rows: &[RawRow], cfg: &MemoDetection) -> i64 {
    let mut score = 0;
    let mut financial_hit = false;

    for row in rows.iter().take(cfg.sample_size) {
        let text = match row.get(header) {
            CellValue::Null => continue,
            CellValue::Number(n) => {
                if !n.is_nan() {
                    score += PURE_NUMERIC_PENALTY;
                }
                continue;
            }
            CellValue::Text(s) => s.trim(),
        };
        if text.is_empty() {
            continue;
        }

        if PURE_NUMERIC.is_match(text) {
            score += PURE_NUMERIC_PENALTY;
            continue;
        }
        if DATE_SHAPED.is_match(text) {
            score += DATE_SHAPED_PENALTY;
            continue;
        }

        let korean = KOREAN_CHAR.find_iter(text).count() as i64;
        score += korean * PER_KOREAN_CHAR;
        score += ENGLISH_WORD.find_iter(text).count() as i64 * PER_ENGLISH_WORD;

        if korean > 0 && MASKED_NUMBER.is_match(text) {
            score += MASKED_NUMBER_BONUS;
            financial_hit = true;
        }
        if cfg.transaction_verbs.iter().any(|v| !v.is_empty() && text.contains(v.as_str())) {
            score += TRANSACTION_VERB_BONUS;
            financial_hit = true;
        }

        let len = text.chars().count();
        if (5..=50).contains(&len) {
            score += MEMO_LENGTH_BONUS;
        }
    }

    if financial_hit {
        score += FINANCIAL_PATTERN_BONUS;
    }
    if is_excluded(&normalize_header(header), cfg) {
        score += EXCLUDED_NAME_PENALTY;
    }
    score
}
