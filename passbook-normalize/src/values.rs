//! Amount and date parsing for raw statement cells.
//!
//! Both parsers are total: bad input degrades to `0` / the input text instead
//! of an error, because a single odd cell must not sink a whole statement.

use std::sync::LazyLock;

use passbook_core::CellValue;
use regex::Regex;

static AMOUNT_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,₩W\s+\-]").expect("amount noise pattern"));
static MEMO_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,₩W\s]").expect("memo noise pattern"));
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number pattern")
});
static NUMERIC_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]|\.[0-9])").expect("numeric start pattern"));

static DASHED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("dashed date pattern"));
static DOTTED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2}").expect("dotted date pattern"));
static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})").expect("compact date pattern")
});

/// Parse an amount cell into an unsigned number.
///
/// Thousands separators, `₩`/`W`, whitespace and sign characters are dropped;
/// direction is decided by the resolver, never by the raw text. Anything that
/// does not start with a number yields `0`.
pub fn parse_amount(value: &CellValue) -> f64 {
    if value.is_empty() {
        return 0.0;
    }
    match value {
        CellValue::Number(n) => n.abs(),
        CellValue::Text(s) => parse_amount_str(s),
        CellValue::Null => 0.0,
    }
}

/// Text form of [`parse_amount`]
pub fn parse_amount_str(s: &str) -> f64 {
    let cleaned = AMOUNT_NOISE.replace_all(s, "");
    LEADING_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// True when the text, minus separators and currency marks, starts like a
/// number. Signs are kept, so "-500" is numeric while "홍길동" is not.
pub fn looks_numeric(s: &str) -> bool {
    let cleaned = MEMO_NOISE.replace_all(s, "");
    NUMERIC_START.is_match(&cleaned)
}

/// Bring a date cell into `YYYY-MM-DD` form.
///
/// Handles `YYYY-MM-DD…`, `YYYY.MM.DD…` and `YYYYMMDD…`; trailing time parts
/// are cut off. Anything else comes back trimmed but otherwise untouched.
/// Empty cells give an empty string.
pub fn normalize_date(value: &CellValue) -> String {
    if value.is_empty() {
        return String::new();
    }
    let text = value.to_text();
    let s = text.trim();

    if DASHED_DATE.is_match(s) {
        return s[..10].to_string();
    }
    if DOTTED_DATE.is_match(s) {
        return s[..10].replace('.', "-");
    }
    if let Some(caps) = COMPACT_DATE.captures(s) {
        return format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    }

    s.to_string()
}
