//! Keyword tables and tunables for statement normalization.
//!
//! Every detector takes these by reference, so a bank template can ship its
//! own tables (see `NormalizerConfig` in the CLI's `config.toml`).

use serde::{Deserialize, Serialize};

use crate::transaction::ColumnRole;

/// Lowercase and drop all whitespace; headers and keywords are compared in
/// this form.
pub fn normalize_header(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A header keyword, optionally disabled by fragments that must not appear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordRule {
    Plain(String),
    Guarded {
        keyword: String,
        #[serde(default)]
        unless: Vec<String>,
    },
}

impl KeywordRule {
    pub fn keyword(&self) -> &str {
        match self {
            KeywordRule::Plain(k) => k,
            KeywordRule::Guarded { keyword, .. } => keyword,
        }
    }

    /// `header` must already be in [`normalize_header`] form.
    pub fn matches(&self, header: &str) -> bool {
        let keyword = normalize_header(self.keyword());
        if keyword.is_empty() || !header.contains(&keyword) {
            return false;
        }
        match self {
            KeywordRule::Plain(_) => true,
            KeywordRule::Guarded { unless, .. } => !unless
                .iter()
                .any(|frag| header.contains(&normalize_header(frag))),
        }
    }
}

impl From<&str> for KeywordRule {
    fn from(s: &str) -> Self {
        KeywordRule::Plain(s.to_string())
    }
}

/// Header keywords per column role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    pub date: Vec<KeywordRule>,
    pub withdrawal: Vec<KeywordRule>,
    pub deposit: Vec<KeywordRule>,
    pub balance: Vec<KeywordRule>,
    pub transaction_type: Vec<KeywordRule>,
}

impl RoleKeywords {
    pub fn rules(&self, role: ColumnRole) -> &[KeywordRule] {
        match role {
            ColumnRole::Date => &self.date,
            ColumnRole::Withdrawal => &self.withdrawal,
            ColumnRole::Deposit => &self.deposit,
            ColumnRole::Balance => &self.balance,
            ColumnRole::TransactionType => &self.transaction_type,
        }
    }

    /// First role (detection order) whose rules match a normalized header
    pub fn role_of(&self, header: &str) -> Option<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .find(|role| self.rules(*role).iter().any(|r| r.matches(header)))
    }
}

impl Default for RoleKeywords {
    fn default() -> Self {
        Self {
            date: plain(&["거래일", "일자", "date"]),
            withdrawal: vec![
                "지급".into(),
                "찾으신".into(),
                "출금".into(),
                "차감".into(),
                KeywordRule::Guarded {
                    keyword: "거래금액".to_string(),
                    unless: vec!["후".to_string()],
                },
            ],
            deposit: plain(&["입금", "맡기신", "수금", "충전"]),
            balance: plain(&["잔액", "balance", "거래후잔액"]),
            transaction_type: plain(&["거래구분", "구분"]),
        }
    }
}

/// Memo column detection: keyword tiers plus content-scoring tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoDetection {
    /// Highest priority first
    pub keyword_tiers: Vec<Vec<String>>,
    /// Header fragments that disqualify a column (ids, codes, clock times)
    pub exclusions: Vec<String>,
    pub transaction_verbs: Vec<String>,
    /// Rows sampled per candidate when scoring content
    pub sample_size: usize,
    /// Best content score must reach this to be accepted
    pub min_score: i64,
}

impl Default for MemoDetection {
    fn default() -> Self {
        Self {
            keyword_tiers: vec![
                strings(&["비고", "적요", "메모", "memo", "remark", "note"]),
                strings(&["내용", "설명", "상세", "description"]),
                strings(&["계좌정보", "결제정보", "거래처", "상대방"]),
                strings(&["참고", "기타", "etc"]),
            ],
            exclusions: strings(&["번호", "코드", "id", "시각", "teller"]),
            transaction_verbs: strings(&["이체", "송금", "입금", "출금", "결제", "카드"]),
            sample_size: 15,
            min_score: 5,
        }
    }
}

/// Keywords used while resolving direction and memo text per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverKeywords {
    /// Fragments in a transaction-type cell meaning money came in
    pub deposit_markers: Vec<String>,
    /// Amount column read when the mapped amount cell is empty
    pub amount_fallback_column: String,
    /// Last-resort memo columns, matched against every row key
    pub content_keys: Vec<String>,
}

impl Default for ResolverKeywords {
    fn default() -> Self {
        Self {
            deposit_markers: strings(&["+", "입금", "충전", "받기", "적립"]),
            amount_fallback_column: "거래금액".to_string(),
            content_keys: strings(&["적요", "내용", "description", "content"]),
        }
    }
}

/// Legally significant transaction categories flagged from memo text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportantKind {
    #[serde(rename = "loan-execution")]
    LoanExecution,
    #[serde(rename = "repayment")]
    Repayment,
    #[serde(rename = "collateral")]
    Collateral,
    #[serde(rename = "seizure")]
    Seizure,
}

impl ImportantKind {
    pub const ALL: [ImportantKind; 4] = [
        ImportantKind::LoanExecution,
        ImportantKind::Repayment,
        ImportantKind::Collateral,
        ImportantKind::Seizure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImportantKind::LoanExecution => "대출 실행",
            ImportantKind::Repayment => "변제",
            ImportantKind::Collateral => "담보",
            ImportantKind::Seizure => "압류",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportantKeywords {
    pub loan_execution: Vec<String>,
    pub repayment: Vec<String>,
    pub collateral: Vec<String>,
    pub seizure: Vec<String>,
}

impl ImportantKeywords {
    pub fn keywords(&self, kind: ImportantKind) -> &[String] {
        match kind {
            ImportantKind::LoanExecution => &self.loan_execution,
            ImportantKind::Repayment => &self.repayment,
            ImportantKind::Collateral => &self.collateral,
            ImportantKind::Seizure => &self.seizure,
        }
    }
}

impl Default for ImportantKeywords {
    fn default() -> Self {
        Self {
            loan_execution: strings(&["대출 실행", "대출금", "실행"]),
            repayment: strings(&["변제", "상환", "갚음"]),
            collateral: strings(&["담보제공", "담보설정", "저당권"]),
            seizure: strings(&["압류", "가압류"]),
        }
    }
}

/// Everything the normalization pipeline is configured with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub roles: RoleKeywords,
    pub memo: MemoDetection,
    pub resolver: ResolverKeywords,
    pub important: ImportantKeywords,
}

impl NormalizerConfig {
    /// True when a header is recognised by any role or memo keyword.
    /// Used by readers to find the header row.
    pub fn recognizes_header(&self, header: &str) -> bool {
        let h = normalize_header(header);
        if h.is_empty() {
            return false;
        }
        self.roles.role_of(&h).is_some()
            || self
                .memo
                .keyword_tiers
                .iter()
                .flatten()
                .any(|k| h.contains(&normalize_header(k)))
    }
}

fn plain(keywords: &[&str]) -> Vec<KeywordRule> {
    keywords.iter().map(|k| KeywordRule::from(*k)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
