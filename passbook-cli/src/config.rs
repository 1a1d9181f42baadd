use anyhow::{Context, Result};
use passbook_core::NormalizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_passbook_home, passbook_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    /// Keyword tables and detection thresholds; override per bank template
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Print JSON instead of a table unless overridden on the command line
    pub json: bool,
    /// Rows shown in table mode (0 = all)
    pub max_rows: usize,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(passbook_home()?.join("config.toml"))
}

/// Explicit path must exist; the default path falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(p) => load_config_from(p),
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            load_config_from(&p)
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_passbook_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[output]
json = true

[normalizer.memo]
min_score = 12
exclusions = ["번호"]

[normalizer.roles]
date = ["기준일", "거래일"]
"#,
        )
        .unwrap();
        assert!(cfg.output.json);
        assert_eq!(cfg.normalizer.memo.min_score, 12);
        assert_eq!(cfg.normalizer.memo.sample_size, 15);
        assert_eq!(cfg.normalizer.memo.exclusions, vec!["번호"]);
        assert_eq!(cfg.normalizer.roles.date.len(), 2);
        assert_eq!(
            cfg.normalizer.roles.withdrawal,
            NormalizerConfig::default().roles.withdrawal
        );
    }

    #[test]
    fn test_guarded_keyword_in_toml() {
        let cfg: Config = toml::from_str(
            r#"
[normalizer.roles]
withdrawal = ["출금", { keyword = "거래금액", unless = ["후"] }]
"#,
        )
        .unwrap();
        let rules = &cfg.normalizer.roles.withdrawal;
        assert_eq!(rules.len(), 2);
        assert!(rules[1].matches("거래금액"));
        assert!(!rules[1].matches("거래후금액거래금액"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let cfg = Config::default();
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/passbook.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/passbook.toml"));
    }
}
