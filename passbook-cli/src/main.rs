use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use passbook_ingest::read_csv_table;
use passbook_normalize::{
    AmountRange, Normalizer, StatementSummary, filter_by_amount, important_transactions,
    parse_amount_bound,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")"),
    about = "Normalize bank statement exports into a standard transaction list"
)]
struct Cli {
    /// Config file (default: ~/.passbook/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a statement CSV into 거래일자/구분/금액/잔액/비고 records
    Normalize {
        /// Statement CSV (UTF-8 or EUC-KR)
        csv: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Only transactions with |amount| >= MIN (e.g. 1,000,000)
        #[arg(long)]
        min: Option<String>,

        /// Only transactions with |amount| <= MAX
        #[arg(long)]
        max: Option<String>,

        /// Only loan/repayment/collateral/seizure transactions
        #[arg(long)]
        important_only: bool,
    },

    /// Show the detected column roles and memo column of a statement CSV
    Detect {
        csv: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.passbook/config.toml with the default keyword tables
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Normalize {
            csv,
            json,
            min,
            max,
            important_only,
        } => {
            let range = amount_range(min.as_deref(), max.as_deref())?;
            normalize(&cfg, &csv, json || cfg.output.json, range, important_only)?;
        }

        Command::Detect { csv, json } => {
            detect(&cfg, &csv, json || cfg.output.json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn amount_range(min: Option<&str>, max: Option<&str>) -> Result<AmountRange> {
    let parse = |label: &str, raw: Option<&str>| -> Result<Option<f64>> {
        match raw {
            None => Ok(None),
            Some(s) => match parse_amount_bound(s) {
                Some(v) => Ok(Some(v)),
                None => bail!("invalid --{label} amount: {s}"),
            },
        }
    };
    let range = AmountRange::new(parse("min", min)?, parse("max", max)?);
    if !range.is_valid() {
        bail!("--min must not exceed --max");
    }
    Ok(range)
}

fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("CSV not found: {}", path.display());
    }
    Ok(())
}

fn normalize(
    cfg: &config::Config,
    csv_path: &Path,
    json: bool,
    range: AmountRange,
    important_only: bool,
) -> Result<()> {
    require_file(csv_path)?;
    let table = read_csv_table(csv_path, &cfg.normalizer)?;
    let normalizer = Normalizer::with_config(cfg.normalizer.clone());
    let txns = normalizer.normalize(&table.headers, &table.rows);

    let keywords = &cfg.normalizer.important;
    let selected: Vec<_> = if important_only {
        important_transactions(&txns, keywords)
            .into_iter()
            .map(|(t, _)| t)
            .filter(|t| range.contains(t))
            .collect()
    } else {
        filter_by_amount(&txns, &range)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    let summary = StatementSummary::from_transactions(&txns, keywords);
    println!(
        "Parsed {} rows from {} ({} normalized, {} shown)\n",
        table.rows.len(),
        csv_path.display(),
        txns.len(),
        selected.len()
    );
    output::print_transactions(&selected, keywords, cfg.output.max_rows);
    println!();
    output::print_summary(&summary);
    Ok(())
}

fn detect(cfg: &config::Config, csv_path: &Path, json: bool) -> Result<()> {
    require_file(csv_path)?;
    let table = read_csv_table(csv_path, &cfg.normalizer)?;
    let layout = Normalizer::with_config(cfg.normalizer.clone()).detect(&table.headers, &table.rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("Header row: {} ({} data rows)", table.header_row + 1, table.rows.len());
    output::print_layout(&layout);
    Ok(())
}
