//! tenure: command-line front end for the stake certificate ledger.

mod config;
mod simulate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tenure_ledger::LedgerMetrics;
use tenure_record::{encode_stake_info, StakeInfo, StakeWord};
use tenure_types::{BlockId, CertificateId};
use tenure_utils::LogFormat;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "tenure", about = "Tenure stake certificate ledger tool")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TENURE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TENURE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TENURE_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a hex stake word into its fields.
    Decode {
        /// Up to 64 hex digits, optionally 0x-prefixed.
        word: String,
    },
    /// Pack fields into a stake word. Out-of-range values clamp.
    Encode {
        #[arg(long, default_value = "0")]
        term: String,
        #[arg(long, default_value = "0")]
        maturity: String,
        #[arg(long, default_value = "0")]
        amount: String,
        #[arg(long, default_value = "0")]
        apy: String,
        #[arg(long, default_value = "0")]
        score: String,
        #[arg(long, default_value = "0")]
        bits: String,
    },
    /// Classify a certificate id minted in a given block.
    Rarity { id: u64, block: u64 },
    /// Render the metadata document for a certificate.
    Metadata {
        id: u64,
        word: String,
        /// Print the data URI instead of pretty JSON.
        #[arg(long)]
        uri: bool,
    },
    /// Run a scripted stake lifecycle against in-memory collaborators.
    Simulate {
        /// Persist the resulting ledger to an LMDB directory.
        #[arg(long, env = "TENURE_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Print Prometheus metrics after the run.
        #[arg(long)]
        metrics: bool,
    },
}

/// Parse a decimal integer, saturating at `u128::MAX` instead of failing on
/// overflow.
fn parse_saturating(raw: &str) -> anyhow::Result<u128> {
    let raw = raw.trim().replace('_', "");
    anyhow::ensure!(
        !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()),
        "not a decimal integer: {raw:?}"
    );
    Ok(raw.bytes().fold(0u128, |acc, b| {
        acc.saturating_mul(10).saturating_add(u128::from(b - b'0'))
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, config_warning) = match cli.config {
        Some(ref path) => {
            let (cfg, warning) = config::load(path);
            (cfg, warning)
        }
        None => (CliConfig::default(), None),
    };

    let level = cli.log_level.unwrap_or_else(|| file_config.log_level.clone());
    let format_raw = cli
        .log_format
        .unwrap_or_else(|| file_config.log_format.clone());
    let format = format_raw.parse::<LogFormat>().unwrap_or_else(|e| {
        eprintln!("{e}, using human");
        LogFormat::Human
    });
    tenure_utils::init_logging(format, &level);

    match (&cli.config, config_warning) {
        (_, Some(warning)) => tracing::warn!("{warning}"),
        (Some(path), None) => tracing::info!("Loaded config from {}", path.display()),
        (None, None) => {}
    }

    match cli.command {
        Command::Decode { word } => {
            let word: StakeWord = word.parse().context("parsing stake word")?;
            print_json(&StakeInfo::decode(&word))?;
        }
        Command::Encode {
            term,
            maturity,
            amount,
            apy,
            score,
            bits,
        } => {
            let word = encode_stake_info(
                parse_saturating(&term)?,
                parse_saturating(&maturity)?,
                parse_saturating(&amount)?,
                parse_saturating(&apy)?,
                parse_saturating(&score)?,
                parse_saturating(&bits)?,
            );
            println!("{word}");
        }
        Command::Rarity { id, block } => {
            let rarity = tenure_rarity::assess(CertificateId::new(id), BlockId::new(block));
            print_json(&serde_json::json!({
                "is_prime": rarity.flags.is_prime,
                "is_fib": rarity.flags.is_fib,
                "block_is_prime": rarity.flags.block_is_prime,
                "block_is_fib": rarity.flags.block_is_fib,
                "bits": format!("{:#06x}", rarity.bits),
                "score": rarity.score,
                "class": tenure_rarity::RarityClass::of(rarity.flags).as_str(),
            }))?;
        }
        Command::Metadata { id, word, uri } => {
            let word: StakeWord = word.parse().context("parsing stake word")?;
            let id = CertificateId::new(id);
            if uri {
                println!("{}", tenure_metadata::token_uri(id, &word)?);
            } else {
                print_json(&tenure_metadata::render(id, &word))?;
            }
        }
        Command::Simulate { data_dir, metrics } => {
            let data_dir = data_dir.or(file_config.data_dir.clone());
            let registry = Arc::new(LedgerMetrics::new());
            let report = simulate::run(
                &file_config.ledger,
                &file_config.simulation,
                registry.clone(),
                data_dir.as_deref(),
            )?;
            print_json(&report)?;
            if metrics {
                print!("{}", registry.encode_text());
            }
        }
    }

    Ok(())
}
