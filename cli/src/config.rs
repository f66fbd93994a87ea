//! TOML configuration for the `tenure` binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tenure_types::LedgerParams;

/// File-level configuration. Every field has a default so a config file may
/// name only what it changes; command-line flags override the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub ledger: LedgerParams,

    /// Where `simulate` persists its ledger. `None` keeps it in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Unix seconds of token genesis.
    #[serde(default = "default_genesis_secs")]
    pub genesis_secs: u64,

    /// Days between genesis and the first stake.
    #[serde(default = "default_start_after_days")]
    pub start_after_days: u64,

    /// Principal per stake, in whole tokens.
    #[serde(default = "default_principal_tokens")]
    pub principal_tokens: u128,

    #[serde(default = "default_term_days")]
    pub term_days: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_genesis_secs() -> u64 {
    1_700_000_000
}

fn default_start_after_days() -> u64 {
    100
}

fn default_principal_tokens() -> u128 {
    1_000
}

fn default_term_days() -> u32 {
    365
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerParams::default(),
            data_dir: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            genesis_secs: default_genesis_secs(),
            start_after_days: default_start_after_days(),
            principal_tokens: default_principal_tokens(),
            term_days: default_term_days(),
        }
    }
}

/// Load `path`, falling back to defaults when it cannot be read or parsed.
///
/// Logging is not initialised yet when this runs (the file may choose the
/// log level), so problems are returned as a message for the caller to log.
pub fn load(path: &Path) -> (CliConfig, Option<String>) {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<CliConfig>(&contents) {
            Ok(cfg) => (cfg, None),
            Err(e) => (
                CliConfig::default(),
                Some(format!("Failed to parse config file: {e}, using defaults")),
            ),
        },
        Err(e) => (
            CliConfig::default(),
            Some(format!(
                "Failed to read config file {}: {e}, using defaults",
                path.display()
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: CliConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, CliConfig::default());
        assert_eq!(cfg.ledger.max_term_days, 1_000);
        assert_eq!(cfg.simulation.term_days, 365);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: CliConfig = toml::from_str(
            r#"
            log_level = "debug"

            [ledger]
            symbol = "TEST"
            blackout_secs = 60

            [simulation]
            principal_tokens = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, "human");
        assert_eq!(cfg.ledger.symbol, "TEST");
        assert_eq!(cfg.ledger.name, "Tenure Stake");
        assert_eq!(cfg.ledger.blackout_secs, 60);
        assert_eq!(cfg.simulation.principal_tokens, 5);
        assert_eq!(cfg.simulation.term_days, 365);
    }

    #[test]
    fn load_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, warning) = load(&dir.path().join("missing.toml"));
        assert_eq!(cfg, CliConfig::default());
        assert!(warning.unwrap().contains("Failed to read"));

        let path = dir.path().join("bad.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "log_level = [").unwrap();
        let (_, warning) = load(&path);
        assert!(warning.unwrap().contains("Failed to parse"));
    }

    #[test]
    fn load_reads_good_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenure.toml");
        std::fs::write(&path, "log_format = \"json\"\n").unwrap();
        let (cfg, warning) = load(&path);
        assert!(warning.is_none());
        assert_eq!(cfg.log_format, "json");
    }
}
