//! Runtime configuration for the terminal runner.
//!
//! Layering: built-in defaults, then environment variables, then command-line
//! flags.
//!
//! | Variable | Flag | Meaning |
//! |----------|------|---------|
//! | `BLOCKFALL_SEED` | `--seed` | fixed spawn sequence (unset = random) |
//! | `BLOCKFALL_TICK_MS` | `--tick-ms` | frame period, 1..=1000 |
//! | `BLOCKFALL_LOG_PATH` | `--log-path` | log file (unset = no logging) |
//! | `BLOCKFALL_LOG` | `--log` | `tracing` filter directive |

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::types::TICK_MS;

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

const MAX_TICK_MS: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("tick period must be between 1 and 1000ms, got {0}")]
    TickOutOfRange(u32),

    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// blockfall - falling-block puzzle in the terminal
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Frame period in milliseconds
    #[arg(short, long)]
    pub tick_ms: Option<u32>,

    /// Write logs to this file
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Log filter, e.g. "info" or "blockfall_core=debug"
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RunConfig {
    /// Create from process environment variables.
    ///
    /// Values are parsed but not range-checked; `with_args` validates the
    /// fully layered result.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = get(ENV_SEED) {
            config.seed = Some(parse_number(ENV_SEED, &v)?);
        }
        if let Some(v) = get(ENV_TICK_MS) {
            config.tick_ms = parse_number(ENV_TICK_MS, &v)?;
        }
        config.log_path = get(ENV_LOG_PATH).map(PathBuf::from);
        if let Some(v) = get(ENV_LOG) {
            config.log_filter = v;
        }
        Ok(config)
    }

    /// Override with any flags given on the command line, then validate
    pub fn with_args(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(tick_ms) = args.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(path) = &args.log_path {
            self.log_path = Some(path.clone());
        }
        if let Some(filter) = &args.log_filter {
            self.log_filter = filter.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TICK_MS).contains(&self.tick_ms) {
            return Err(ConfigError::TickOutOfRange(self.tick_ms));
        }
        self.env_filter()?;
        Ok(())
    }

    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = RunConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.tick_ms, 16);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_env_values() {
        let config = RunConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_TICK_MS, " 20 "),
            (ENV_LOG_PATH, "/tmp/blockfall.log"),
            (ENV_LOG, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_empty_env_values_are_unset() {
        let config = RunConfig::from_lookup(lookup(&[(ENV_SEED, ""), (ENV_LOG_PATH, "  ")])).unwrap();
        assert!(config.seed.is_none());
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_invalid_number() {
        let err = RunConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_SEED,
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_tick_range() {
        let env = RunConfig::from_lookup(lookup(&[(ENV_TICK_MS, "0")])).unwrap();
        assert_eq!(
            env.with_args(&Args::default()),
            Err(ConfigError::TickOutOfRange(0))
        );
    }

    #[test]
    fn test_args_fix_invalid_env_tick() {
        let env = RunConfig::from_lookup(lookup(&[(ENV_TICK_MS, "0"), (ENV_LOG, "[bad")])).unwrap();
        let args = Args::try_parse_from(["blockfall", "--tick-ms", "16", "--log", "debug"]).unwrap();
        let config = env.with_args(&args).unwrap();

        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_args_override_env() {
        let env = RunConfig::from_lookup(lookup(&[(ENV_SEED, "1"), (ENV_TICK_MS, "30")])).unwrap();
        let args = Args::try_parse_from(["blockfall", "--seed", "99", "--log", "warn"]).unwrap();
        let config = env.with_args(&args).unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.tick_ms, 30);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_args_tick() {
        let args = Args::try_parse_from(["blockfall", "--tick-ms", "5000"]).unwrap();
        assert_eq!(
            RunConfig::default().with_args(&args),
            Err(ConfigError::TickOutOfRange(5000))
        );
    }
}
