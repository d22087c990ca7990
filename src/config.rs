//! Runtime configuration, read once from the environment at startup.
//!
//! | variable                    | meaning                                        |
//! |-----------------------------|------------------------------------------------|
//! | `BLOCKFALL_SEED`            | u32 piece seed; random when unset              |
//! | `BLOCKFALL_HIGH_SCORE_PATH` | high-score file; defaults under the data dir   |
//! | `BLOCKFALL_NO_SAVE`         | `1` or `true` keeps the high score in memory   |
//! | `BLOCKFALL_LOG`             | write `tracing` output to this file            |

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const HIGH_SCORE_PATH_VAR: &str = "BLOCKFALL_HIGH_SCORE_PATH";
pub const NO_SAVE_VAR: &str = "BLOCKFALL_NO_SAVE";
pub const LOG_VAR: &str = "BLOCKFALL_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned 32-bit integer, got {value:?}")]
    InvalidSeed { var: &'static str, value: String },
    #[error("{var} must be 1, 0, true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Fixed seed, or None for a random one.
    pub seed: Option<u32>,
    /// Explicit high-score file; None means the default location.
    pub high_score_path: Option<PathBuf>,
    pub no_save: bool,
    pub log_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match get(SEED_VAR) {
            Some(value) => Some(value.parse().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value,
            })?),
            None => None,
        };

        let no_save = match get(NO_SAVE_VAR) {
            Some(value) => parse_flag(NO_SAVE_VAR, value)?,
            None => false,
        };

        Ok(Self {
            seed,
            high_score_path: get(HIGH_SCORE_PATH_VAR).map(PathBuf::from),
            no_save,
            log_path: get(LOG_VAR).map(PathBuf::from),
        })
    }

    /// Where the high score lives: the configured path, else
    /// `<data dir>/blockfall/high_score.json`. None if there is no data dir.
    pub fn resolved_high_score_path(&self) -> Option<PathBuf> {
        self.high_score_path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("blockfall").join("high_score.json")))
    }
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<RunConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn test_all_values() {
        let cfg = config(&[
            (SEED_VAR, "42"),
            (HIGH_SCORE_PATH_VAR, "/tmp/best.json"),
            (NO_SAVE_VAR, "TRUE"),
            (LOG_VAR, " /tmp/blockfall.log "),
        ])
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.high_score_path, Some(PathBuf::from("/tmp/best.json")));
        assert!(cfg.no_save);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(
            cfg.resolved_high_score_path(),
            Some(PathBuf::from("/tmp/best.json"))
        );
    }

    #[test]
    fn test_blank_is_unset() {
        let cfg = config(&[(SEED_VAR, "  "), (LOG_VAR, "")]).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_bad_values_name_the_variable() {
        let err = config(&[(SEED_VAR, "-3")]).unwrap_err();
        assert!(err.to_string().contains(SEED_VAR));

        let err = config(&[(NO_SAVE_VAR, "maybe")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidFlag {
                var: NO_SAVE_VAR,
                value: "maybe".to_string()
            }
        );
    }
}
