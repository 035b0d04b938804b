//! PokerAI Engine — Configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```json
//! {
//!   "workers": 8,
//!   "time_budget_ms": 1000,
//!   "check_interval": 1000,
//!   "max_opponents": 9,
//!   "thresholds": { "bet": 0.5, "call": 0.25 },
//!   "log_level": "debug",
//!   "seed": null
//! }
//! ```

use std::path::Path;
use std::thread;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::game::MAX_OPPONENTS;
use crate::logging::DEFAULT_LOG_LEVEL;

/// Win-probability cut-offs. Comparisons are strict: exactly `bet` calls,
/// exactly `call` folds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub bet: f64,
    pub call: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { bet: 0.5, call: 0.25 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads per round.
    pub workers: usize,
    /// Wall-clock budget each worker simulates for.
    pub time_budget_ms: u64,
    /// Playouts between two clock reads.
    pub check_interval: u64,
    pub max_opponents: usize,
    pub thresholds: Thresholds,
    pub log_level: LevelFilter,
    /// Fixes every worker's random stream when set.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(4, |n| n.get()),
            time_budget_ms: 1000,
            check_interval: 1000,
            max_opponents: 9,
            thresholds: Thresholds::default(),
            log_level: DEFAULT_LOG_LEVEL,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Refuse configurations that could never produce a decision.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::Config("workers must be at least 1".into()));
        }
        if self.time_budget_ms == 0 {
            return Err(EngineError::Config("time_budget_ms must be positive".into()));
        }
        if self.check_interval == 0 {
            return Err(EngineError::Config("check_interval must be at least 1".into()));
        }
        if self.max_opponents > MAX_OPPONENTS {
            return Err(EngineError::Config(format!(
                "max_opponents {} exceeds deck capacity ({})",
                self.max_opponents, MAX_OPPONENTS
            )));
        }
        let Thresholds { bet, call } = self.thresholds;
        if !(0.0..=1.0).contains(&call) || !(0.0..=1.0).contains(&bet) || call > bet {
            return Err(EngineError::Config(format!(
                "thresholds must satisfy 0 <= call <= bet <= 1 (call {call}, bet {bet})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert!(config.workers >= 1);
        assert_eq!(config.time_budget_ms, 1000);
        assert_eq!(config.check_interval, 1000);
        assert_eq!(config.thresholds, Thresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_json_str(
            r#"{ "workers": 2, "thresholds": { "bet": 0.7 }, "log_level": "warn", "seed": 42 }"#,
        )
        .unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.thresholds.bet, 0.7);
        assert_eq!(config.thresholds.call, 0.25);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validation_rejects_unusable_configs() {
        let broken = [
            EngineConfig { workers: 0, ..Default::default() },
            EngineConfig { time_budget_ms: 0, ..Default::default() },
            EngineConfig { check_interval: 0, ..Default::default() },
            EngineConfig { max_opponents: 23, ..Default::default() },
            EngineConfig { thresholds: Thresholds { bet: 0.2, call: 0.4 }, ..Default::default() },
            EngineConfig { thresholds: Thresholds { bet: 1.5, call: 0.4 }, ..Default::default() },
        ];
        for config in broken {
            assert!(
                matches!(config.validate(), Err(EngineError::Config(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ workers: }"),
            Err(EngineError::Document(_))
        ));
    }
}
