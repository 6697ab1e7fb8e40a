//! Worker configuration from environment variables

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chess_analyzers::MOTIF_TAGS;
use tracing::info;

use crate::error::WorkerError;
use crate::eval_swing::{DEFAULT_ANALYSIS_DEPTH, DEFAULT_SWING_THRESHOLD};

/// What to do when the engine scan cannot complete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnginePolicy {
    /// Log a warning and return motif highlights only
    #[default]
    Skip,
    /// Fail the whole analysis
    Fail,
}

impl FromStr for EnginePolicy {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(WorkerError::Config(format!(
                "ENGINE_FAILURE_POLICY must be skip or fail, got {other:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Path to Stockfish binary; no engine scan when unset
    pub stockfish_path: Option<String>,

    /// Search depth per position
    pub analysis_depth: u32,

    /// Centipawn swing that marks a moment
    pub swing_threshold: i32,

    /// Upper bound on the whole engine scan of one game
    pub engine_timeout_secs: u64,

    pub engine_policy: EnginePolicy,

    /// Motif detectors to run, by name
    pub motif_detectors: Vec<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            stockfish_path: None,
            analysis_depth: DEFAULT_ANALYSIS_DEPTH,
            swing_threshold: DEFAULT_SWING_THRESHOLD,
            engine_timeout_secs: 300,
            engine_policy: EnginePolicy::Skip,
            motif_detectors: MOTIF_TAGS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, WorkerError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            stockfish_path = ?config.stockfish_path,
            depth = config.analysis_depth,
            threshold = config.swing_threshold,
            detectors = ?config.motif_detectors,
            "Worker config loaded"
        );
        Ok(config)
    }

    /// Build a config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WorkerError> {
        let defaults = Self::default();

        let stockfish_path = lookup("STOCKFISH_PATH").filter(|p| !p.trim().is_empty());

        let analysis_depth = parse_var(&lookup, "ANALYSIS_DEPTH")?.unwrap_or(defaults.analysis_depth);
        if analysis_depth == 0 {
            return Err(WorkerError::Config("ANALYSIS_DEPTH must be at least 1".into()));
        }

        let swing_threshold = parse_var(&lookup, "SWING_THRESHOLD")?.unwrap_or(defaults.swing_threshold);
        if swing_threshold <= 0 {
            return Err(WorkerError::Config("SWING_THRESHOLD must be positive".into()));
        }

        let engine_timeout_secs =
            parse_var(&lookup, "ENGINE_TIMEOUT_SECS")?.unwrap_or(defaults.engine_timeout_secs);

        let engine_policy = lookup("ENGINE_FAILURE_POLICY")
            .map(|v| v.parse::<EnginePolicy>())
            .transpose()?
            .unwrap_or_default();

        let motif_detectors = match lookup("MOTIF_DETECTORS") {
            Some(list) => parse_detector_list(&list)?,
            None => defaults.motif_detectors,
        };

        Ok(Self {
            stockfish_path,
            analysis_depth,
            swing_threshold,
            engine_timeout_secs,
            engine_policy,
            motif_detectors,
        })
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, WorkerError> {
    lookup(key)
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| WorkerError::Config(format!("{key} has invalid value {v:?}")))
        })
        .transpose()
}

/// Parse a comma separated list of detector names. Unknown names are rejected.
pub fn parse_detector_list(list: &str) -> Result<Vec<String>, WorkerError> {
    let mut names = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !MOTIF_TAGS.iter().any(|(known, _)| *known == name) {
            return Err(WorkerError::Config(format!("unknown motif detector {name:?}")));
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<WorkerConfig, WorkerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.stockfish_path, None);
        assert_eq!(config.analysis_depth, 16);
        assert_eq!(config.swing_threshold, 290);
        assert_eq!(config.engine_timeout(), Duration::from_secs(300));
        assert_eq!(config.engine_policy, EnginePolicy::Skip);
        assert_eq!(config.motif_detectors, vec!["fork", "pin", "trapped_piece", "sacrifice"]);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOCKFISH_PATH", "/usr/local/bin/stockfish"),
            ("ANALYSIS_DEPTH", "12"),
            ("SWING_THRESHOLD", "150"),
            ("ENGINE_FAILURE_POLICY", "Fail"),
            ("MOTIF_DETECTORS", "pin, fork,pin"),
        ])
        .unwrap();
        assert_eq!(config.stockfish_path.as_deref(), Some("/usr/local/bin/stockfish"));
        assert_eq!(config.analysis_depth, 12);
        assert_eq!(config.swing_threshold, 150);
        assert_eq!(config.engine_policy, EnginePolicy::Fail);
        assert_eq!(config.motif_detectors, vec!["pin", "fork"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(config_from(&[("ANALYSIS_DEPTH", "deep")]), Err(WorkerError::Config(_))));
        assert!(matches!(config_from(&[("ANALYSIS_DEPTH", "0")]), Err(WorkerError::Config(_))));
        assert!(matches!(config_from(&[("SWING_THRESHOLD", "-5")]), Err(WorkerError::Config(_))));
        assert!(matches!(
            config_from(&[("ENGINE_FAILURE_POLICY", "retry")]),
            Err(WorkerError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("MOTIF_DETECTORS", "fork,windmill")]),
            Err(WorkerError::Config(_))
        ));
    }

    #[test]
    fn test_blank_engine_path_means_no_engine() {
        let config = config_from(&[("STOCKFISH_PATH", "  ")]).unwrap();
        assert!(config.stockfish_path.is_none());
    }
}
