//! Highlight analysis for a single game.
//!
//! Every motif detector runs on its own blocking task over a shared copy of
//! the parsed game, alongside the engine scan when an engine is configured.
//! Their intervals are extended, merged into one timeline and formatted.

use std::sync::Arc;
use std::time::Duration;

use chess_analyzers::{
    create_detector, extend_interval, intervals_format, merge_intervals, Highlight, Interval, MotifDetector,
};
use chess_core::{move_tag, parse_pgn, GameData};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{EnginePolicy, WorkerConfig};
use crate::error::WorkerError;
use crate::eval_swing::EvalSwingDetector;

/// Highlight row as handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub start_move: String,
    pub end_move: String,
    pub description: Option<String>,
    pub detected_by: Vec<String>,
}

impl From<&Interval> for HighlightRecord {
    fn from(interval: &Interval) -> Self {
        Self {
            start_move: move_tag(interval.start),
            end_move: move_tag(interval.end),
            description: interval.description.clone(),
            detected_by: interval.detected_by.clone(),
        }
    }
}

/// Engine settings for the evaluation-swing scan.
#[derive(Clone, Debug)]
pub struct EngineSettings {
    pub detector: EvalSwingDetector,
    pub timeout: Duration,
    pub policy: EnginePolicy,
}

pub struct HighlightAnalyzer {
    detectors: Vec<String>,
    engine: Option<EngineSettings>,
}

impl HighlightAnalyzer {
    /// Analyzer running the given motif detectors and no engine.
    pub fn new(detectors: Vec<String>) -> Result<Self, WorkerError> {
        if let Some(unknown) = detectors.iter().find(|name| create_detector(name).is_none()) {
            return Err(WorkerError::Config(format!("unknown motif detector {unknown:?}")));
        }
        Ok(Self {
            detectors,
            engine: None,
        })
    }

    pub fn with_engine(mut self, engine: EngineSettings) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn from_config(config: &WorkerConfig) -> Result<Self, WorkerError> {
        let analyzer = Self::new(config.motif_detectors.clone())?;
        Ok(match &config.stockfish_path {
            Some(path) => analyzer.with_engine(EngineSettings {
                detector: EvalSwingDetector::new(path.clone())
                    .with_depth(config.analysis_depth)
                    .with_threshold(config.swing_threshold),
                timeout: config.engine_timeout(),
                policy: config.engine_policy,
            }),
            None => analyzer,
        })
    }

    /// Merged, extended intervals for a game.
    pub async fn analyze_intervals(&self, pgn: &str) -> Result<Vec<Interval>, WorkerError> {
        let game = Arc::new(parse_pgn(pgn)?);
        info!(plies = game.total_plies(), detectors = self.detectors.len(), "Analyzing game");

        let (motifs, swings) = tokio::join!(self.run_detectors(&game), self.run_engine(&game));
        let mut intervals = motifs?;
        intervals.extend(swings?);

        let merged = merge_intervals(intervals);
        info!(highlights = merged.len(), "Analysis complete");
        Ok(merged)
    }

    /// Highlights as move tags.
    pub async fn analyze(&self, pgn: &str) -> Result<Vec<Highlight>, WorkerError> {
        Ok(intervals_format(&self.analyze_intervals(pgn).await?))
    }

    /// Highlights as persistence records.
    pub async fn analyze_records(&self, pgn: &str) -> Result<Vec<HighlightRecord>, WorkerError> {
        let merged = self.analyze_intervals(pgn).await?;
        Ok(merged.iter().map(HighlightRecord::from).collect())
    }

    async fn run_detectors(&self, game: &Arc<GameData>) -> Result<Vec<Interval>, WorkerError> {
        let tasks = self
            .detectors
            .iter()
            .filter_map(|name| create_detector(name))
            .map(|mut detector: Box<dyn MotifDetector>| {
                let game = Arc::clone(game);
                tokio::task::spawn_blocking(move || {
                    let raw = detector.scan(&game);
                    raw.iter().map(|r| extend_interval(&game, r)).collect::<Vec<_>>()
                })
            });

        let mut intervals = Vec::new();
        for result in join_all(tasks).await {
            intervals.extend(result.map_err(|e| WorkerError::Task(e.to_string()))?);
        }
        Ok(intervals)
    }

    async fn run_engine(&self, game: &GameData) -> Result<Vec<Interval>, WorkerError> {
        let Some(settings) = &self.engine else {
            return Ok(Vec::new());
        };

        let outcome = match tokio::time::timeout(settings.timeout, settings.detector.scan(game)).await {
            Ok(result) => result,
            Err(_) => Err(WorkerError::EngineTimeout(settings.timeout.as_secs())),
        };

        match (outcome, settings.policy) {
            (Ok(swings), _) => Ok(swings),
            (Err(e), EnginePolicy::Skip) => {
                warn!(error = %e, "Engine scan failed, continuing with motif highlights only");
                Ok(Vec::new())
            }
            (Err(e), EnginePolicy::Fail) => Err(match e {
                WorkerError::EngineTimeout(_) | WorkerError::EngineUnavailable(_) => e,
                other => WorkerError::EngineUnavailable(other.to_string()),
            }),
        }
    }
}
