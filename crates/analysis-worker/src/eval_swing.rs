//! Moments where the engine evaluation swings sharply between two plies.

use chess_analyzers::{extend_interval, Interval, RawInterval};
use chess_core::{GameData, Ply, Replayer};
use shakmaty::fen::Fen;
use shakmaty::{Chess, EnPassantMode, Position};
use tracing::{debug, info};

use crate::error::WorkerError;
use crate::stockfish::StockfishEngine;

pub const DEFAULT_SWING_THRESHOLD: i32 = 290;
pub const DEFAULT_ANALYSIS_DEPTH: u32 = 16;

/// Swings whose extended interval spans this many plies or fewer are dropped.
const MIN_SWING_SPAN: Ply = 2;

/// Turn per-position scores into swing intervals.
///
/// `scores[0]` is the starting position and `scores[ply]` the position after
/// that ply, all White-relative. A swing at `ply` is extended from
/// `(ply - 1, ply)` and kept only when it grows past [`MIN_SWING_SPAN`].
pub fn swing_intervals(game: &GameData, scores: &[i32], threshold: i32) -> Vec<Interval> {
    let mut found = Vec::new();
    for ply in 1..scores.len().min(game.total_plies() as usize + 1) {
        let diff = scores[ply] - scores[ply - 1];
        if diff.abs() < threshold {
            continue;
        }

        let ply = ply as Ply;
        let raw = RawInterval {
            start: ply - 1,
            end: ply,
            detected_by: "eval_swing",
            description: None,
        };
        let extended = extend_interval(game, &raw);
        if extended.end - raw.start > MIN_SWING_SPAN {
            debug!(ply, diff, end = extended.end, "evaluation swing");
            found.push(extended);
        }
    }
    found
}

fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Engine-backed swing detector. Each scan owns its own engine process.
#[derive(Clone, Debug)]
pub struct EvalSwingDetector {
    pub engine_path: String,
    pub depth: u32,
    pub threshold: i32,
}

impl EvalSwingDetector {
    pub fn new(engine_path: impl Into<String>) -> Self {
        Self {
            engine_path: engine_path.into(),
            depth: DEFAULT_ANALYSIS_DEPTH,
            threshold: DEFAULT_SWING_THRESHOLD,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Score every position of the game and return the kept swings.
    ///
    /// The engine is quit once scoring ends, whether it succeeded or not. If
    /// the future is dropped midway the process is killed with it.
    pub async fn scan(&self, game: &GameData) -> Result<Vec<Interval>, WorkerError> {
        let mut engine = StockfishEngine::new(&self.engine_path).await?;
        let scores = score_positions(&mut engine, game, self.depth).await;
        engine.quit().await;

        let scores = scores?;
        let swings = swing_intervals(game, &scores, self.threshold);
        info!(plies = game.total_plies(), swings = swings.len(), "Engine scan complete");
        Ok(swings)
    }
}

/// White-relative score of the start position and of the position after every ply.
pub async fn score_positions(
    engine: &mut StockfishEngine,
    game: &GameData,
    depth: u32,
) -> Result<Vec<i32>, WorkerError> {
    let mut replay = Replayer::new(game);
    let mut scores = Vec::with_capacity(game.total_plies() as usize + 1);

    loop {
        let pos = replay.position();
        let score = engine.analyse(&fen_of(pos), depth).await?;
        let cp = score.white_cp(pos.turn()).ok_or_else(|| {
            WorkerError::EngineUnavailable(format!("no score reported at ply {}", replay.ply()))
        })?;
        scores.push(cp);

        if replay.advance().is_none() {
            break;
        }
    }

    Ok(scores)
}
