//! Base trait and types for motif detectors.

use chess_core::{GameData, Ply, Replayer, Step};
use shakmaty::{Chess, Move};

/// Context available to detectors at each move.
pub struct MoveContext<'a> {
    pub mv: &'a Move,
    pub ply: Ply,          // 1-indexed half-move number
    pub before: &'a Chess, // Board state BEFORE the move
    pub after: &'a Chess,  // Board state AFTER the move
}

impl<'a> From<&'a Step> for MoveContext<'a> {
    fn from(step: &'a Step) -> Self {
        Self {
            mv: &step.mv,
            ply: step.ply,
            before: &step.before,
            after: &step.after,
        }
    }
}

/// A motif occurrence before extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterval {
    /// Ply before the move that set the motif up (0 = before the first move)
    pub start: Ply,
    /// Ply on which the motif concluded
    pub end: Ply,
    pub detected_by: &'static str,
    pub description: Option<String>,
}

/// Trait that all motif detectors implement.
///
/// A detector owns its live instances; `process_move` updates them against
/// the position before the move and starts new ones from the position after.
pub trait MotifDetector: Send {
    /// Name reported as `detected_by`.
    fn name(&self) -> &'static str;

    /// Reset state for a new game.
    fn start_game(&mut self);

    /// Process a single move.
    fn process_move(&mut self, ctx: &MoveContext);

    /// Finalize the game and hand back every completed interval.
    fn finish_game(&mut self) -> Vec<RawInterval>;

    /// Replay the whole game on a private cursor.
    fn scan(&mut self, game: &GameData) -> Vec<RawInterval> {
        self.start_game();
        let mut replay = Replayer::new(game);
        while let Some(step) = replay.step() {
            self.process_move(&MoveContext::from(&step));
        }
        self.finish_game()
    }
}
