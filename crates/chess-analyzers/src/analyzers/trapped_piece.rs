use crate::analyzer_trait::{MotifDetector, MoveContext, RawInterval};
use chess_core::board_utils::{is_trapped, landing_square, role_name};
use chess_core::Ply;
use shakmaty::{Position, Role, Square};
use tracing::debug;

const TRACKED_ROLES: [Role; 4] = [Role::Knight, Role::Bishop, Role::Rook, Role::Queen];

struct TrappedPiece {
    start: Ply,
    square: Square,
    role: Role,
}

/// Detects pieces with no safe square left that are then actually taken.
#[derive(Default)]
pub struct TrappedPieceDetector {
    live: Vec<TrappedPiece>,
    completed: Vec<RawInterval>,
}

impl TrappedPieceDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotifDetector for TrappedPieceDetector {
    fn name(&self) -> &'static str {
        "trapped_piece"
    }

    fn start_game(&mut self) {
        self.live.clear();
        self.completed.clear();
    }

    fn process_move(&mut self, ctx: &MoveContext) {
        let from = ctx.mv.from();
        let to = landing_square(ctx.mv);
        let is_capture = ctx.mv.is_capture();
        let completed = &mut self.completed;

        self.live.retain_mut(|trap| {
            if is_capture && to == trap.square {
                debug!(ply = ctx.ply, start = trap.start, square = %to, "trapped piece captured");
                completed.push(RawInterval {
                    start: trap.start - 1,
                    end: ctx.ply,
                    detected_by: "trapped_piece",
                    description: Some(format!("trapped {} on {}", role_name(trap.role), trap.square)),
                });
                return false;
            }
            if from == Some(trap.square) {
                trap.square = to;
            }
            true
        });

        let after = ctx.after;
        self.live
            .retain(|trap| after.board().piece_at(trap.square).is_some() && is_trapped(after, trap.square));

        let board = after.board();
        let side = after.turn();
        for role in TRACKED_ROLES {
            for sq in board.by_role(role) & board.by_color(side) {
                if self.live.iter().any(|trap| trap.square == sq) {
                    continue;
                }
                if is_trapped(after, sq) {
                    debug!(ply = ctx.ply, square = %sq, "piece trapped");
                    self.live.push(TrappedPiece {
                        start: ctx.ply,
                        square: sq,
                        role,
                    });
                }
            }
        }
    }

    fn finish_game(&mut self) -> Vec<RawInterval> {
        self.live.clear();
        std::mem::take(&mut self.completed)
    }
}
