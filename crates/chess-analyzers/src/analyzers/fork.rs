use std::collections::HashMap;

use crate::analyzer_trait::{MotifDetector, MoveContext, RawInterval};
use chess_core::board_utils::{attacks_from, is_attacked_by, is_defended, landing_square, piece_value, role_name};
use chess_core::Ply;
use shakmaty::{Piece, Position, Role, Square};
use tracing::debug;

/// One piece attacking two or more enemy pieces that it could win.
struct LiveFork {
    start: Ply,
    attacker_sq: Square,
    attacker_role: Role,
    attacker_value: i32,
    targets: HashMap<Square, Piece>,
}

impl LiveFork {
    fn interval(&self, ply: Ply) -> RawInterval {
        RawInterval {
            start: self.start - 1,
            end: ply,
            detected_by: "fork",
            description: Some(format!("{} fork from {}", role_name(self.attacker_role), self.attacker_sq)),
        }
    }
}

/// Detects forks: a moved piece attacks ≥2 enemy non-pawn pieces that are
/// either worth more than it or undefended. The fork pays off when one of
/// the targets is captured.
#[derive(Default)]
pub struct ForkDetector {
    live: Vec<LiveFork>,
    completed: Vec<RawInterval>,
}

impl ForkDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fork's own capture counts unless it is an even trade into a defended square.
    fn attacker_capture_wins(ctx: &MoveContext, fork: &LiveFork, target_sq: Square) -> bool {
        let Some(captured) = ctx.before.board().piece_at(target_sq) else {
            return false;
        };
        let defended_before = is_attacked_by(ctx.before, captured.color, target_sq);
        !(piece_value(captured.role) == fork.attacker_value && defended_before)
    }
}

impl MotifDetector for ForkDetector {
    fn name(&self) -> &'static str {
        "fork"
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

        self.live.retain_mut(|fork| {
            // The forking piece moved: the fork ends here either way
            if from == Some(fork.attacker_sq) {
                if is_capture
                    && fork.targets.contains_key(&to)
                    && Self::attacker_capture_wins(ctx, fork, to)
                {
                    debug!(ply = ctx.ply, start = fork.start, "fork won by the attacker");
                    completed.push(fork.interval(ctx.ply));
                }
                return false;
            }

            // A target was taken by some other piece
            if is_capture && fork.targets.contains_key(&to) {
                debug!(ply = ctx.ply, start = fork.start, "fork target captured");
                completed.push(fork.interval(ctx.ply));
                return false;
            }

            // A target stepped away: follow it
            if let Some(target) = from.and_then(|sq| fork.targets.remove(&sq)) {
                fork.targets.insert(to, target);
            }
            true
        });

        let board = ctx.after.board();
        let Some(attacker) = board.piece_at(to) else {
            return;
        };
        let attacker_value = piece_value(attacker.role);

        let targets: HashMap<Square, Piece> = attacks_from(ctx.after, to)
            .into_iter()
            .filter_map(|sq| {
                let piece = board.piece_at(sq)?;
                if piece.color == attacker.color || piece.role == Role::Pawn {
                    return None;
                }
                let defended = is_defended(ctx.after, piece.color, sq);
                (piece_value(piece.role) > attacker_value || !defended).then_some((sq, piece))
            })
            .collect();

        if targets.len() >= 2 {
            debug!(ply = ctx.ply, square = %to, targets = targets.len(), "fork started");
            self.live.push(LiveFork {
                start: ctx.ply,
                attacker_sq: to,
                attacker_role: attacker.role,
                attacker_value,
                targets,
            });
        }
    }

    fn finish_game(&mut self) -> Vec<RawInterval> {
        self.live.clear();
        std::mem::take(&mut self.completed)
    }
}
