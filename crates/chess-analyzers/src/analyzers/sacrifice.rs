use crate::analyzer_trait::{MotifDetector, MoveContext, RawInterval};
use chess_core::board_utils::{landing_square, piece_value, role_name};
use chess_core::Ply;
use shakmaty::{Color, Position, Role, Square};
use tracing::debug;

struct LiveSacrifice {
    start: Ply,
    square: Square,
    color: Color,
    role: Role,
}

/// Detects a piece that takes something cheaper and is taken straight back.
///
/// An instance only lives for the opponent's reply: once its own side is on
/// the move again it is dropped.
#[derive(Default)]
pub struct SacrificeDetector {
    live: Vec<LiveSacrifice>,
    completed: Vec<RawInterval>,
}

impl SacrificeDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotifDetector for SacrificeDetector {
    fn name(&self) -> &'static str {
        "sacrifice"
    }

    fn start_game(&mut self) {
        self.live.clear();
        self.completed.clear();
    }

    fn process_move(&mut self, ctx: &MoveContext) {
        let from = ctx.mv.from();
        let to = landing_square(ctx.mv);
        let captured = ctx.mv.capture();
        let completed = &mut self.completed;

        self.live.retain(|sac| {
            if captured.is_some() && to == sac.square {
                debug!(ply = ctx.ply, start = sac.start, square = %to, "sacrificed piece taken");
                completed.push(RawInterval {
                    start: sac.start - 1,
                    end: ctx.ply,
                    detected_by: "sacrifice",
                    description: Some(format!("{} sacrifice on {}", role_name(sac.role), sac.square)),
                });
                return false;
            }
            from != Some(sac.square)
        });

        // Taking something worth less than the capturing piece
        if let Some(captured) = captured {
            let role = ctx.mv.role();
            if piece_value(captured) < piece_value(role) {
                self.live.push(LiveSacrifice {
                    start: ctx.ply,
                    square: to,
                    color: ctx.before.turn(),
                    role,
                });
            }
        }

        let to_move = ctx.after.turn();
        self.live.retain(|sac| sac.color != to_move);
    }

    fn finish_game(&mut self) -> Vec<RawInterval> {
        self.live.clear();
        std::mem::take(&mut self.completed)
    }
}
