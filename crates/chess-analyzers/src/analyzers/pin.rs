use std::collections::BTreeSet;

use crate::analyzer_trait::{MotifDetector, MoveContext, RawInterval};
use chess_core::board_utils::landing_square;
use chess_core::Ply;
use shakmaty::{Chess, Piece, Position, Role, Square};
use tracing::debug;

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

struct LivePin {
    start: Ply,
    bishop_sq: Square,
    front: Square,
    back: Square,
    pinned: BTreeSet<Square>,
}

impl LivePin {
    fn interval(&self, ply: Ply) -> RawInterval {
        RawInterval {
            start: self.start - 1,
            end: ply,
            detected_by: "pin",
            description: Some(format!("bishop pin from {}: {} to {}", self.bishop_sq, self.front, self.back)),
        }
    }
}

/// Detects bishop pins: the first piece on a diagonal is an enemy rook, queen
/// or king and the next piece behind it is one too. The pin pays off when
/// either piece is captured.
#[derive(Default)]
pub struct PinDetector {
    live: Vec<LivePin>,
    completed: Vec<RawInterval>,
}

impl PinDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_pin_target(piece: Piece, bishop: Piece) -> bool {
    piece.color != bishop.color && matches!(piece.role, Role::Rook | Role::Queen | Role::King)
}

/// Squares along one direction from `origin`, nearest first.
fn ray(origin: Square, df: i32, dr: i32) -> impl Iterator<Item = Square> {
    let (file, rank) = (origin.file() as i32, origin.rank() as i32);
    (1..8)
        .map(move |k| (file + df * k, rank + dr * k))
        .take_while(|&(f, r)| (0..8).contains(&f) && (0..8).contains(&r))
        .map(|(f, r)| Square::new((r * 8 + f) as u32))
}

/// Every (front, back) pair the bishop on `bishop_sq` currently pins.
pub fn find_bishop_pins(pos: &Chess, bishop_sq: Square) -> Vec<(Square, Square)> {
    let board = pos.board();
    let Some(bishop) = board.piece_at(bishop_sq) else {
        return Vec::new();
    };

    let mut pins = Vec::new();
    for (df, dr) in DIAGONALS {
        let mut front = None;
        for sq in ray(bishop_sq, df, dr) {
            let Some(piece) = board.piece_at(sq) else {
                continue;
            };
            match front {
                None if is_pin_target(piece, bishop) => front = Some(sq),
                None => break,
                Some(front_sq) => {
                    if is_pin_target(piece, bishop) {
                        pins.push((front_sq, sq));
                    }
                    break;
                }
            }
        }
    }
    pins
}

impl MotifDetector for PinDetector {
    fn name(&self) -> &'static str {
        "pin"
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

        self.live.retain_mut(|pin| {
            // Bishop moved away: only counts if it took a pinned piece
            if from == Some(pin.bishop_sq) {
                if is_capture && pin.pinned.contains(&to) {
                    completed.push(pin.interval(ctx.ply));
                }
                return false;
            }

            // Bishop was captured
            if to == pin.bishop_sq {
                return false;
            }

            if is_capture && pin.pinned.contains(&to) {
                debug!(ply = ctx.ply, start = pin.start, square = %to, "pinned piece captured");
                completed.push(pin.interval(ctx.ply));
                return false;
            }

            if let Some(sq) = from {
                pin.pinned.remove(&sq);
            }
            !pin.pinned.is_empty()
        });

        let lands_bishop = ctx
            .after
            .board()
            .piece_at(to)
            .is_some_and(|p| p.role == Role::Bishop);
        if !lands_bishop {
            return;
        }

        for (front, back) in find_bishop_pins(ctx.after, to) {
            debug!(ply = ctx.ply, bishop = %to, front = %front, back = %back, "pin started");
            self.live.push(LivePin {
                start: ctx.ply,
                bishop_sq: to,
                front,
                back,
                pinned: BTreeSet::from([front, back]),
            });
        }
    }

    fn finish_game(&mut self) -> Vec<RawInterval> {
        self.live.clear();
        std::mem::take(&mut self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::parse_pgn;
    use shakmaty::{fen::Fen, CastlingMode};

    fn scan(pgn: &str) -> Vec<RawInterval> {
        let game = parse_pgn(pgn).unwrap();
        PinDetector::new().scan(&game)
    }

    #[test]
    fn test_ray_stops_at_edge() {
        let squares: Vec<Square> = ray(Square::E4, -1, 1).collect();
        assert_eq!(squares, vec![Square::D5, Square::C6, Square::B7, Square::A8]);
        assert_eq!(ray(Square::H1, 1, 1).count(), 0);
    }

    #[test]
    fn test_find_bishop_pins() {
        let pos: Chess = "k7/8/2r5/8/4B3/8/8/6K1 b - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap();
        assert_eq!(find_bishop_pins(&pos, Square::E4), vec![(Square::C6, Square::A8)]);
    }

    #[test]
    fn test_minor_piece_in_front_is_no_pin() {
        let pos: Chess = "k7/8/2n5/8/4B3/8/8/6K1 b - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap();
        assert!(find_bishop_pins(&pos, Square::E4).is_empty());
    }

    #[test]
    fn test_pinned_rook_captured_later() {
        let pgn = r#"[FEN "k7/7p/2r5/8/8/5B2/8/2R3K1 w - - 0 1"]

1. Be4 h6 2. Kh1 h5 3. Rxc6 *"#;
        let found = scan(pgn);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (0, 5));
        assert_eq!(found[0].detected_by, "pin");
    }

    #[test]
    fn test_pin_dropped_when_bishop_captured() {
        // The rook on e8 removes the pinning bishop, so taking the rook on c6
        // afterwards is no longer a pin payoff
        let pgn = r#"[FEN "k3r3/7p/2r5/8/8/5B2/8/2R3K1 w - - 0 1"]

1. Be4 Rxe4 2. Rxc6 *"#;
        assert!(scan(pgn).is_empty());
    }

    #[test]
    fn test_pin_retired_when_bishop_steps_away() {
        let pgn = r#"[FEN "k7/7p/2r5/8/8/5B2/8/2R3K1 w - - 0 1"]

1. Be4 h6 2. Bd3 h5 3. Rxc6 *"#;
        assert!(scan(pgn).is_empty());
    }

    #[test]
    fn test_pinned_rook_captured_after_king_steps_off() {
        let pgn = r#"[FEN "k7/7p/2r5/8/8/5B2/8/2R3K1 w - - 0 1"]

1. Be4 Kb8 2. Kh1 h6 3. Rxc6 *"#;
        let found = scan(pgn);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].end), (0, 5));
    }

    #[test]
    fn test_pin_dissolves_when_both_pieces_leave() {
        let pgn = r#"[FEN "k7/7p/2r5/8/8/5B2/8/6K1 w - - 0 1"]

1. Be4 Kb8 2. Kh1 Rc5 3. Kg1 *"#;
        assert!(scan(pgn).is_empty());
    }
}
