//! Board queries for tactical detection on top of shakmaty

use shakmaty::{Bitboard, Chess, Color, File, Move, Position, Role, Square};

// Piece values for relative comparisons (never summed into a score)
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 100;

/// Piece value including the king
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

pub fn role_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "pawn",
        Role::Knight => "knight",
        Role::Bishop => "bishop",
        Role::Rook => "rook",
        Role::Queen => "queen",
        Role::King => "king",
    }
}

/// Square the moving piece ends up on. Castling lands the king on the
/// g- or c-file rather than on the rook it is encoded with.
pub fn landing_square(mv: &Move) -> Square {
    match *mv {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() { File::G } else { File::C };
            Square::from_coords(file, king.rank())
        }
        _ => mv.to(),
    }
}

/// Squares attacked by the piece standing on `square`
pub fn attacks_from(pos: &Chess, square: Square) -> Bitboard {
    pos.board().attacks_from(square)
}

/// All pieces of `color` attacking `square`
pub fn attackers(pos: &Chess, color: Color, square: Square) -> Bitboard {
    let board = pos.board();
    board.attacks_to(square, color, board.occupied())
}

pub fn is_attacked_by(pos: &Chess, color: Color, square: Square) -> bool {
    attackers(pos, color, square).any()
}

/// Is the piece of `color` on `square` pinned to its own king?
///
/// Lifting the piece off the board must reveal a slider attack on the king.
pub fn is_pinned(pos: &Chess, color: Color, square: Square) -> bool {
    let board = pos.board();
    let Some(king) = board.king_of(color) else {
        return false;
    };
    if king == square {
        return false;
    }

    let occupied = board.occupied();
    let lifted = occupied & !Bitboard::from(square);
    let revealed = board.attacks_to(king, !color, lifted) & !board.attacks_to(king, !color, occupied);
    revealed.any()
}

pub fn is_capture(mv: &Move) -> bool {
    mv.is_capture()
}

/// Does playing `mv` in `pos` put the opponent in check?
pub fn gives_check(pos: &Chess, mv: &Move) -> bool {
    let mut after = pos.clone();
    after.play_unchecked(mv.clone());
    after.is_check()
}

/// Is a piece defended by its own side?
pub fn is_defended(pos: &Chess, color: Color, square: Square) -> bool {
    is_attacked_by(pos, color, square)
}

/// Can the piece be taken by an enemy non-king piece worth no more than it?
pub fn can_be_taken_by_cheaper_piece(pos: &Chess, role: Role, color: Color, square: Square) -> bool {
    let board = pos.board();
    attackers(pos, !color, square).into_iter().any(|att_sq| {
        board
            .piece_at(att_sq)
            .is_some_and(|att| att.role != Role::King && piece_value(att.role) <= piece_value(role))
    })
}

/// Is a piece in a bad spot (under attack and either hanging or takeable by
/// a cheaper-or-equal piece)?
pub fn is_in_bad_spot(pos: &Chess, square: Square) -> bool {
    let Some(piece) = pos.board().piece_at(square) else {
        return false;
    };

    if !is_attacked_by(pos, !piece.color, square) {
        return false;
    }

    !is_defended(pos, piece.color, square)
        || can_be_taken_by_cheaper_piece(pos, piece.role, piece.color, square)
}

/// A non-pawn, non-king piece with no move that escapes its bad spot.
///
/// Every legal move of the piece either captures something of lesser or
/// equal value or lands on another bad spot.
///
/// Only pieces of the side to move have legal moves, so a piece of the other
/// side that stands in a bad spot counts as trapped until its turn comes.
pub fn is_trapped(pos: &Chess, square: Square) -> bool {
    let Some(piece) = pos.board().piece_at(square) else {
        return false;
    };
    if matches!(piece.role, Role::Pawn | Role::King) {
        return false;
    }
    if pos.is_check() || is_pinned(pos, piece.color, square) {
        return false;
    }
    if !is_in_bad_spot(pos, square) {
        return false;
    }

    let value = piece_value(piece.role);
    for mv in pos.legal_moves() {
        if mv.from() != Some(square) {
            continue;
        }

        // Taking something worth no more than the piece itself is no way out
        if mv.capture().is_some_and(|captured| piece_value(captured) <= value) {
            continue;
        }

        let to = landing_square(&mv);
        let mut after = pos.clone();
        after.play_unchecked(mv);
        if !is_in_bad_spot(&after, to) {
            return false;
        }
    }

    true
}
