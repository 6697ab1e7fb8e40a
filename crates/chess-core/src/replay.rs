//! Forward-only replay cursor over a parsed game.

use shakmaty::{Bitboard, Chess, Color, Move, Piece, Position, Square};

use crate::board_utils;
use crate::game_data::GameData;
use crate::ply::Ply;

/// One applied half-move with the positions around it.
#[derive(Debug, Clone)]
pub struct Step {
    pub ply: Ply,
    pub mv: Move,
    pub before: Chess,
    pub after: Chess,
}

/// Cursor over the mainline of a [`GameData`]. Queries answer against the
/// current position, i.e. after the last applied move.
pub struct Replayer<'a> {
    moves: &'a [Move],
    position: Chess,
    ply: Ply,
}

impl<'a> Replayer<'a> {
    pub fn new(game: &'a GameData) -> Self {
        Self {
            moves: &game.moves,
            position: game.initial.clone(),
            ply: 0,
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of plies applied so far.
    pub fn ply(&self) -> Ply {
        self.ply
    }

    pub fn total_plies(&self) -> Ply {
        self.moves.len() as Ply
    }

    /// The move that the next `step` will apply.
    pub fn peek(&self) -> Option<&'a Move> {
        self.moves.get(self.ply as usize)
    }

    /// Apply the next move.
    pub fn step(&mut self) -> Option<Step> {
        let mv = self.peek()?.clone();
        let before = self.position.clone();
        self.position.play_unchecked(mv.clone());
        self.ply += 1;

        Some(Step {
            ply: self.ply,
            mv,
            before,
            after: self.position.clone(),
        })
    }

    /// Apply the next move without keeping the surrounding positions.
    pub fn advance(&mut self) -> Option<&'a Move> {
        let mv = self.peek()?;
        self.position.play_unchecked(mv.clone());
        self.ply += 1;
        Some(mv)
    }

    /// Apply moves until `ply` plies have been played (or the game ends).
    pub fn advance_to(&mut self, ply: Ply) {
        while self.ply < ply && self.advance().is_some() {}
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    pub fn attacks_from(&self, square: Square) -> Bitboard {
        board_utils::attacks_from(&self.position, square)
    }

    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        board_utils::is_attacked_by(&self.position, color, square)
    }

    pub fn is_pinned(&self, color: Color, square: Square) -> bool {
        board_utils::is_pinned(&self.position, color, square)
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_capture(&self, mv: &Move) -> bool {
        board_utils::is_capture(mv)
    }

    pub fn gives_check(&self, mv: &Move) -> bool {
        board_utils::gives_check(&self.position, mv)
    }
}
