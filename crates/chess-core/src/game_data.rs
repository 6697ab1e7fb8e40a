use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Move};

use crate::ply::Ply;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameMetadata {
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>, // "1-0", "0-1", "1/2-1/2", "*"
    pub event: Option<String>,
    pub date: Option<String>,
}

/// A parsed game: the mainline only, variations are skipped.
#[derive(Debug, Clone)]
pub struct GameData {
    pub metadata: GameMetadata,
    /// Position before the first move (standard start unless a FEN tag was given)
    pub initial: Chess,
    pub moves: Vec<Move>,
    pub san: Vec<String>,
    /// `[%ts <unix-ms>]` comments keyed by the ply they follow
    pub move_timestamps: BTreeMap<Ply, DateTime<Utc>>,
}

impl GameData {
    pub fn total_plies(&self) -> Ply {
        self.moves.len() as Ply
    }

    /// Move played at a 1-based ply.
    pub fn move_at(&self, ply: Ply) -> Option<&Move> {
        let idx = (ply as usize).checked_sub(1)?;
        self.moves.get(idx)
    }
}
