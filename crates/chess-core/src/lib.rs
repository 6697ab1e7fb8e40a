//! Shared chess plumbing for highlight detection.
//!
//! PGN parsing into [`GameData`], ply/tag notation, board queries on top of
//! shakmaty, and the forward-only [`Replayer`] every detector walks.

pub mod board_utils;
pub mod error;
pub mod game_data;
pub mod pgn;
pub mod ply;
pub mod replay;

pub use error::ChessCoreError;
pub use game_data::{GameData, GameMetadata};
pub use pgn::parse_pgn;
pub use ply::{move_tag, parse_move_tag, Ply};
pub use replay::{Replayer, Step};

pub use shakmaty;
