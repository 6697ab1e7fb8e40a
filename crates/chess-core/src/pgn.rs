//! PGN parsing on top of pgn-reader: mainline moves, headers and `[%ts]` comments.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::LazyLock;

use chrono::DateTime;
use pgn_reader::{RawComment, RawTag, Reader, SanPlus, Skip, Visitor};
use regex::Regex;
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

use crate::error::ChessCoreError;
use crate::game_data::{GameData, GameMetadata};

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[%ts\s+(\d+)\]").expect("timestamp pattern is valid"));

/// Parse the first game of a PGN string.
///
/// Fails with `InvalidPgn` when no game is present, when a FEN header does
/// not describe a legal position, or when a mainline move is illegal.
pub fn parse_pgn(pgn: &str) -> Result<GameData, ChessCoreError> {
    let mut reader = Reader::new(pgn.as_bytes());
    let mut collector = GameCollector;

    match reader.read_game(&mut collector)? {
        Some(result) => result,
        None => Err(ChessCoreError::InvalidPgn("no game found".into())),
    }
}

/// Headers collected before the movetext starts.
#[derive(Default)]
struct GameTags {
    metadata: GameMetadata,
    fen: Option<String>,
}

/// Replay state while the movetext is being read.
struct MovetextState {
    position: Chess,
    game: GameData,
}

struct GameCollector;

impl Visitor for GameCollector {
    type Tags = GameTags;
    type Movetext = MovetextState;
    type Output = Result<GameData, ChessCoreError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut GameTags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let value = value.decode_utf8_lossy().into_owned();
        match name {
            b"White" => tags.metadata.white = Some(value),
            b"Black" => tags.metadata.black = Some(value),
            b"Result" => tags.metadata.result = Some(value),
            b"Event" => tags.metadata.event = Some(value),
            b"Date" => tags.metadata.date = Some(value),
            b"FEN" => tags.fen = Some(value),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<Self::Output, MovetextState> {
        let initial = match tags.fen.as_deref() {
            Some(fen) => match position_from_fen(fen) {
                Ok(pos) => pos,
                Err(e) => return ControlFlow::Break(Err(e)),
            },
            None => Chess::default(),
        };

        ControlFlow::Continue(MovetextState {
            position: initial.clone(),
            game: GameData {
                metadata: tags.metadata,
                initial,
                moves: Vec::new(),
                san: Vec::new(),
                move_timestamps: BTreeMap::new(),
            },
        })
    }

    fn san(&mut self, state: &mut MovetextState, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        match san_plus.san.to_move(&state.position) {
            Ok(mv) => {
                state.position.play_unchecked(mv.clone());
                state.game.moves.push(mv);
                state.game.san.push(san_plus.to_string());
                ControlFlow::Continue(())
            }
            Err(_) => ControlFlow::Break(Err(ChessCoreError::InvalidPgn(format!(
                "illegal move {san_plus} at ply {}",
                state.game.moves.len() + 1
            )))),
        }
    }

    fn comment(&mut self, state: &mut MovetextState, comment: RawComment<'_>) -> ControlFlow<Self::Output> {
        let ply = state.game.total_plies();
        if ply > 0 {
            let text = String::from_utf8_lossy(comment.as_bytes());
            if let Some(ts) = parse_timestamp_ms(&text).and_then(DateTime::from_timestamp_millis) {
                state.game.move_timestamps.insert(ply, ts);
            }
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _state: &mut MovetextState) -> ControlFlow<Self::Output, Skip> {
        // Mainline only
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, state: MovetextState) -> Self::Output {
        Ok(state.game)
    }
}

fn position_from_fen(fen: &str) -> Result<Chess, ChessCoreError> {
    let parsed: Fen = fen
        .parse()
        .map_err(|e| ChessCoreError::InvalidPgn(format!("bad FEN header {fen:?}: {e}")))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| ChessCoreError::InvalidPgn(format!("illegal FEN position {fen:?}: {e}")))
}

/// Extract the unix-millisecond value of a `[%ts N]` command inside a comment.
fn parse_timestamp_ms(comment: &str) -> Option<i64> {
    TIMESTAMP_RE
        .captures(comment)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
