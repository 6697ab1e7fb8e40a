//! Growing a detected interval over the forcing play that follows it.

use chess_core::{GameData, Replayer};

use crate::analyzer_trait::RawInterval;
use crate::intervals::Interval;

/// Extend `raw` forward from its end ply.
///
/// A capture is absorbed and the next ply is looked at. A check is absorbed
/// together with its reply, and the scan resumes after the reply; a game that
/// ends on the check stops there. The first quiet ply ends the extension.
pub fn extend_interval(game: &GameData, raw: &RawInterval) -> Interval {
    let mut replay = Replayer::new(game);
    replay.advance_to(raw.end);
    let mut end = replay.ply();

    while let Some(mv) = replay.peek() {
        if replay.is_capture(mv) {
            replay.advance();
            end = replay.ply();
            continue;
        }

        if replay.gives_check(mv) {
            replay.advance();
            end = replay.ply();
            if replay.advance().is_none() {
                break;
            }
            end = replay.ply();
            continue;
        }

        break;
    }

    Interval {
        start: raw.start.max(1),
        end,
        description: raw.description.clone(),
        detected_by: vec![raw.detected_by.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::parse_pgn;

    fn raw(start: u32, end: u32) -> RawInterval {
        RawInterval {
            start,
            end,
            detected_by: "fork",
            description: None,
        }
    }

    #[test]
    fn test_quiet_continuation_stops_immediately() {
        let game = parse_pgn("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *").unwrap();
        let extended = extend_interval(&game, &raw(1, 2));
        assert_eq!((extended.start, extended.end), (1, 2));
        assert_eq!(extended.detected_by, vec!["fork".to_string()]);
    }

    #[test]
    fn test_captures_absorbed() {
        // 3. exd5 Qxd5 are both captures, 4. Nc3 is quiet
        let game = parse_pgn("1. e4 e5 2. d4 d5 3. exd5 Qxd5 4. Nc3 Qa5 *").unwrap();
        let extended = extend_interval(&game, &raw(2, 4));
        assert_eq!((extended.start, extended.end), (2, 6));
    }

    #[test]
    fn test_check_absorbs_reply() {
        // Mate on f7 is a capture that ends the game
        let game = parse_pgn("1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# *").unwrap();
        let extended = extend_interval(&game, &raw(4, 6));
        assert_eq!((extended.start, extended.end), (4, 7));

        // A check followed by a quiet reply pulls the reply in too
        let game = parse_pgn("1. e4 f5 2. Qh5+ g6 3. Nc3 Nf6 *").unwrap();
        let extended = extend_interval(&game, &raw(1, 2));
        assert_eq!((extended.start, extended.end), (1, 4));
    }

    #[test]
    fn test_game_ending_on_check() {
        let game = parse_pgn("1. e4 f5 2. Qh5+ *").unwrap();
        let extended = extend_interval(&game, &raw(1, 2));
        assert_eq!(extended.end, 3);
    }

    #[test]
    fn test_start_clamped_to_first_ply() {
        let game = parse_pgn("1. e4 e5 2. Nf3 *").unwrap();
        let extended = extend_interval(&game, &raw(0, 1));
        assert_eq!((extended.start, extended.end), (1, 1));
    }

    #[test]
    fn test_extension_never_shrinks() {
        let game = parse_pgn("1. e4 d5 2. exd5 Qxd5 3. Nc3 Qa5 4. d4 c6 *").unwrap();
        for end in 1..=game.total_plies() {
            let extended = extend_interval(&game, &raw(end - 1, end));
            assert!(extended.end >= end);
            assert!(extended.end <= game.total_plies());
        }
    }
}
