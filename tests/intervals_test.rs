/// Timeline invariants over real games: bounds, extension and merging.
mod common;

use chess_analyzers::{
    create_all_detectors, detect_motifs, extend_interval, intervals_format, merge_intervals, Interval,
};
use chess_core::parse_move_tag;
use common::*;

fn merged_for(pgn: &str) -> (u32, Vec<Interval>) {
    let game = game(pgn);
    let raw = detect_motifs(&game, &mut create_all_detectors());
    let extended: Vec<Interval> = raw.iter().map(|r| extend_interval(&game, r)).collect();
    (game.total_plies(), merge_intervals(extended))
}

#[test]
fn test_intervals_within_game_bounds() {
    for pgn in ALL_GAMES {
        let (total, merged) = merged_for(pgn);
        for interval in &merged {
            assert!(interval.start >= 1, "{interval:?} in {pgn}");
            assert!(interval.start <= interval.end, "{interval:?} in {pgn}");
            assert!(interval.end <= total, "{interval:?} in {pgn}");
        }
    }
}

#[test]
fn test_merged_intervals_disjoint_and_sorted() {
    for pgn in ALL_GAMES {
        let (_, merged) = merged_for(pgn);
        for pair in merged.windows(2) {
            assert!(pair[0].end < pair[1].start, "{pair:?} in {pgn}");
        }
    }
}

#[test]
fn test_merge_idempotent_on_real_games() {
    for pgn in ALL_GAMES {
        let (_, merged) = merged_for(pgn);
        assert_eq!(merge_intervals(merged.clone()), merged);
    }
}

#[test]
fn test_extension_is_monotonic() {
    for pgn in ALL_GAMES {
        let game = game(pgn);
        for raw in detect_motifs(&game, &mut create_all_detectors()) {
            let extended = extend_interval(&game, &raw);
            assert!(extended.end >= raw.end);
            assert!(extended.start <= raw.start.max(1));
        }
    }
}

#[test]
fn test_tags_round_trip_to_plies() {
    for pgn in ALL_GAMES {
        let (_, merged) = merged_for(pgn);
        for (interval, highlight) in merged.iter().zip(intervals_format(&merged)) {
            assert_eq!(parse_move_tag(&highlight.start_tag).unwrap(), interval.start);
            assert_eq!(parse_move_tag(&highlight.end_tag).unwrap(), interval.end);
        }
    }
}

#[test]
fn test_opera_game_sacrifices() {
    let (total, merged) = merged_for(OPERA_GAME);
    assert_eq!(total, 33);

    // 10. Nxb5 cxb5 11. Bxb5+ and 13. Rxd7 Rxd7
    let covering = |from: u32, to: u32| {
        merged
            .iter()
            .find(|iv| iv.start <= from && iv.end >= to)
            .unwrap_or_else(|| panic!("no interval covers plies {from}..={to}: {merged:?}"))
    };
    assert!(covering(19, 21).detected_by.contains(&"sacrifice".to_string()));
    assert!(covering(25, 26).detected_by.contains(&"sacrifice".to_string()));
}
