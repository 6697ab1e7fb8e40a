#![allow(dead_code)]

use chess_analyzers::Highlight;
use chess_core::{parse_pgn, GameData};

/// Legal's mate: queen given up on move 5, mate with the minor pieces on move 7.
pub const LEGALS_MATE: &str = r#"[Event "Legal's mate"]
[White "Legal"]
[Black "Saint Brie"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. Bc4 Bg4 4. Nc3 g6 5. Nxe5 Bxd1 6. Bxf7+ Ke7 7. Nd5# 1-0"#;

/// Morphy's opera game, Paris 1858.
pub const OPERA_GAME: &str = r#"[Event "Paris"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]
[Date "1858.??.??"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7
8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7
14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0"#;

pub const SCHOLARS_MATE: &str = "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0";

/// Queen grabs f7 and is taken straight back.
pub const QUEEN_SAC: &str = "1. e4 e5 2. Qh5 Nc6 3. Qxf7+ Kxf7 4. Nf3 d6 *";

/// Knight forks rook and bishop, wins the rook, bishop recaptures.
pub const KNIGHT_FORK: &str = r#"[FEN "7k/3r4/8/8/6b1/5N2/8/6K1 w - - 0 1"]

1. Ne5 Be6 2. Nxd7 Bxd7 3. Kf2 *"#;

/// Bishop pins the rook on c6 to the king, the rook on c1 collects it later.
pub const BISHOP_PIN: &str = r#"[FEN "k7/7p/2r5/8/8/5B2/8/2R3K1 w - - 0 1"]

1. Be4 h6 2. Kh1 h5 3. Rxc6 *"#;

/// Knight stranded on a8 and picked up by the king.
pub const TRAPPED_KNIGHT: &str = r#"[FEN "N1k5/8/8/8/8/8/8/6K1 w - - 0 1"]

1. Kh1 Kb7 2. Kg1 Kxa8 *"#;

pub const ALL_GAMES: &[&str] = &[
    LEGALS_MATE,
    OPERA_GAME,
    SCHOLARS_MATE,
    QUEEN_SAC,
    KNIGHT_FORK,
    BISHOP_PIN,
    TRAPPED_KNIGHT,
];

pub fn game(pgn: &str) -> GameData {
    parse_pgn(pgn).expect("test PGN parses")
}

/// (start_tag, end_tag) pairs for compact assertions.
pub fn tags(highlights: &[Highlight]) -> Vec<(&str, &str)> {
    highlights
        .iter()
        .map(|h| (h.start_tag.as_str(), h.end_tag.as_str()))
        .collect()
}
