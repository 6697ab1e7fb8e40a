//! Runs a set of motif detectors over a game in a single pass.

use chess_core::{GameData, Replayer};
use tracing::debug;

use crate::analyzer_trait::{MotifDetector, MoveContext, RawInterval};
use crate::analyzers;
use crate::extension::extend_interval;
use crate::intervals::{intervals_format, merge_intervals, Highlight, Interval};
use crate::MOTIF_TAGS;

/// Create a detector by its `detected_by` name.
pub fn create_detector(name: &str) -> Option<Box<dyn MotifDetector>> {
    let detector: Box<dyn MotifDetector> = match name {
        "fork" => Box::new(analyzers::ForkDetector::new()),
        "pin" => Box::new(analyzers::PinDetector::new()),
        "trapped_piece" => Box::new(analyzers::TrappedPieceDetector::new()),
        "sacrifice" => Box::new(analyzers::SacrificeDetector::new()),
        _ => return None,
    };
    Some(detector)
}

/// One instance of every motif detector.
pub fn create_all_detectors() -> Vec<Box<dyn MotifDetector>> {
    MOTIF_TAGS
        .iter()
        .filter_map(|(name, _)| create_detector(name))
        .collect()
}

/// Feed every move of the game to all detectors and collect their raw intervals.
pub fn detect_motifs(game: &GameData, detectors: &mut [Box<dyn MotifDetector>]) -> Vec<RawInterval> {
    for detector in detectors.iter_mut() {
        detector.start_game();
    }

    let mut replay = Replayer::new(game);
    while let Some(step) = replay.step() {
        let ctx = MoveContext::from(&step);
        for detector in detectors.iter_mut() {
            detector.process_move(&ctx);
        }
    }

    let mut raw = Vec::new();
    for detector in detectors.iter_mut() {
        let found = detector.finish_game();
        debug!(detector = detector.name(), count = found.len(), "motifs found");
        raw.extend(found);
    }
    raw
}

/// Extend every raw interval against the game.
pub fn extend_all(game: &GameData, raw: &[RawInterval]) -> Vec<Interval> {
    raw.iter().map(|r| extend_interval(game, r)).collect()
}

/// Motif-only highlights for a game: detect, extend, merge and format.
pub fn find_highlights(game: &GameData) -> Vec<Highlight> {
    let mut detectors = create_all_detectors();
    let raw = detect_motifs(game, &mut detectors);
    intervals_format(&merge_intervals(extend_all(game, &raw)))
}
