//! Tactical motif detection for chess games.
//!
//! Each detector walks a game move by move and reports raw intervals where
//! its motif pays off. Raw intervals are grown over forcing play by
//! [`extend_interval`] and folded into one timeline by [`merge_intervals`].

pub mod analyzer_trait;
pub mod analyzers;
pub mod extension;
pub mod intervals;
pub mod unified;

pub use analyzer_trait::{MotifDetector, MoveContext, RawInterval};
pub use extension::extend_interval;
pub use intervals::{intervals_format, merge_intervals, Highlight, Interval};
pub use unified::{create_all_detectors, create_detector, detect_motifs, find_highlights};

/// Detector names and their display labels.
pub const MOTIF_TAGS: &[(&str, &str)] = &[
    ("fork", "Fork"),
    ("pin", "Pin"),
    ("trapped_piece", "Trapped Piece"),
    ("sacrifice", "Sacrifice"),
];
