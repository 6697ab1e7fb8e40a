//! Highlight analysis worker: motif detectors plus an optional Stockfish
//! evaluation-swing scan, combined into one highlight timeline per game.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod eval_swing;
pub mod stockfish;

pub use analyzer::{EngineSettings, HighlightAnalyzer, HighlightRecord};
pub use config::{EnginePolicy, WorkerConfig};
pub use error::WorkerError;
pub use eval_swing::EvalSwingDetector;
