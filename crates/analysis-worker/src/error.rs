//! Worker error types

use chess_core::ChessCoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid PGN: {0}")]
    InvalidPgn(#[from] ChessCoreError),

    #[error("Stockfish unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Engine analysis timed out after {0}s")]
    EngineTimeout(u64),

    #[error("Task error: {0}")]
    Task(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
