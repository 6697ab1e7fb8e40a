//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChessCoreError {
    #[error("Invalid PGN: {0}")]
    InvalidPgn(String),

    #[error("Invalid move tag: {0}")]
    InvalidTag(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
