//! Stockfish engine wrapper using UCI protocol (async I/O)

use shakmaty::Color;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::error::WorkerError;

/// Score reported for a forced mate, before subtracting the distance to it.
pub const MATE_SCORE: i32 = 10_000;

/// Final score of a search, from the side to move's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineScore {
    /// Centipawn score
    pub cp: Option<i32>,
    /// Mate in N moves (positive = side to move mates, negative or 0 = gets mated)
    pub mate: Option<i32>,
}

impl EngineScore {
    /// Centipawns for the side to move; mates are folded into `±(MATE_SCORE - |n|)`.
    pub fn centipawns(&self) -> Option<i32> {
        match (self.mate, self.cp) {
            (Some(n), _) if n > 0 => Some(MATE_SCORE - n),
            (Some(n), _) => Some(-MATE_SCORE - n),
            (None, cp) => cp,
        }
    }

    /// Centipawns from White's point of view.
    pub fn white_cp(&self, side_to_move: Color) -> Option<i32> {
        let cp = self.centipawns()?;
        Some(match side_to_move {
            Color::White => cp,
            Color::Black => -cp,
        })
    }
}

/// Stockfish engine instance. The process is killed when the engine is dropped.
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl StockfishEngine {
    /// Spawn a new Stockfish process and initialize UCI
    pub async fn new(path: &str) -> Result<Self, WorkerError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WorkerError::EngineUnavailable(format!("Failed to spawn Stockfish at {path}: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| WorkerError::EngineUnavailable("Stockfish stdin not captured".into()))?;
        let stdout = process
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| WorkerError::EngineUnavailable("Stockfish stdout not captured".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout,
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        engine.send("setoption name Threads value 1").await?;
        engine.send("setoption name Hash value 256").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to Stockfish
    async fn send(&mut self, cmd: &str) -> Result<(), WorkerError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| WorkerError::EngineUnavailable(format!("Failed to write to Stockfish: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| WorkerError::EngineUnavailable(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Read one line, failing if the engine closed its output.
    async fn read_line(&mut self, line: &mut String) -> Result<(), WorkerError> {
        line.clear();
        let read = self
            .stdout
            .read_line(line)
            .await
            .map_err(|e| WorkerError::EngineUnavailable(format!("Failed to read from Stockfish: {e}")))?;
        if read == 0 {
            return Err(WorkerError::EngineUnavailable("Stockfish exited unexpectedly".into()));
        }
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), WorkerError> {
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Search a position to a fixed depth and return the last reported score.
    pub async fn analyse(&mut self, fen: &str, depth: u32) -> Result<EngineScore, WorkerError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go depth {depth}")).await?;

        let mut score = EngineScore::default();
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();

            if trimmed.starts_with("info") && trimmed.contains(" score ") {
                // Bound scores are still the best estimate at that depth
                if let Some(cp) = parse_cp(trimmed) {
                    score = EngineScore { cp: Some(cp), mate: None };
                }
                if let Some(mate) = parse_mate(trimmed) {
                    score = EngineScore { cp: None, mate: Some(mate) };
                }
            } else if trimmed.starts_with("bestmove") {
                break;
            }
        }

        Ok(score)
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Value following `key` on an info line
fn parse_field(line: &str, key: &str) -> Option<i32> {
    let mut parts = line.split_whitespace();
    parts.find(|part| *part == key)?;
    parts.next()?.parse().ok()
}

/// Parse centipawn score from info line
fn parse_cp(line: &str) -> Option<i32> {
    parse_field(line, "cp")
}

/// Parse mate score from info line
fn parse_mate(line: &str) -> Option<i32> {
    parse_field(line, "mate")
}
