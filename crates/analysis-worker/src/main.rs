//! Highlight worker CLI
//!
//! Reads one PGN game from a file or stdin and prints its highlights as JSON.
//!
//! ```text
//! analysis-worker [--engine PATH] [--depth N] [--threshold CP] [--records] [PGN_FILE]
//! ```

use std::io::Read;

use anyhow::{bail, Context};
use tracing::info;

use analysis_worker::{HighlightAnalyzer, WorkerConfig};

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    engine: Option<String>,
    depth: Option<u32>,
    threshold: Option<i32>,
    records: bool,
    pgn_file: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--engine" => parsed.engine = Some(args.next().context("--engine needs a path")?),
            "--depth" => {
                let value = args.next().context("--depth needs a number")?;
                parsed.depth = Some(value.parse().with_context(|| format!("invalid depth {value:?}"))?);
            }
            "--threshold" => {
                let value = args.next().context("--threshold needs a number")?;
                parsed.threshold = Some(value.parse().with_context(|| format!("invalid threshold {value:?}"))?);
            }
            "--records" => parsed.records = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if parsed.pgn_file.is_some() => bail!("only one PGN file may be given"),
            path => parsed.pgn_file = Some(path.to_string()),
        }
    }

    Ok(parsed)
}

fn read_pgn(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
        None => {
            let mut pgn = String::new();
            std::io::stdin().read_to_string(&mut pgn).context("reading PGN from stdin")?;
            Ok(pgn)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = WorkerConfig::load()?;
    if let Some(engine) = args.engine {
        config.stockfish_path = Some(engine);
    }
    if let Some(depth) = args.depth {
        config.analysis_depth = depth;
    }
    if let Some(threshold) = args.threshold {
        config.swing_threshold = threshold;
    }

    let pgn = read_pgn(args.pgn_file.as_deref())?;
    let analyzer = HighlightAnalyzer::from_config(&config)?;
    info!(engine = config.stockfish_path.is_some(), "Starting analysis");

    let json = if args.records {
        serde_json::to_string_pretty(&analyzer.analyze_records(&pgn).await?)?
    } else {
        serde_json::to_string_pretty(&analyzer.analyze(&pgn).await?)?
    };
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_all_options() {
        let parsed = args(&["--engine", "/bin/sf", "--depth", "12", "--threshold", "200", "--records", "game.pgn"])
            .unwrap();
        assert_eq!(
            parsed,
            CliArgs {
                engine: Some("/bin/sf".into()),
                depth: Some(12),
                threshold: Some(200),
                records: true,
                pgn_file: Some("game.pgn".into()),
            }
        );
    }

    #[test]
    fn test_parse_no_args_reads_stdin() {
        assert_eq!(args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["--depth"]).is_err());
        assert!(args(&["--depth", "deep"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.pgn", "b.pgn"]).is_err());
    }
}
