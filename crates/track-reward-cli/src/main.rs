//! Track reward server
//!
//! Serves the JSON-RPC scoring protocol over stdio, or replays a file of
//! newline-delimited observations through a single evaluator:
//!
//! ```text
//! track-reward-server [--config PATH] [--max-streams N] [--replay PATH]
//! ```

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;
use track_reward_core::{RewardConfig, RewardEvaluator};
use track_reward_server::{DEFAULT_MAX_STREAMS, RewardServer, replay};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    max_streams: Option<usize>,
    replay: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().context("--config needs a path")?.into());
            }
            "--max-streams" => {
                let n = iter.next().context("--max-streams needs a number")?;
                args.max_streams = Some(n.parse().context("--max-streams must be an integer")?);
            }
            "--replay" => {
                args.replay = Some(iter.next().context("--replay needs a path")?.into());
            }
            "-h" | "--help" => {
                eprintln!(
                    "usage: track-reward-server [--config PATH] [--max-streams N] [--replay PATH]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(args)
}

/// Score each observation line of `path` in order, printing one JSON result per line
async fn replay_file(path: &Path, config: RewardConfig) -> Result<()> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let mut evaluator = RewardEvaluator::new(config)?;

    replay(&mut evaluator, BufReader::new(file), tokio::io::stdout())
        .await
        .with_context(|| format!("replaying {}", path.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading reward config from {}", path.display());
            RewardConfig::from_file(path)?
        }
        None => RewardConfig::default(),
    };

    if let Some(path) = &args.replay {
        return replay_file(path, config).await;
    }

    let max_streams = args.max_streams.unwrap_or(DEFAULT_MAX_STREAMS);
    info!("Serving up to {} streams", max_streams);
    let server = RewardServer::new(config, max_streams)?;
    server.run_stdio().await?;

    Ok(())
}
