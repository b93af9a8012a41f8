//! Offline scoring of a recorded observation log
//!
//! Each non-empty input line is one observation. Every line goes through the
//! same evaluator, so step-count regressions in the log start new episodes
//! exactly as they would on a live stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;
use track_reward_core::{Result, RewardError, RewardEvaluator, StepObservation};

/// Totals for one replayed log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaySummary {
    pub steps_scored: u64,
    pub episodes: u64,
    pub total_reward: f64,
}

/// Score every observation line from `reader` and write one
/// `{"steps", "reward", "components", "gate"}` line per step to `writer`.
///
/// An unparseable or invalid line stops the replay; lines before it have
/// already been written.
pub async fn replay<R, W>(
    evaluator: &mut RewardEvaluator,
    mut reader: R,
    mut writer: W,
) -> Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut lineno = 0u64;
    let mut summary = ReplaySummary {
        steps_scored: 0,
        episodes: 0,
        total_reward: 0.0,
    };

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to read observation: {}", e)))?;
        if bytes_read == 0 {
            break;
        }
        lineno += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let obs = StepObservation::from_json_str(trimmed).map_err(|e| at_line(lineno, e))?;
        let reward = evaluator.evaluate_detailed(&obs)?;
        summary.steps_scored += 1;
        summary.total_reward += reward.value;

        let out = serde_json::json!({
            "steps": obs.steps,
            "reward": reward.value,
            "components": reward.components,
            "gate": reward.gate,
        });
        writer
            .write_all(format!("{}\n", out).as_bytes())
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to write result: {}", e)))?;
    }

    writer
        .flush()
        .await
        .map_err(|e| RewardError::IoError(format!("Failed to flush: {}", e)))?;

    summary.episodes = evaluator.memory().episodes_started();
    info!(
        "Replayed {} steps over {} episodes, total reward {:.3}",
        summary.steps_scored, summary.episodes, summary.total_reward
    );
    Ok(summary)
}

fn at_line(lineno: u64, err: RewardError) -> RewardError {
    match err {
        RewardError::InvalidObservation(msg) => {
            RewardError::InvalidObservation(format!("line {}: {}", lineno, msg))
        }
        other => other,
    }
}
