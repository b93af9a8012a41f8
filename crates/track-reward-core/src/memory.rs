//! Per-episode progress memory

use serde::Serialize;
use tracing::debug;

/// Number of progress checkpoints; deciles 0..=9 plus two for overshoot past 100%
pub const CHECKPOINT_SLOTS: usize = 12;

/// State retained across calls within one episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeMemory {
    /// Last step count seen, `None` before the first call of an episode
    prev_steps: Option<u64>,
    /// Bonus awarded per progress decile; 0 means not yet awarded
    checkpoint_rewards: [f64; CHECKPOINT_SLOTS],
    /// Episodes started since the evaluator was created
    episodes_started: u64,
}

impl Default for EpisodeMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeMemory {
    pub fn new() -> Self {
        Self {
            prev_steps: None,
            checkpoint_rewards: [0.0; CHECKPOINT_SLOTS],
            episodes_started: 0,
        }
    }

    pub fn prev_steps(&self) -> Option<u64> {
        self.prev_steps
    }

    pub fn checkpoint_rewards(&self) -> &[f64; CHECKPOINT_SLOTS] {
        &self.checkpoint_rewards
    }

    pub fn episodes_started(&self) -> u64 {
        self.episodes_started
    }

    /// Clear per-episode state
    pub fn reset(&mut self) {
        self.prev_steps = None;
        self.checkpoint_rewards = [0.0; CHECKPOINT_SLOTS];
    }

    /// Start a new episode if `steps` is the first seen or regressed, then record it.
    ///
    /// Returns true when a new episode began. A step count that regresses is
    /// the only episode boundary signal; callers must keep `steps` monotonic
    /// within an episode.
    pub fn observe_steps(&mut self, steps: u64) -> bool {
        let boundary = match self.prev_steps {
            None => true,
            Some(prev) => steps < prev,
        };
        if boundary {
            if let Some(prev) = self.prev_steps {
                debug!(prev_steps = prev, steps, "Step count regressed, starting new episode");
            }
            self.reset();
            self.episodes_started += 1;
        }
        self.prev_steps = Some(steps);
        boundary
    }

    /// Award for a checkpoint slot, if already set this episode
    pub fn checkpoint(&self, slot: usize) -> Option<f64> {
        let value = self.checkpoint_rewards[slot.min(CHECKPOINT_SLOTS - 1)];
        (value != 0.0).then_some(value)
    }

    /// Record a checkpoint award; an already-awarded slot keeps its first value
    pub fn award_checkpoint(&mut self, slot: usize, bonus: f64) -> bool {
        let cell = &mut self.checkpoint_rewards[slot.min(CHECKPOINT_SLOTS - 1)];
        if *cell != 0.0 {
            return false;
        }
        *cell = bonus;
        true
    }
}

/// Checkpoint slot for a progress percentage, clamped into range
pub fn checkpoint_slot(progress: f64) -> usize {
    let decile = (progress / 10.0).floor();
    decile.clamp(0.0, (CHECKPOINT_SLOTS - 1) as f64) as usize
}
