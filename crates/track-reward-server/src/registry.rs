//! Registry of per-stream reward evaluators

use serde::Serialize;
use std::collections::HashMap;
use track_reward_core::{Reward, RewardConfig, RewardError, RewardEvaluator, StepObservation};

/// Identifier for one episode-stream (typically one rollout worker)
pub type StreamId = String;

/// An open stream and its running totals
#[derive(Debug)]
pub struct StreamEntry {
    evaluator: RewardEvaluator,
    steps_scored: u64,
    total_reward: f64,
}

impl StreamEntry {
    fn new(evaluator: RewardEvaluator) -> Self {
        Self {
            evaluator,
            steps_scored: 0,
            total_reward: 0.0,
        }
    }

    pub fn evaluator(&self) -> &RewardEvaluator {
        &self.evaluator
    }

    fn summary(&self, stream_id: &StreamId) -> StreamSummary {
        let memory = self.evaluator.memory();
        StreamSummary {
            stream_id: stream_id.clone(),
            steps_scored: self.steps_scored,
            total_reward: self.total_reward,
            episodes: memory.episodes_started(),
            last_steps: memory.prev_steps(),
        }
    }
}

/// Snapshot of a stream's totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSummary {
    pub stream_id: StreamId,
    pub steps_scored: u64,
    pub total_reward: f64,
    pub episodes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_steps: Option<u64>,
}

/// Open evaluators keyed by stream
pub struct EvaluatorRegistry {
    streams: HashMap<StreamId, StreamEntry>,
    max_streams: usize,
}

impl EvaluatorRegistry {
    /// Create a new registry with the given capacity
    pub fn new(max_streams: usize) -> Self {
        Self {
            streams: HashMap::new(),
            max_streams,
        }
    }

    /// Open a stream with its own evaluator.
    ///
    /// Returns false if the stream was already open; its evaluator is kept.
    pub fn open(&mut self, stream_id: StreamId, config: RewardConfig) -> Result<bool, RegistryError> {
        if self.streams.contains_key(&stream_id) {
            return Ok(false);
        }
        if self.streams.len() >= self.max_streams {
            return Err(RegistryError::CapacityExceeded(self.max_streams));
        }
        let evaluator = RewardEvaluator::new(config).map_err(RegistryError::Evaluator)?;
        self.streams.insert(stream_id, StreamEntry::new(evaluator));
        Ok(true)
    }

    /// Close a stream, returning its final totals
    pub fn close(&mut self, stream_id: &StreamId) -> Result<StreamSummary, RegistryError> {
        self.streams
            .remove(stream_id)
            .map(|entry| entry.summary(stream_id))
            .ok_or_else(|| RegistryError::NotFound(stream_id.clone()))
    }

    /// Score a step on a stream and record it
    pub fn evaluate(
        &mut self,
        stream_id: &StreamId,
        observation: &StepObservation,
    ) -> Result<Reward, RegistryError> {
        let entry = self
            .streams
            .get_mut(stream_id)
            .ok_or_else(|| RegistryError::NotFound(stream_id.clone()))?;
        let reward = entry
            .evaluator
            .evaluate_detailed(observation)
            .map_err(RegistryError::Evaluator)?;
        entry.steps_scored += 1;
        entry.total_reward += reward.value;
        Ok(reward)
    }

    /// Forget the stream's current episode
    pub fn reset(&mut self, stream_id: &StreamId) -> Result<(), RegistryError> {
        let entry = self
            .streams
            .get_mut(stream_id)
            .ok_or_else(|| RegistryError::NotFound(stream_id.clone()))?;
        entry.evaluator.reset();
        Ok(())
    }

    /// Get a stream entry
    pub fn get(&self, stream_id: &StreamId) -> Option<&StreamEntry> {
        self.streams.get(stream_id)
    }

    /// Totals for a stream
    pub fn summary(&self, stream_id: &StreamId) -> Option<StreamSummary> {
        self.streams.get(stream_id).map(|e| e.summary(stream_id))
    }

    /// All open streams, ordered by id
    pub fn list(&self) -> Vec<StreamSummary> {
        let mut streams: Vec<StreamSummary> = self
            .streams
            .iter()
            .map(|(id, entry)| entry.summary(id))
            .collect();
        streams.sort_by(|a, b| a.stream_id.cmp(&b.stream_id));
        streams
    }

    /// Number of open streams
    pub fn count(&self) -> usize {
        self.streams.len()
    }

    /// Available slots
    pub fn available_slots(&self) -> usize {
        self.max_streams.saturating_sub(self.streams.len())
    }
}

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Stream not found: {0}")]
    NotFound(StreamId),
    #[error("Maximum stream capacity exceeded ({0})")]
    CapacityExceeded(usize),
    #[error(transparent)]
    Evaluator(RewardError),
}

impl From<RegistryError> for RewardError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => RewardError::StreamNotFound(id),
            RegistryError::CapacityExceeded(max) => {
                RewardError::ResourceExhausted(format!("at most {} streams", max))
            }
            RegistryError::Evaluator(e) => e,
        }
    }
}
