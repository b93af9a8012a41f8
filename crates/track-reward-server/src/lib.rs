//! # track-reward-server
//!
//! JSON-RPC scoring service for track reward evaluation.
//!
//! This crate provides:
//! - A registry holding one independent evaluator per episode-stream
//! - JSON-RPC message types and method handlers
//! - A newline-delimited stdio transport
//! - Offline replay of recorded observation logs

pub mod methods;
pub mod registry;
pub mod replay;
pub mod rpc;
pub mod transport;

pub use registry::{EvaluatorRegistry, StreamId, StreamSummary};
pub use replay::{ReplaySummary, replay};

use std::sync::Arc;
use tokio::sync::RwLock;
use track_reward_core::{Result, RewardConfig};

/// Default number of concurrently open streams
pub const DEFAULT_MAX_STREAMS: usize = 64;

/// Scoring server
pub struct RewardServer {
    /// Open evaluators
    registry: Arc<RwLock<EvaluatorRegistry>>,
    /// Config for streams opened without one
    default_config: RewardConfig,
}

impl RewardServer {
    /// Create a server after validating the default config
    pub fn new(default_config: RewardConfig, max_streams: usize) -> Result<Self> {
        default_config.validate()?;
        Ok(Self {
            registry: Arc::new(RwLock::new(EvaluatorRegistry::new(max_streams))),
            default_config,
        })
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(self).await
    }

    /// Config applied to streams opened without one
    pub fn default_config(&self) -> &RewardConfig {
        &self.default_config
    }

    /// Handle to the stream registry
    pub fn registry(&self) -> Arc<RwLock<EvaluatorRegistry>> {
        self.registry.clone()
    }
}
