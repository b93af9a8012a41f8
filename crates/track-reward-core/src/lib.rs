//! # track-reward-core
//!
//! Per-step reward shaping for a vehicle driving around a track.
//!
//! This crate provides:
//! - Step observations as supplied by the simulator
//! - Track direction geometry over centerline waypoints
//! - Reward configuration with presets
//! - Per-episode checkpoint memory
//! - The stateful reward evaluator

pub mod config;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod memory;
pub mod observation;
pub mod reward;

pub use config::{Band, DistanceMarker, ProgressRate, RewardConfig, SpeedReward, SpeedRule};
pub use error::{Result, RewardError, error_codes};
pub use evaluator::RewardEvaluator;
pub use memory::{CHECKPOINT_SLOTS, EpisodeMemory};
pub use observation::{StepObservation, Waypoint};
pub use reward::{Gate, Reward, RewardComponentDef, RewardComponents, RewardFunction};
