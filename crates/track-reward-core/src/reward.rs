//! Reward value, decomposition, and the scoring trait

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::observation::StepObservation;

/// Scalar reward with its decomposition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reward {
    /// Total scalar reward
    pub value: f64,
    /// Contribution of each term that fired
    #[serde(default)]
    pub components: RewardComponents,
    /// Safety rule that forced the floor reward, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Gate>,
}

/// Safety rule that short-circuits scoring to the floor reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Offtrack,
    WheelsOffTrack,
    HeadingError,
    IntendedDirectionError,
}

/// Decomposed reward components
pub type RewardComponents = HashMap<String, f64>;

impl Reward {
    /// Contribution of a named component, 0 if it did not fire
    pub fn component(&self, name: &str) -> f64 {
        self.components.get(name).copied().unwrap_or(0.0)
    }
}

/// Component names reported in [`Reward::components`]
pub mod component {
    pub const FLOOR: &str = "floor";
    pub const DISTANCE: &str = "distance";
    pub const HEADING: &str = "heading";
    pub const INTENDED_DIRECTION: &str = "intended_direction";
    pub const STEERING: &str = "steering";
    /// Change in total caused by the oversteer multiplier (non-positive)
    pub const STEERING_PENALTY: &str = "steering_penalty";
    pub const SPEED: &str = "speed";
    pub const CHECKPOINT: &str = "checkpoint";
    pub const PROGRESS_RATE: &str = "progress_rate";
    pub const COMPLETION: &str = "completion";
}

/// Definition of a reward component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardComponentDef {
    /// Component name
    pub name: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Default weight
    #[serde(default = "default_weight")]
    pub default_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl RewardComponentDef {
    pub fn new(name: &str, description: &str, range: Option<[f64; 2]>, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            range,
            default_weight: weight,
        }
    }
}

/// Stateful per-step scorer
pub trait RewardFunction: Send {
    /// Score one step, updating episode state
    fn score(&mut self, observation: &StepObservation) -> Result<Reward>;

    /// List available reward components
    fn components(&self) -> Vec<RewardComponentDef>;
}
