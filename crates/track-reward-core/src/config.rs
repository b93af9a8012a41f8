//! Reward shaping configuration
//!
//! Every threshold and weight the evaluator uses lives here, so stricter or
//! looser variants are a matter of loading a different config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RewardError};

/// Interval over `min..max`; `max` is exclusive and absent means unbounded.
/// `min` is inclusive unless `min_inclusive` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    #[serde(default)]
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default = "inclusive", skip_serializing_if = "is_inclusive")]
    pub min_inclusive: bool,
}

fn inclusive() -> bool {
    true
}

fn is_inclusive(flag: &bool) -> bool {
    *flag
}

impl Band {
    /// `[min, max)`
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            min_inclusive: true,
        }
    }

    /// `[0, max)`
    pub fn below(max: f64) -> Self {
        Self::new(0.0, Some(max))
    }

    /// `[min, ∞)`
    pub fn at_least(min: f64) -> Self {
        Self::new(min, None)
    }

    /// `(min, ∞)`
    pub fn greater_than(min: f64) -> Self {
        Self {
            min_inclusive: false,
            ..Self::new(min, None)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && self.max.is_none_or(|max| value < max)
    }
}

/// Reward granted by a matching speed rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SpeedReward {
    /// Constant reward
    Fixed(f64),
    /// Factor multiplied by speed
    Scaled(f64),
}

impl SpeedReward {
    pub fn value(&self, speed: f64) -> f64 {
        match self {
            SpeedReward::Fixed(v) => *v,
            SpeedReward::Scaled(factor) => factor * speed,
        }
    }
}

/// One row of the steering-to-speed table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRule {
    /// Range of absolute steering angle in degrees
    pub steering: Band,
    /// Acceptable speed range
    pub speed: Band,
    pub reward: SpeedReward,
}

impl SpeedRule {
    pub fn new(steering: Band, speed: Band, reward: SpeedReward) -> Self {
        Self {
            steering,
            speed,
            reward,
        }
    }

    pub fn matches(&self, abs_steering: f64, speed: f64) -> bool {
        self.steering.contains(abs_steering) && self.speed.contains(speed)
    }
}

/// Banded distance reward: `reward` when within `fraction × track_width` of center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceMarker {
    pub fraction: f64,
    pub reward: f64,
}

impl DistanceMarker {
    pub fn new(fraction: f64, reward: f64) -> Self {
        Self { fraction, reward }
    }
}

/// Reward proportional to progress per step, once past a warm-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRate {
    /// Term applies only when `steps > min_steps`
    pub min_steps: u64,
    pub factor: f64,
}

/// Reward evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Returned when gated; starting value of every total
    pub floor_reward: f64,

    /// Distance term cutoff as a fraction of track width, below 0.5
    pub distance_threshold_fraction: f64,
    pub distance_weight: f64,
    /// When non-empty, replaces the linear distance term
    pub distance_markers: Vec<DistanceMarker>,

    /// Heading error gate, degrees
    pub heading_threshold_deg: f64,
    pub heading_weight: f64,
    /// Divide the heading term by its threshold so it peaks at `weight`
    pub heading_normalized: bool,

    /// Gate on steering-adjusted heading error; disabled when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_direction_threshold_deg: Option<f64>,
    pub intended_direction_weight: f64,

    /// Waypoints past `next` used for the track direction
    pub waypoint_lookahead: usize,

    pub steering_threshold_deg: f64,
    pub steering_factor: f64,
    /// Applied to the running total when steering exceeds the threshold
    pub steering_penalty_multiplier: f64,

    /// Ordered, first match wins
    pub steering_to_speed_bands: Vec<SpeedRule>,

    pub progress_factor: f64,
    /// Expected lap time in seconds
    pub progress_time_threshold: f64,
    /// Simulation steps per second
    pub progress_step_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_rate: Option<ProgressRate>,

    /// Added on every call at or past 100% progress
    pub completion_bonus: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            floor_reward: 1e-3,
            distance_threshold_fraction: 0.45,
            distance_weight: 1.0,
            distance_markers: Vec::new(),
            heading_threshold_deg: 15.0,
            heading_weight: 1.0,
            heading_normalized: true,
            intended_direction_threshold_deg: None,
            intended_direction_weight: 1.0,
            waypoint_lookahead: 0,
            steering_threshold_deg: 15.0,
            steering_factor: 0.05,
            steering_penalty_multiplier: 0.8,
            steering_to_speed_bands: default_speed_bands(),
            progress_factor: 1.0,
            progress_time_threshold: 20.0,
            progress_step_rate: 15.0,
            progress_rate: None,
            completion_bonus: 100.0,
        }
    }
}

fn default_speed_bands() -> Vec<SpeedRule> {
    vec![
        SpeedRule::new(Band::below(7.0), Band::at_least(3.0), SpeedReward::Fixed(1.0)),
        SpeedRule::new(
            Band::new(7.0, Some(12.0)),
            Band::new(2.5, Some(3.5)),
            SpeedReward::Fixed(0.8),
        ),
        SpeedRule::new(
            Band::new(12.0, Some(18.0)),
            Band::new(2.0, Some(3.0)),
            SpeedReward::Fixed(0.6),
        ),
        SpeedRule::new(
            Band::new(18.0, Some(25.0)),
            Band::new(1.5, Some(2.5)),
            SpeedReward::Fixed(0.4),
        ),
        SpeedRule::new(
            Band::at_least(25.0),
            Band::new(1.0, Some(2.0)),
            SpeedReward::Fixed(0.2),
        ),
    ]
}

impl RewardConfig {
    /// Tighter gating: heading within 10°, steering-adjusted heading within 5°,
    /// track direction taken one waypoint further ahead
    pub fn strict() -> Self {
        Self {
            heading_threshold_deg: 10.0,
            intended_direction_threshold_deg: Some(5.0),
            waypoint_lookahead: 1,
            ..Default::default()
        }
    }

    /// Banded centerline reward with steering-dependent speed targets and a
    /// progress-per-step term; no heading or checkpoint shaping
    pub fn zigzag_mitigation() -> Self {
        Self {
            distance_markers: vec![
                DistanceMarker::new(0.1, 5.0),
                DistanceMarker::new(0.25, 1.5),
                DistanceMarker::new(0.5, 0.3),
            ],
            heading_threshold_deg: 180.0,
            heading_weight: 0.0,
            steering_threshold_deg: 180.0,
            steering_factor: 0.0,
            steering_penalty_multiplier: 1.0,
            steering_to_speed_bands: vec![
                SpeedRule::new(Band::below(5.0), Band::greater_than(3.0), SpeedReward::Fixed(5.0)),
                SpeedRule::new(Band::below(5.0), Band::greater_than(2.0), SpeedReward::Fixed(2.5)),
                SpeedRule::new(Band::greater_than(15.0), Band::below(1.8), SpeedReward::Fixed(3.0)),
                SpeedRule::new(Band::greater_than(15.0), Band::below(2.2), SpeedReward::Fixed(1.5)),
            ],
            progress_factor: 0.0,
            progress_rate: Some(ProgressRate {
                min_steps: 5,
                factor: 10.0,
            }),
            completion_bonus: 0.0,
            ..Default::default()
        }
    }

    /// Parse a config from JSON; absent keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RewardConfig = serde_json::from_str(json)
            .map_err(|e| RewardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RewardError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Reject configs the evaluator cannot score with
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("floor_reward", self.floor_reward),
            ("distance_threshold_fraction", self.distance_threshold_fraction),
            ("distance_weight", self.distance_weight),
            ("heading_threshold_deg", self.heading_threshold_deg),
            ("heading_weight", self.heading_weight),
            ("intended_direction_weight", self.intended_direction_weight),
            ("steering_threshold_deg", self.steering_threshold_deg),
            ("steering_factor", self.steering_factor),
            ("steering_penalty_multiplier", self.steering_penalty_multiplier),
            ("progress_factor", self.progress_factor),
            ("progress_time_threshold", self.progress_time_threshold),
            ("progress_step_rate", self.progress_step_rate),
            ("completion_bonus", self.completion_bonus),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(format!("{} must be finite, got {}", name, value)));
            }
        }

        if self.floor_reward <= 0.0 {
            return Err(invalid("floor_reward must be > 0".into()));
        }
        if !(self.distance_threshold_fraction > 0.0 && self.distance_threshold_fraction < 0.5) {
            return Err(invalid(format!(
                "distance_threshold_fraction must be in (0, 0.5), got {}",
                self.distance_threshold_fraction
            )));
        }
        if self.heading_threshold_deg <= 0.0 {
            return Err(invalid("heading_threshold_deg must be > 0".into()));
        }
        if let Some(t) = self.intended_direction_threshold_deg {
            if !t.is_finite() || t <= 0.0 {
                return Err(invalid(format!(
                    "intended_direction_threshold_deg must be > 0, got {}",
                    t
                )));
            }
        }
        if self.steering_threshold_deg <= 0.0 {
            return Err(invalid("steering_threshold_deg must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.steering_penalty_multiplier) {
            return Err(invalid(format!(
                "steering_penalty_multiplier must be in [0, 1], got {}",
                self.steering_penalty_multiplier
            )));
        }
        if self.progress_step_rate <= 0.0 {
            return Err(invalid("progress_step_rate must be > 0".into()));
        }
        if let Some(rate) = &self.progress_rate {
            if !rate.factor.is_finite() {
                return Err(invalid("progress_rate.factor must be finite".into()));
            }
        }

        for (i, rule) in self.steering_to_speed_bands.iter().enumerate() {
            check_band(&format!("steering_to_speed_bands[{}].steering", i), &rule.steering)?;
            check_band(&format!("steering_to_speed_bands[{}].speed", i), &rule.speed)?;
            let reward = match rule.reward {
                SpeedReward::Fixed(v) | SpeedReward::Scaled(v) => v,
            };
            if !reward.is_finite() {
                return Err(invalid(format!(
                    "steering_to_speed_bands[{}].reward must be finite",
                    i
                )));
            }
        }

        let mut last: Option<&DistanceMarker> = None;
        for (i, marker) in self.distance_markers.iter().enumerate() {
            if !marker.reward.is_finite() || !(marker.fraction > 0.0 && marker.fraction <= 0.5) {
                return Err(invalid(format!(
                    "distance_markers[{}] needs fraction in (0, 0.5] and a finite reward",
                    i
                )));
            }
            if let Some(prev) = last {
                if marker.fraction <= prev.fraction || marker.reward > prev.reward {
                    return Err(invalid(format!(
                        "distance_markers[{}] must widen the band and not raise the reward",
                        i
                    )));
                }
            }
            last = Some(marker);
        }

        Ok(())
    }
}

fn check_band(name: &str, band: &Band) -> Result<()> {
    if !band.min.is_finite() {
        return Err(invalid(format!("{}.min must be finite", name)));
    }
    if let Some(max) = band.max {
        if !max.is_finite() || max <= band.min {
            return Err(invalid(format!("{}.max must exceed min", name)));
        }
    }
    Ok(())
}

fn invalid(msg: String) -> RewardError {
    RewardError::InvalidConfig(msg)
}
