//! Observation types

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardError};

/// A fixed point on the track centerline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Waypoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Waypoint> for [f64; 2] {
    fn from(w: Waypoint) -> Self {
        [w.x, w.y]
    }
}

/// Vehicle and track state for one simulation step
///
/// Field names match the simulator's parameter mapping. Keys the evaluator
/// does not use are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    /// Lateral offset from the track centerline
    pub distance_from_center: f64,

    /// Full track width
    pub track_width: f64,

    /// Signed steering angle in degrees
    pub steering_angle: f64,

    /// Vehicle speed
    pub speed: f64,

    /// Step counter, monotonic within an episode
    pub steps: u64,

    /// Percentage of the track completed
    pub progress: f64,

    /// Vehicle has left the track
    pub is_offtrack: bool,

    /// Every wheel is on the track surface
    pub all_wheels_on_track: bool,

    /// Indices of the waypoints behind and ahead of the vehicle
    pub closest_waypoints: [usize; 2],

    /// Track centerline, wraps circularly
    pub waypoints: Vec<Waypoint>,

    /// Vehicle heading in degrees
    pub heading: f64,
}

impl StepObservation {
    /// Parse an observation from the simulator's parameter mapping and validate it
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let obs: StepObservation = serde_json::from_value(value)
            .map_err(|e| RewardError::InvalidObservation(e.to_string()))?;
        obs.validate()?;
        Ok(obs)
    }

    /// Parse an observation from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let obs: StepObservation = serde_json::from_str(json)
            .map_err(|e| RewardError::InvalidObservation(e.to_string()))?;
        obs.validate()?;
        Ok(obs)
    }

    /// Check the field constraints the reward terms rely on
    pub fn validate(&self) -> Result<()> {
        finite("distance_from_center", self.distance_from_center)?;
        finite("track_width", self.track_width)?;
        finite("steering_angle", self.steering_angle)?;
        finite("speed", self.speed)?;
        finite("progress", self.progress)?;
        finite("heading", self.heading)?;

        if self.distance_from_center < 0.0 {
            return Err(invalid(format!(
                "distance_from_center must be >= 0, got {}",
                self.distance_from_center
            )));
        }
        if self.track_width <= 0.0 {
            return Err(invalid(format!(
                "track_width must be > 0, got {}",
                self.track_width
            )));
        }
        if self.speed < 0.0 {
            return Err(invalid(format!("speed must be >= 0, got {}", self.speed)));
        }
        if self.steps == 0 {
            return Err(invalid("steps must be >= 1".to_string()));
        }

        let n = self.waypoints.len();
        if n < 2 {
            return Err(invalid(format!("waypoints needs at least 2 points, got {}", n)));
        }
        if let Some(i) = self
            .waypoints
            .iter()
            .position(|w| !w.x.is_finite() || !w.y.is_finite())
        {
            return Err(invalid(format!("waypoints[{}] is not finite", i)));
        }

        let [prev, next] = self.closest_waypoints;
        if prev >= n || next >= n {
            return Err(invalid(format!(
                "closest_waypoints {:?} out of range for {} waypoints",
                self.closest_waypoints, n
            )));
        }

        Ok(())
    }

    /// Absolute steering angle in degrees
    pub fn abs_steering(&self) -> f64 {
        self.steering_angle.abs()
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", field, value)))
    }
}

fn invalid(msg: String) -> RewardError {
    RewardError::InvalidObservation(msg)
}
