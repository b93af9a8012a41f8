//! Stateful per-step reward evaluator

use crate::config::RewardConfig;
use crate::error::Result;
use crate::geometry;
use crate::memory::{EpisodeMemory, checkpoint_slot};
use crate::observation::StepObservation;
use crate::reward::{Gate, Reward, RewardComponentDef, RewardFunction, component};

/// Scores simulation steps for one episode-stream
///
/// Holds [`EpisodeMemory`] across calls. A step count lower than the previous
/// one starts a new episode, so calls must arrive in step order and one
/// evaluator must not be shared between concurrent episodes.
#[derive(Debug, Clone)]
pub struct RewardEvaluator {
    config: RewardConfig,
    memory: EpisodeMemory,
}

impl Default for RewardEvaluator {
    fn default() -> Self {
        Self {
            config: RewardConfig::default(),
            memory: EpisodeMemory::new(),
        }
    }
}

/// Running total and its decomposition
struct Tally {
    total: f64,
    reward: Reward,
}

impl Tally {
    fn new(floor: f64) -> Self {
        let mut reward = Reward::default();
        reward.components.insert(component::FLOOR.to_string(), floor);
        Self {
            total: floor,
            reward,
        }
    }

    fn add(&mut self, name: &str, value: f64) {
        self.total += value;
        *self.reward.components.entry(name.to_string()).or_insert(0.0) += value;
    }

    fn scale(&mut self, name: &str, factor: f64) {
        let before = self.total;
        self.total *= factor;
        self.reward
            .components
            .insert(name.to_string(), self.total - before);
    }

    fn finish(mut self) -> Reward {
        self.reward.value = self.total;
        self.reward
    }
}

impl RewardEvaluator {
    /// Create an evaluator after validating the config
    pub fn new(config: RewardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            memory: EpisodeMemory::new(),
        })
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    pub fn memory(&self) -> &EpisodeMemory {
        &self.memory
    }

    /// Forget the current episode; the next call starts a fresh one
    pub fn reset(&mut self) {
        self.memory.reset();
    }

    /// Score one step
    pub fn evaluate(&mut self, obs: &StepObservation) -> Result<f64> {
        self.evaluate_detailed(obs).map(|r| r.value)
    }

    /// Score one step and report each term's contribution
    ///
    /// An observation that fails validation leaves the episode memory untouched.
    pub fn evaluate_detailed(&mut self, obs: &StepObservation) -> Result<Reward> {
        obs.validate()?;
        self.memory.observe_steps(obs.steps);

        let cfg = &self.config;
        let lookahead = cfg.waypoint_lookahead;
        let heading_error = geometry::heading_error(obs, lookahead);
        let intended = cfg
            .intended_direction_threshold_deg
            .map(|t| (t, geometry::intended_direction_error(obs, lookahead)));

        if let Some(gate) = self.gate(obs, heading_error, intended.map(|(_, e)| e)) {
            let mut reward = Tally::new(cfg.floor_reward).finish();
            reward.gate = Some(gate);
            return Ok(reward);
        }

        let mut tally = Tally::new(cfg.floor_reward);

        if let Some(value) = self.distance_term(obs) {
            tally.add(component::DISTANCE, value);
        }

        if cfg.heading_weight != 0.0 {
            tally.add(
                component::HEADING,
                self.direction_term(heading_error, cfg.heading_threshold_deg, cfg.heading_weight),
            );
        }
        if let Some((threshold, error)) = intended {
            if cfg.intended_direction_weight != 0.0 {
                tally.add(
                    component::INTENDED_DIRECTION,
                    self.direction_term(error, threshold, cfg.intended_direction_weight),
                );
            }
        }

        let steering = obs.abs_steering();
        if steering <= cfg.steering_threshold_deg {
            if cfg.steering_factor != 0.0 {
                tally.add(
                    component::STEERING,
                    cfg.steering_factor * (cfg.steering_threshold_deg - steering),
                );
            }
        } else if cfg.steering_penalty_multiplier != 1.0 {
            tally.scale(component::STEERING_PENALTY, cfg.steering_penalty_multiplier);
        }

        if let Some(value) = self.speed_term(obs) {
            tally.add(component::SPEED, value);
        }

        if let Some(value) = self.checkpoint_term(obs) {
            tally.add(component::CHECKPOINT, value);
        }

        if let Some(rate) = &self.config.progress_rate {
            if obs.steps > rate.min_steps {
                tally.add(
                    component::PROGRESS_RATE,
                    rate.factor * obs.progress / obs.steps as f64,
                );
            }
        }

        if obs.progress >= 100.0 && self.config.completion_bonus != 0.0 {
            tally.add(component::COMPLETION, self.config.completion_bonus);
        }

        Ok(tally.finish())
    }

    /// First safety rule the step violates; equality with a threshold passes
    fn gate(
        &self,
        obs: &StepObservation,
        heading_error: f64,
        intended_error: Option<f64>,
    ) -> Option<Gate> {
        if obs.is_offtrack {
            return Some(Gate::Offtrack);
        }
        if !obs.all_wheels_on_track {
            return Some(Gate::WheelsOffTrack);
        }
        if heading_error > self.config.heading_threshold_deg {
            return Some(Gate::HeadingError);
        }
        match (intended_error, self.config.intended_direction_threshold_deg) {
            (Some(error), Some(threshold)) if error > threshold => {
                Some(Gate::IntendedDirectionError)
            }
            _ => None,
        }
    }

    fn distance_term(&self, obs: &StepObservation) -> Option<f64> {
        let cfg = &self.config;
        let d = obs.distance_from_center;
        let width = obs.track_width;

        if !cfg.distance_markers.is_empty() {
            return cfg
                .distance_markers
                .iter()
                .find(|m| d <= m.fraction * width)
                .map(|m| m.reward);
        }

        if d <= cfg.distance_threshold_fraction * width {
            Some(cfg.distance_weight * (1.0 - 2.0 * d / width).max(0.0))
        } else {
            None
        }
    }

    fn direction_term(&self, error: f64, threshold: f64, weight: f64) -> f64 {
        let margin = (threshold - error).max(0.0);
        if self.config.heading_normalized {
            weight * margin / threshold
        } else {
            weight * margin
        }
    }

    fn speed_term(&self, obs: &StepObservation) -> Option<f64> {
        let steering = obs.abs_steering();
        self.config
            .steering_to_speed_bands
            .iter()
            .find(|rule| rule.matches(steering, obs.speed))
            .map(|rule| rule.reward.value(obs.speed))
    }

    /// Time-normalized bonus the first time a progress decile is reached, floor afterwards
    fn checkpoint_term(&mut self, obs: &StepObservation) -> Option<f64> {
        let cfg = &self.config;
        if cfg.progress_factor == 0.0 {
            return None;
        }

        let slot = checkpoint_slot(obs.progress);
        if self.memory.checkpoint(slot).is_some() {
            return Some(cfg.floor_reward);
        }

        let expected_time = obs.progress * cfg.progress_time_threshold / 100.0;
        let elapsed_time = obs.steps as f64 / cfg.progress_step_rate;
        let bonus = cfg.progress_factor * expected_time / elapsed_time;

        if bonus > 0.0 {
            self.memory.award_checkpoint(slot, bonus);
            Some(bonus)
        } else {
            Some(cfg.floor_reward)
        }
    }
}

impl RewardFunction for RewardEvaluator {
    fn score(&mut self, observation: &StepObservation) -> Result<Reward> {
        self.evaluate_detailed(observation)
    }

    fn components(&self) -> Vec<RewardComponentDef> {
        let cfg = &self.config;
        let mut defs = vec![
            RewardComponentDef::new(
                component::FLOOR,
                "Minimum reward, also returned when a safety gate fires",
                Some([cfg.floor_reward, cfg.floor_reward]),
                1.0,
            ),
            RewardComponentDef::new(
                component::DISTANCE,
                "Closeness to the track centerline",
                None,
                cfg.distance_weight,
            ),
        ];
        if cfg.heading_weight != 0.0 {
            defs.push(RewardComponentDef::new(
                component::HEADING,
                "Alignment of heading with the track direction",
                Some([0.0, cfg.heading_weight]),
                cfg.heading_weight,
            ));
        }
        if cfg.steering_factor != 0.0 {
            defs.push(RewardComponentDef::new(
                component::STEERING,
                "Small steering angles",
                Some([0.0, cfg.steering_factor * cfg.steering_threshold_deg]),
                cfg.steering_factor,
            ));
        }
        if cfg.steering_penalty_multiplier != 1.0 {
            defs.push(RewardComponentDef::new(
                component::STEERING_PENALTY,
                "Reduction applied to the running total when oversteering",
                None,
                cfg.steering_penalty_multiplier,
            ));
        }
        defs.push(RewardComponentDef::new(
            component::SPEED,
            "Speed appropriate to the current steering angle",
            None,
            1.0,
        ));
        if cfg.intended_direction_threshold_deg.is_some() && cfg.intended_direction_weight != 0.0 {
            defs.push(RewardComponentDef::new(
                component::INTENDED_DIRECTION,
                "Alignment of heading plus steering with the track direction",
                Some([0.0, cfg.intended_direction_weight]),
                cfg.intended_direction_weight,
            ));
        }
        if cfg.progress_factor != 0.0 {
            defs.push(RewardComponentDef::new(
                component::CHECKPOINT,
                "One-time bonus per progress decile, larger when reached in fewer steps",
                None,
                cfg.progress_factor,
            ));
        }
        if let Some(rate) = &cfg.progress_rate {
            defs.push(RewardComponentDef::new(
                component::PROGRESS_RATE,
                "Progress per step",
                None,
                rate.factor,
            ));
        }
        if cfg.completion_bonus != 0.0 {
            defs.push(RewardComponentDef::new(
                component::COMPLETION,
                "Lap completion",
                Some([0.0, cfg.completion_bonus]),
                cfg.completion_bonus,
            ));
        }
        defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Band, SpeedReward, SpeedRule};
    use crate::memory::CHECKPOINT_SLOTS;
    use crate::observation::Waypoint;
    use crate::observation::tests::straight_obs;

    const EPS: f64 = 1e-9;
    const FLOOR: f64 = 1e-3;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_offtrack_is_floor() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.is_offtrack = true;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.value, FLOOR);
        assert_eq!(reward.gate, Some(Gate::Offtrack));

        // Other fields do not matter
        obs.distance_from_center = 0.7;
        obs.speed = 0.0;
        obs.steps = 500;
        obs.progress = 100.0;
        assert_eq!(evaluator.evaluate(&obs).unwrap(), FLOOR);
    }

    #[test]
    fn test_wheels_off_is_floor() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.all_wheels_on_track = false;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.value, FLOOR);
        assert_eq!(reward.gate, Some(Gate::WheelsOffTrack));
        assert!(
            evaluator
                .memory()
                .checkpoint_rewards()
                .iter()
                .all(|&v| v == 0.0)
        );
    }

    #[test]
    fn test_heading_gate_threshold_is_exclusive() {
        let mut obs = straight_obs();
        obs.heading = 15.5;
        let mut evaluator = RewardEvaluator::default();
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.gate, Some(Gate::HeadingError));
        assert_eq!(reward.value, FLOOR);

        obs.heading = -15.0;
        let mut evaluator = RewardEvaluator::default();
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.gate, None);
        assert!(approx(reward.component(component::HEADING), 0.0));
    }

    #[test]
    fn test_intended_direction_gate() {
        let mut evaluator = RewardEvaluator::new(RewardConfig::strict()).unwrap();
        let mut obs = straight_obs();
        obs.steering_angle = 6.0;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.gate, Some(Gate::IntendedDirectionError));
        assert_eq!(reward.value, FLOOR);

        obs.steps += 1;
        obs.steering_angle = 2.0;
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.gate, None);
        assert!(approx(reward.component(component::INTENDED_DIRECTION), 3.0 / 5.0));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let config = RewardConfig::default();
        let mut evaluator = RewardEvaluator::new(config.clone()).unwrap();
        let obs = straight_obs();

        let distance = config.distance_weight;
        let heading = config.heading_weight;
        let steering = config.steering_factor * config.steering_threshold_deg;
        let speed = 1.0;
        let bonus = config.progress_factor * (12.0 * config.progress_time_threshold / 100.0)
            / (10.0 / config.progress_step_rate);
        let expected = config.floor_reward + distance + heading + steering + speed + bonus;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(approx(reward.value, expected), "{} != {}", reward.value, expected);
        assert!(approx(reward.component(component::CHECKPOINT), bonus));
        assert!(approx(reward.component(component::SPEED), speed));
        assert_eq!(evaluator.memory().checkpoint(1), Some(bonus));
        assert_eq!(evaluator.memory().prev_steps(), Some(10));
    }

    #[test]
    fn test_distance_reward_non_increasing() {
        let mut last = f64::INFINITY;
        for i in 0..=9 {
            let mut obs = straight_obs();
            obs.distance_from_center = i as f64 * 0.05;
            let mut evaluator = RewardEvaluator::default();
            let reward = evaluator.evaluate_detailed(&obs).unwrap();

            assert!(reward.value <= last, "d={} raised reward", obs.distance_from_center);
            assert!(reward.component(component::DISTANCE) >= 0.0);
            last = reward.value;
        }
    }

    #[test]
    fn test_distance_term_at_center_and_past_threshold() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        let centered = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(approx(centered.component(component::DISTANCE), 1.0));

        obs.steps += 1;
        obs.distance_from_center = 0.46;
        let outside = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(!outside.components.contains_key(component::DISTANCE));
    }

    #[test]
    fn test_checkpoint_rewarded_once_per_decile() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        let first = evaluator.evaluate_detailed(&obs).unwrap();

        obs.steps = 11;
        obs.progress = 14.0;
        let second = evaluator.evaluate_detailed(&obs).unwrap();

        let first_bonus = first.component(component::CHECKPOINT);
        let second_bonus = second.component(component::CHECKPOINT);
        assert!(second_bonus < first_bonus);
        assert!(approx(second_bonus, FLOOR));

        obs.steps = 30;
        obs.progress = 21.0;
        let next_decile = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(next_decile.component(component::CHECKPOINT) > FLOOR);
    }

    #[test]
    fn test_step_regression_resets_exactly_at_boundary() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.progress = 5.0;

        let mut bonuses = Vec::new();
        for steps in [1, 2, 3, 1, 2] {
            obs.steps = steps;
            let reward = evaluator.evaluate_detailed(&obs).unwrap();
            bonuses.push(reward.component(component::CHECKPOINT));
            assert_eq!(evaluator.memory().prev_steps(), Some(steps));
        }

        assert!(bonuses[0] > FLOOR);
        assert!(approx(bonuses[1], FLOOR));
        assert!(approx(bonuses[2], FLOOR));
        // Fresh episode at the 4th call awards the decile again
        assert!(approx(bonuses[3], bonuses[0]));
        assert!(approx(bonuses[4], FLOOR));
        assert_eq!(evaluator.memory().episodes_started(), 2);
    }

    #[test]
    fn test_reset_clears_memory_at_regression() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.steps = 3;
        obs.progress = 35.0;
        evaluator.evaluate(&obs).unwrap();
        assert!(evaluator.memory().checkpoint(3).is_some());

        // Regressed step with zero progress awards nothing, leaving memory clear
        obs.steps = 1;
        obs.progress = 0.0;
        evaluator.evaluate(&obs).unwrap();
        assert_eq!(
            evaluator.memory().checkpoint_rewards(),
            &[0.0; CHECKPOINT_SLOTS]
        );
        assert_eq!(evaluator.memory().prev_steps(), Some(1));
    }

    #[test]
    fn test_invalid_observation_leaves_memory_untouched() {
        let mut evaluator = RewardEvaluator::default();
        evaluator.evaluate(&straight_obs()).unwrap();
        let before = evaluator.memory().clone();

        let mut bad = straight_obs();
        bad.steps = 2;
        bad.track_width = 0.0;
        assert!(evaluator.evaluate(&bad).is_err());
        assert_eq!(evaluator.memory(), &before);

        let mut bad = straight_obs();
        bad.steps = 1;
        bad.waypoints.clear();
        assert!(evaluator.evaluate(&bad).is_err());
        assert_eq!(evaluator.memory(), &before);
    }

    #[test]
    fn test_oversteer_scales_running_total() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.steering_angle = -20.0;
        obs.speed = 2.0;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        let before_penalty = FLOOR + 1.0 + 1.0;
        assert!(approx(
            reward.component(component::STEERING_PENALTY),
            before_penalty * 0.8 - before_penalty
        ));
        assert!(!reward.components.contains_key(component::STEERING));
        // 18..25 degree band wants [1.5, 2.5)
        assert!(approx(reward.component(component::SPEED), 0.4));
    }

    #[test]
    fn test_speed_rules_first_match_wins() {
        let config = RewardConfig {
            steering_to_speed_bands: vec![
                SpeedRule::new(Band::below(10.0), Band::at_least(3.0), SpeedReward::Fixed(2.0)),
                SpeedRule::new(Band::below(10.0), Band::at_least(1.0), SpeedReward::Scaled(0.5)),
            ],
            ..Default::default()
        };
        let mut evaluator = RewardEvaluator::new(config).unwrap();
        let mut obs = straight_obs();
        obs.speed = 4.0;
        assert!(approx(
            evaluator.evaluate_detailed(&obs).unwrap().component(component::SPEED),
            2.0
        ));

        obs.steps += 1;
        obs.speed = 2.0;
        assert!(approx(
            evaluator.evaluate_detailed(&obs).unwrap().component(component::SPEED),
            1.0
        ));

        obs.steps += 1;
        obs.speed = 0.5;
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(!reward.components.contains_key(component::SPEED));
    }

    #[test]
    fn test_completion_bonus_every_call() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.steps = 150;
        obs.progress = 100.0;

        let first = evaluator.evaluate_detailed(&obs).unwrap();
        obs.steps = 151;
        let second = evaluator.evaluate_detailed(&obs).unwrap();

        assert!(approx(first.component(component::COMPLETION), 100.0));
        assert!(approx(second.component(component::COMPLETION), 100.0));
        assert!(first.component(component::CHECKPOINT) > FLOOR);
        assert!(approx(second.component(component::CHECKPOINT), FLOOR));
    }

    #[test]
    fn test_progress_overshoot_does_not_fault() {
        let mut evaluator = RewardEvaluator::default();
        let mut obs = straight_obs();
        obs.progress = 112.0;
        obs.steps = 200;
        evaluator.evaluate(&obs).unwrap();
        assert!(evaluator.memory().checkpoint(11).is_some());
    }

    #[test]
    fn test_waypoints_wrap_on_short_track() {
        let mut evaluator = RewardEvaluator::new(RewardConfig::strict()).unwrap();
        let mut obs = straight_obs();
        obs.waypoints = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(2.0, 0.0),
        ];
        obs.closest_waypoints = [1, 2];
        // Lookahead of one wraps to index 0, pointing back along -x
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert_eq!(reward.gate, Some(Gate::HeadingError));
    }

    #[test]
    fn test_unnormalized_heading_term() {
        let config = RewardConfig {
            heading_normalized: false,
            heading_weight: 0.1,
            ..Default::default()
        };
        let mut evaluator = RewardEvaluator::new(config).unwrap();
        let mut obs = straight_obs();
        obs.heading = 5.0;
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(approx(reward.component(component::HEADING), 1.0));
    }

    #[test]
    fn test_zigzag_mitigation_preset() {
        let mut evaluator = RewardEvaluator::new(RewardConfig::zigzag_mitigation()).unwrap();
        let mut obs = straight_obs();
        obs.distance_from_center = 0.05;
        obs.steering_angle = -2.0;
        obs.speed = 3.5;
        obs.progress = 20.0;
        obs.steps = 10;

        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(approx(reward.value, FLOOR + 5.0 + 5.0 + 10.0 * 20.0 / 10.0));

        // Hard turn, slow, far from center, still in warm-up
        obs.distance_from_center = 0.4;
        obs.steering_angle = 20.0;
        obs.speed = 1.5;
        obs.steps = 5;
        obs.progress = 1.0;
        let mut evaluator = RewardEvaluator::new(RewardConfig::zigzag_mitigation()).unwrap();
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(approx(reward.value, FLOOR + 0.3 + 3.0));
    }

    #[test]
    fn test_zigzag_speed_bounds_are_exclusive() {
        // (steering, speed, speed reward) at the band edges
        let cases = [
            (15.0, 1.5, 0.0),
            (-15.0, 2.0, 0.0),
            (0.0, 3.0, 2.5),
            (0.0, 2.0, 0.0),
            (15.1, 1.5, 3.0),
            (-15.1, 2.0, 1.5),
        ];

        for (steering, speed, expected) in cases {
            let mut evaluator = RewardEvaluator::new(RewardConfig::zigzag_mitigation()).unwrap();
            let mut obs = straight_obs();
            obs.distance_from_center = 0.05;
            obs.steering_angle = steering;
            obs.speed = speed;
            obs.steps = 10;
            obs.progress = 20.0;

            let reward = evaluator.evaluate_detailed(&obs).unwrap();
            assert!(
                approx(reward.value, FLOOR + 5.0 + expected + 20.0),
                "steering {} speed {}: got {}",
                steering,
                speed,
                reward.value
            );
            assert_eq!(reward.components.contains_key(component::SPEED), expected != 0.0);
        }
    }

    #[test]
    fn test_disabled_terms_are_not_reported() {
        let mut evaluator = RewardEvaluator::new(RewardConfig::zigzag_mitigation()).unwrap();
        let mut obs = straight_obs();
        obs.steering_angle = 3.0;
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(!reward.components.contains_key(component::HEADING));
        assert!(!reward.components.contains_key(component::STEERING));

        obs.steering_angle = 25.0;
        obs.steps += 1;
        let reward = evaluator.evaluate_detailed(&obs).unwrap();
        assert!(!reward.components.contains_key(component::STEERING_PENALTY));

        let names: Vec<String> = evaluator.components().into_iter().map(|d| d.name).collect();
        assert!(!names.contains(&component::HEADING.to_string()));
        assert!(!names.contains(&component::STEERING.to_string()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RewardConfig {
            floor_reward: -1.0,
            ..Default::default()
        };
        assert!(RewardEvaluator::new(config).is_err());
    }

    #[test]
    fn test_components_track_config() {
        let evaluator = RewardEvaluator::new(RewardConfig::strict()).unwrap();
        let names: Vec<String> = evaluator.components().into_iter().map(|d| d.name).collect();
        assert!(names.contains(&component::INTENDED_DIRECTION.to_string()));
        assert!(names.contains(&component::COMPLETION.to_string()));

        let evaluator = RewardEvaluator::new(RewardConfig::zigzag_mitigation()).unwrap();
        let names: Vec<String> = evaluator.components().into_iter().map(|d| d.name).collect();
        assert!(names.contains(&component::PROGRESS_RATE.to_string()));
        assert!(!names.contains(&component::CHECKPOINT.to_string()));
    }
}
