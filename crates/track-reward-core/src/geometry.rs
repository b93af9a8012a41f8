//! Track direction and angular error over centerline waypoints

use crate::observation::{StepObservation, Waypoint};

/// Track direction in degrees, range (-180, 180]
///
/// Uses the segment from the `prev` closest waypoint to the waypoint
/// `lookahead` places past `next`. Indices wrap with the live waypoint count.
pub fn track_direction(waypoints: &[Waypoint], closest: [usize; 2], lookahead: usize) -> f64 {
    let n = waypoints.len();
    let prev = waypoints[closest[0] % n];
    let next = waypoints[(closest[1] + lookahead) % n];
    let deg = (next.y - prev.y).atan2(next.x - prev.x).to_degrees();
    normalize_angle(deg)
}

/// Fold an angle in degrees into (-180, 180]
pub fn normalize_angle(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Shorter angular distance between a track direction and a candidate direction, in [0, 180]
pub fn direction_error(track_direction: f64, candidate: f64) -> f64 {
    let raw = (track_direction - normalize_angle(candidate)).abs();
    if raw > 180.0 { 360.0 - raw } else { raw }
}

/// Error between the track direction and the vehicle heading
pub fn heading_error(obs: &StepObservation, lookahead: usize) -> f64 {
    let track = track_direction(&obs.waypoints, obs.closest_waypoints, lookahead);
    direction_error(track, obs.heading)
}

/// Error between the track direction and heading adjusted by steering
pub fn intended_direction_error(obs: &StepObservation, lookahead: usize) -> f64 {
    let track = track_direction(&obs.waypoints, obs.closest_waypoints, lookahead);
    direction_error(track, obs.heading + obs.steering_angle)
}
