//! Horizontal locomotion.
//!
//! Converts the horizontal input axis into a target speed and approaches it
//! linearly at one of four rates (see [`WalkingConfig::rate`]).

use crate::config::WalkingConfig;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Advance horizontal velocity by one physics step.
pub fn step_horizontal(
    config: &WalkingConfig,
    input: f32,
    grounded: bool,
    velocity_x: f32,
    dt: f32,
) -> f32 {
    let target = input * config.max_speed;
    let rate = config.rate(grounded, input);
    move_toward(velocity_x, target, rate * dt)
}
