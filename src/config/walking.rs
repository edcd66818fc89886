//! Configuration for horizontal locomotion.

use bevy::prelude::*;

/// Configuration for horizontal movement.
///
/// The four rates are independent: grounded movement is tuned to feel snappier
/// than airborne movement, so each pair (grounded/airborne × accelerating/decelerating)
/// has its own constant.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct WalkingConfig {
    /// Maximum horizontal movement speed (units/second).
    pub max_speed: f32,

    /// Rate used when grounded and input is held (units/second^2).
    pub land_acceleration: f32,

    /// Rate used when grounded and input is released (units/second^2).
    pub land_deceleration: f32,

    /// Rate used when airborne and input is held (units/second^2).
    pub air_acceleration: f32,

    /// Rate used when airborne and input is released (units/second^2).
    pub air_deceleration: f32,

    /// Input magnitude at or below which the character is considered decelerating.
    pub input_deadzone: f32,

    /// Input magnitude above which the walking animation flag is raised.
    pub walk_animation_threshold: f32,
}

impl Default for WalkingConfig {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            land_acceleration: 40.0,
            land_deceleration: 50.0,
            air_acceleration: 20.0,
            air_deceleration: 30.0,
            input_deadzone: 0.01,
            walk_animation_threshold: 0.1,
        }
    }
}

impl WalkingConfig {
    /// Select the approach rate for the given grounded state and input.
    pub fn rate(&self, grounded: bool, input: f32) -> f32 {
        let accelerating = input.abs() > self.input_deadzone;
        match (grounded, accelerating) {
            (true, true) => self.land_acceleration,
            (true, false) => self.land_deceleration,
            (false, true) => self.air_acceleration,
            (false, false) => self.air_deceleration,
        }
    }
}
