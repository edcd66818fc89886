//! Configuration for ladder and rope climbing.

use bevy::prelude::*;

/// Configuration for the climbing sub-mode.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct ClimbingConfig {
    /// Vertical speed at full vertical input (units/second).
    pub climb_speed: f32,

    /// Horizontal exit speed when pushing off sideways.
    pub push_off_horizontal: f32,

    /// Vertical exit speed when pushing off sideways.
    pub push_off_vertical: f32,

    /// Vertical exit speed when jumping off.
    pub jump_off_vertical: f32,

    /// Vertical input magnitude above which the climb animation is active.
    /// Below it the character hangs idle.
    pub active_threshold: f32,
}

impl Default for ClimbingConfig {
    fn default() -> Self {
        Self {
            climb_speed: 3.0,
            push_off_horizontal: 6.0,
            push_off_vertical: 3.0,
            jump_off_vertical: 8.0,
            active_threshold: 0.1,
        }
    }
}
