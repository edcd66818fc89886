//! Configuration for core jump mechanics.

use bevy::prelude::*;

/// Configuration for core jump mechanics.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct JumpingConfig {
    /// Vertical velocity written to the body when a jump is admitted.
    pub power: f32,

    /// Coyote time duration in seconds.
    pub coyote_time: f32,

    /// Jump buffer duration in seconds.
    pub buffer_time: f32,

    /// Factor applied to upward velocity when the jump button is released early.
    pub release_velocity_factor: f32,

    /// Maximum time (seconds) each phase of the jump animation wait may take
    /// before the in-flight jump is released anyway.
    pub animation_timeout: f32,
}

impl Default for JumpingConfig {
    fn default() -> Self {
        Self {
            power: 12.0,
            coyote_time: 0.2,
            buffer_time: 0.2,
            release_velocity_factor: 0.5,
            animation_timeout: 2.0,
        }
    }
}
