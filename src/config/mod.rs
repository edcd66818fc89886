//! Controller configuration components.
//!
//! Tuning values are grouped by concern and aggregated into [`ControllerConfig`],
//! which is attached to every controlled entity next to the
//! [`PlatformerController`](crate::controller::PlatformerController).

use bevy::prelude::*;

use crate::error::ConfigError;

mod climbing;
mod jumping;
mod sensors;
mod walking;

pub use climbing::ClimbingConfig;
pub use jumping::JumpingConfig;
pub use sensors::SensorConfig;
pub use walking::WalkingConfig;

/// Complete tuning for one controlled character.
///
/// # Example
///
/// ```rust
/// use platformer_controller::prelude::*;
///
/// let config = ControllerConfig::default()
///     .with_max_speed(10.0)
///     .with_jump_power(14.0)
///     .with_coyote_time(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct ControllerConfig {
    pub walking: WalkingConfig,
    pub jumping: JumpingConfig,
    pub sensors: SensorConfig,
    pub climbing: ClimbingConfig,
}

impl ControllerConfig {
    /// Set the maximum horizontal speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.walking.max_speed = max_speed;
        self
    }

    /// Set grounded acceleration and deceleration rates.
    pub fn with_land_rates(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.walking.land_acceleration = acceleration;
        self.walking.land_deceleration = deceleration;
        self
    }

    /// Set airborne acceleration and deceleration rates.
    pub fn with_air_rates(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.walking.air_acceleration = acceleration;
        self.walking.air_deceleration = deceleration;
        self
    }

    /// Set the jump velocity.
    pub fn with_jump_power(mut self, power: f32) -> Self {
        self.jumping.power = power;
        self
    }

    /// Set the coyote time duration.
    pub fn with_coyote_time(mut self, time: f32) -> Self {
        self.jumping.coyote_time = time;
        self
    }

    /// Set the jump buffer duration.
    pub fn with_jump_buffer_time(mut self, time: f32) -> Self {
        self.jumping.buffer_time = time;
        self
    }

    /// Set the per-phase timeout of the jump animation wait.
    pub fn with_animation_timeout(mut self, timeout: f32) -> Self {
        self.jumping.animation_timeout = timeout;
        self
    }

    /// Set the ground probe radius and layer mask.
    pub fn with_ground_probe(mut self, radius: f32, mask: u32) -> Self {
        self.sensors.ground_radius = radius;
        self.sensors.ground_mask = mask;
        self
    }

    /// Set the climbing speed.
    pub fn with_climb_speed(mut self, speed: f32) -> Self {
        self.climbing.climb_speed = speed;
        self
    }

    /// Check that every rate, duration and radius is usable.
    ///
    /// Returns the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("walking.max_speed", self.walking.max_speed),
            ("walking.land_acceleration", self.walking.land_acceleration),
            ("walking.land_deceleration", self.walking.land_deceleration),
            ("walking.air_acceleration", self.walking.air_acceleration),
            ("walking.air_deceleration", self.walking.air_deceleration),
            ("walking.input_deadzone", self.walking.input_deadzone),
            ("jumping.coyote_time", self.jumping.coyote_time),
            ("jumping.buffer_time", self.jumping.buffer_time),
            ("jumping.release_velocity_factor", self.jumping.release_velocity_factor),
            ("climbing.climb_speed", self.climbing.climb_speed),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        let positive = [
            ("jumping.animation_timeout", self.jumping.animation_timeout),
            ("sensors.ground_radius", self.sensors.ground_radius),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}
