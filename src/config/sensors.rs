//! Configuration for the ground sensor.

use bevy::prelude::*;

/// Configuration for the ground overlap probe.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Radius of the overlap circle around the ground anchor.
    pub ground_radius: f32,

    /// Collision layer bits that count as ground.
    pub ground_mask: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_radius: 0.2,
            ground_mask: u32::MAX,
        }
    }
}
