//! Ground sensing.
//!
//! Grounded state comes from a single circle overlap test around an anchor
//! point (usually a child entity placed at the character's feet). The
//! physics backend supplies the overlap query through [`GroundProbe`]; the
//! result is evaluated once per physics tick and cached on the controller.

use bevy::prelude::*;

use crate::config::SensorConfig;
use crate::error::ConfigError;

/// Circle overlap query against world colliders.
pub trait GroundProbe {
    /// Whether any collider on a layer in `mask` overlaps the circle.
    fn overlaps(&self, origin: Vec2, radius: f32, mask: u32) -> bool;
}

/// Anchor of the ground probe.
///
/// The anchor is a separate entity whose global translation is the probe
/// origin. A sensor without an anchor is a configuration error: the
/// controller refuses to run instead of reporting "never grounded".
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct GroundSensor {
    anchor: Option<Entity>,
}

impl GroundSensor {
    /// Create a sensor anchored at `anchor`.
    pub fn new(anchor: Entity) -> Self {
        Self {
            anchor: Some(anchor),
        }
    }

    /// Create a sensor with no anchor yet.
    pub fn unanchored() -> Self {
        Self::default()
    }

    /// The anchor entity, if configured.
    pub fn anchor(&self) -> Option<Entity> {
        self.anchor
    }

    /// Assign the anchor entity.
    ///
    /// A controller disabled for a missing anchor is validated again after this.
    pub fn set_anchor(&mut self, anchor: Entity) {
        self.anchor = Some(anchor);
    }

    /// Resolve the probe origin through `lookup`.
    pub fn origin(&self, lookup: impl FnOnce(Entity) -> Option<Vec2>) -> Result<Vec2, ConfigError> {
        self.anchor
            .and_then(lookup)
            .ok_or(ConfigError::MissingGroundAnchor)
    }
}

/// Evaluate the ground probe at `origin` with the configured radius and mask.
pub fn sense_ground(probe: &impl GroundProbe, origin: Vec2, config: &SensorConfig) -> bool {
    probe.overlaps(origin, config.ground_radius, config.ground_mask)
}
