//! Avian2D physics backend implementation.
//!
//! This module provides the physics backend for Avian2D (`avian2d`).
//! Enable with the `avian2d` feature.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::climb::{Climbable, ClimbableContact};
use crate::config::ControllerConfig;
use crate::controller::PlatformerController;
use crate::sensor::{sense_ground, GroundProbe, GroundSensor};
use crate::PlatformerSet;

/// Avian2D physics backend for the platformer controller.
///
/// Velocity is read from and written to [`LinearVelocity`]. Ground and
/// climbable detection use [`SpatialQuery`] overlap tests.
pub struct Avian2dBackend;

impl CharacterPhysicsBackend for Avian2dBackend {
    type VelocityComponent = LinearVelocity;

    fn plugin() -> impl Plugin {
        Avian2dBackendPlugin
    }

    fn velocity(component: &LinearVelocity) -> Vec2 {
        component.0
    }

    fn set_velocity(component: &mut LinearVelocity, velocity: Vec2) {
        component.0 = velocity;
    }
}

/// Gravity scale a character had before it started climbing.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct SuspendedGravity(pub f32);

/// Plugin that sets up Avian2D-specific systems for the platformer controller.
pub struct Avian2dBackendPlugin;

impl Plugin for Avian2dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SuspendedGravity>();

        app.add_systems(
            FixedUpdate,
            (avian_ground_detection, avian_climbable_detection).in_set(PlatformerSet::Sensors),
        );

        // Climbing drives vertical velocity directly; gravity would fight it.
        app.add_systems(
            FixedUpdate,
            suspend_gravity_while_climbing.after(PlatformerSet::Motion),
        );
    }
}

/// [`GroundProbe`] backed by an Avian spatial query.
///
/// Sensor colliders (triggers such as climbables) never count as ground.
struct SpatialGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    sensors: &'a Query<'w, 's, (), With<Sensor>>,
    exclude: Entity,
}

impl GroundProbe for SpatialGroundProbe<'_, '_, '_> {
    fn overlaps(&self, origin: Vec2, radius: f32, mask: u32) -> bool {
        let filter = SpatialQueryFilter::from_mask(LayerMask(mask))
            .with_excluded_entities([self.exclude]);

        self.spatial_query
            .shape_intersections(&Collider::circle(radius), origin, 0.0, &filter)
            .into_iter()
            .any(|hit| !self.sensors.contains(hit))
    }
}

fn avian_ground_detection(
    spatial_query: SpatialQuery,
    sensors: Query<(), With<Sensor>>,
    anchors: Query<&GlobalTransform>,
    mut q_controllers: Query<(
        Entity,
        &mut PlatformerController,
        &ControllerConfig,
        &GroundSensor,
    )>,
) {
    for (entity, mut controller, config, sensor) in &mut q_controllers {
        if !controller.is_active() {
            continue;
        }

        let origin =
            match sensor.origin(|anchor| anchors.get(anchor).ok().map(|t| t.translation().xy())) {
                Ok(origin) => origin,
                Err(err) => {
                    error!("platformer controller {:?} disabled: {}", entity, err);
                    controller.disable();
                    continue;
                }
            };

        let probe = SpatialGroundProbe {
            spatial_query: &spatial_query,
            sensors: &sensors,
            exclude: entity,
        };
        let grounded = sense_ground(&probe, origin, &config.sensors);
        controller.record_ground_contact(grounded);
    }
}

/// Record the climbable overlapped by each character's collider.
///
/// The climbable currently occupied wins over any other overlapped one.
fn avian_climbable_detection(
    spatial_query: SpatialQuery,
    climbables: Query<(&Climbable, &GlobalTransform)>,
    mut q_controllers: Query<(
        Entity,
        &mut PlatformerController,
        &GlobalTransform,
        &Collider,
    )>,
) {
    for (entity, mut controller, transform, collider) in &mut q_controllers {
        if !controller.is_active() {
            continue;
        }

        let filter = SpatialQueryFilter::default().with_excluded_entities([entity]);
        let hits = spatial_query.shape_intersections(
            collider,
            transform.translation().xy(),
            0.0,
            &filter,
        );

        let anchor = controller.climb.anchor;
        let contact = hits
            .iter()
            .copied()
            .filter(|hit| climbables.contains(*hit))
            .min_by_key(|hit| Some(*hit) != anchor)
            .and_then(|hit| {
                let (climbable, climbable_transform) = climbables.get(hit).ok()?;
                Some(ClimbableContact::new(
                    hit,
                    climbable,
                    climbable_transform.translation().xy(),
                ))
            });

        controller.record_climbable(contact);
    }
}

fn suspend_gravity_while_climbing(
    mut commands: Commands,
    mut q_controllers: Query<(
        Entity,
        &PlatformerController,
        &mut GravityScale,
        Option<&SuspendedGravity>,
    )>,
) {
    for (entity, controller, mut gravity, suspended) in &mut q_controllers {
        match (controller.climb.is_climbing, suspended) {
            (true, None) => {
                commands.entity(entity).insert(SuspendedGravity(gravity.0));
                gravity.0 = 0.0;
            }
            (false, Some(suspended)) => {
                gravity.0 = suspended.0;
                commands.entity(entity).remove::<SuspendedGravity>();
            }
            _ => {}
        }
    }
}
