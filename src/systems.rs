//! Engine-facing systems that drive [`PlatformerController`] from Bevy schedules.

use bevy::prelude::*;

use crate::animation::AnimatorParams;
use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::controller::{ControllerDependencies, ControllerPaused, PlatformerController};
use crate::intent::MovementIntent;
use crate::jump::{JumpAdmission, WaitOutcome};
use crate::sensor::GroundSensor;

/// Teleport a character and return its controller to spawn state.
///
/// Velocity is zeroed, the jump animation wait is dropped, latched input is
/// cleared and the animator flags return to idle.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct RespawnRequest {
    pub entity: Entity,
    pub position: Vec2,
}

type RevalidationFilter<V> = Or<(
    Added<PlatformerController>,
    Changed<GroundSensor>,
    Changed<ControllerConfig>,
    Added<AnimatorParams>,
    Added<V>,
)>;

/// Check dependencies of new or changed controllers and activate them.
pub(crate) fn validate_controllers<B: CharacterPhysicsBackend>(
    mut controllers: Query<
        (
            Entity,
            &mut PlatformerController,
            &ControllerConfig,
            Option<&GroundSensor>,
            Has<AnimatorParams>,
            Has<B::VelocityComponent>,
        ),
        RevalidationFilter<B::VelocityComponent>,
    >,
    anchors: Query<(), With<GlobalTransform>>,
) {
    for (entity, mut controller, config, sensor, has_reporter, has_body) in &mut controllers {
        let deps = ControllerDependencies {
            has_physics_body: has_body,
            physics_body: B::velocity_component_name(),
            has_ground_anchor: sensor
                .and_then(GroundSensor::anchor)
                .is_some_and(|anchor| anchors.contains(anchor)),
            has_animation_reporter: has_reporter,
        };

        let was_active = controller.is_active();
        match controller.initialize(&deps, config) {
            Ok(()) if !was_active => debug!("platformer controller {:?} active", entity),
            Ok(()) => {}
            Err(errors) => {
                for err in errors {
                    error!("platformer controller {:?} disabled: {}", entity, err);
                }
            }
        }
    }
}

/// Drop the jump animation wait and pending input of controllers that were
/// just paused.
pub(crate) fn suspend_paused_controllers(
    mut controllers: Query<
        (Entity, &mut PlatformerController, &mut MovementIntent),
        Added<ControllerPaused>,
    >,
) {
    for (entity, mut controller, mut intent) in &mut controllers {
        if controller.cancel_jump_wait() {
            debug!("cancelled jump animation wait of paused {:?}", entity);
        }
        controller.discard_pending_input();
        intent.take_edges();
    }
}

/// Discard input latched while a controller was paused so it is not replayed.
pub(crate) fn resume_unpaused_controllers(
    mut resumed: RemovedComponents<ControllerPaused>,
    mut controllers: Query<
        (&mut PlatformerController, &mut MovementIntent),
        Without<ControllerPaused>,
    >,
) {
    for entity in resumed.read() {
        let Ok((mut controller, mut intent)) = controllers.get_mut(entity) else {
            continue;
        };

        if intent.take_edges().any() {
            debug!("discarded input latched while {:?} was paused", entity);
        }
        controller.discard_pending_input();
    }
}

pub(crate) fn apply_respawn_requests<B: CharacterPhysicsBackend>(
    mut requests: MessageReader<RespawnRequest>,
    mut characters: Query<(
        &mut PlatformerController,
        &mut MovementIntent,
        &mut Transform,
        Option<&mut B::VelocityComponent>,
        Option<&mut AnimatorParams>,
    )>,
) {
    for request in requests.read() {
        let Ok((mut controller, mut intent, mut transform, velocity, params)) =
            characters.get_mut(request.entity)
        else {
            warn!("respawn requested for unknown character {:?}", request.entity);
            continue;
        };

        transform.translation.x = request.position.x;
        transform.translation.y = request.position.y;
        if let Some(mut velocity) = velocity {
            B::set_velocity(&mut velocity, Vec2::ZERO);
        }
        if let Some(mut params) = params {
            *params = AnimatorParams::default();
        }
        controller.reset();
        intent.clear();
    }
}

/// Per-frame controller update.
pub(crate) fn frame_tick(
    time: Res<Time>,
    mut controllers: Query<
        (
            Entity,
            &mut PlatformerController,
            &ControllerConfig,
            &mut MovementIntent,
            &mut AnimatorParams,
        ),
        Without<ControllerPaused>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, config, mut intent, mut params) in &mut controllers {
        if !controller.is_active() {
            continue;
        }

        match controller.tick_frame(dt, &mut intent, config, &mut *params) {
            Some(WaitOutcome::TimedOut(phase)) => warn!(
                "jump animation of {:?} timed out in phase {:?}; jumping unblocked",
                entity, phase
            ),
            Some(WaitOutcome::Completed) => {
                debug!("jump animation of {:?} completed", entity)
            }
            _ => {}
        }
    }
}

/// Per-physics-step controller update. The only system writing velocity.
pub(crate) fn physics_tick<B: CharacterPhysicsBackend>(
    time: Res<Time>,
    mut controllers: Query<
        (
            Entity,
            &mut PlatformerController,
            &ControllerConfig,
            &mut B::VelocityComponent,
            &mut Transform,
            &mut AnimatorParams,
        ),
        Without<ControllerPaused>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, config, mut body, mut transform, mut params) in &mut controllers
    {
        if !controller.is_active() {
            continue;
        }

        let mut velocity = B::velocity(&body);
        let start = transform.translation.truncate();
        let mut position = start;

        let admission =
            controller.tick_physics(dt, &mut velocity, &mut position, config, &mut *params);
        if admission == Some(JumpAdmission::Fired) {
            debug!("{:?} jumped", entity);
        }

        B::set_velocity(&mut body, velocity);
        if position != start {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }
}
