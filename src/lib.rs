//! # platformer_controller
//!
//! A 2D platformer movement and jump controller for Bevy.
//!
//! The controller resolves horizontal acceleration, ground detection, coyote
//! time, jump buffering, variable jump height and ladder/rope climbing, and
//! keeps the physical jump in lockstep with the jump animation through an
//! [`AnimationStateReporter`](animation::AnimationStateReporter).
//!
//! Work is split over two cadences:
//!
//! - **Frame tick** (`Update`): input edges are consumed, the jump buffer is
//!   armed, animation flags are updated and the jump animation is followed.
//! - **Physics tick** (`FixedUpdate`): ground is sensed, jumps are admitted and
//!   horizontal velocity is stepped. Velocity is written only here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use avian2d::prelude::*;
//! use platformer_controller::prelude::*;
//! use platformer_controller::avian::Avian2dBackend;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PhysicsPlugins::default())
//!         .add_plugins(PlatformerControllerPlugin::<Avian2dBackend>::default())
//!         .add_plugins(PlatformerKeyboardPlugin)
//!         .add_systems(Startup, spawn_player)
//!         .run();
//! }
//!
//! fn spawn_player(mut commands: Commands) {
//!     let feet = commands.spawn(Transform::from_xyz(0.0, -0.5, 0.0)).id();
//!     commands
//!         .spawn((
//!             Transform::from_xyz(0.0, 2.0, 0.0),
//!             RigidBody::Dynamic,
//!             Collider::capsule(0.25, 0.5),
//!             LockedAxes::ROTATION_LOCKED,
//!             GravityScale(1.0),
//!             PlatformerController::new(),
//!             ControllerConfig::default(),
//!             GroundSensor::new(feet),
//!             AnimatorParams::default(),
//!             KeyboardControlled,
//!         ))
//!         .add_child(feet);
//! }
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod animation;
pub mod backend;
pub mod climb;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod intent;
pub mod jump;
pub mod locomotion;
pub mod motion;
pub mod sensor;
mod systems;

#[cfg(feature = "avian2d")]
pub mod avian;

pub use systems::RespawnRequest;

/// Commonly used types.
pub mod prelude {
    pub use crate::animation::{AnimationStateReporter, AnimatorParams};
    pub use crate::backend::CharacterPhysicsBackend;
    pub use crate::climb::{ClimbKind, ClimbState, Climbable, ClimbableContact};
    pub use crate::config::{
        ClimbingConfig, ControllerConfig, JumpingConfig, SensorConfig, WalkingConfig,
    };
    pub use crate::controller::{
        ControllerDependencies, ControllerPaused, ControllerStatus, PlatformerController,
    };
    pub use crate::error::ConfigError;
    pub use crate::input::{KeyBindings, KeyboardControlled, PlatformerKeyboardPlugin};
    pub use crate::intent::{InputEdges, MovementIntent};
    pub use crate::jump::{JumpAdmission, JumpAnimationWait, WaitOutcome, WaitPhase};
    pub use crate::motion::{Facing, MotionState};
    pub use crate::sensor::{GroundProbe, GroundSensor};
    pub use crate::{PlatformerControllerPlugin, PlatformerSet, RespawnRequest};
}

/// System sets for the platformer controller.
///
/// `Validation` runs in `PreUpdate`; `Input` then `FrameTick` in `Update`;
/// `Sensors` then `Motion` in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformerSet {
    /// Dependency checks of new or changed controllers.
    Validation,
    /// Input sources write [`MovementIntent`](intent::MovementIntent).
    Input,
    /// Per-frame controller update.
    FrameTick,
    /// Backend ground and climbable detection.
    Sensors,
    /// Per-physics-step controller update.
    Motion,
}

/// Main plugin for the platformer controller.
///
/// Generic over the physics backend `B`.
pub struct PlatformerControllerPlugin<B: backend::CharacterPhysicsBackend> {
    _marker: PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend> Default for PlatformerControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend> Plugin for PlatformerControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<controller::PlatformerController>()
            .register_type::<controller::ControllerPaused>()
            .register_type::<config::ControllerConfig>()
            .register_type::<intent::MovementIntent>()
            .register_type::<sensor::GroundSensor>()
            .register_type::<animation::AnimatorParams>()
            .register_type::<climb::Climbable>();

        app.add_message::<RespawnRequest>();

        app.configure_sets(
            Update,
            (PlatformerSet::Input, PlatformerSet::FrameTick).chain(),
        );
        app.configure_sets(
            FixedUpdate,
            (PlatformerSet::Sensors, PlatformerSet::Motion).chain(),
        );

        app.add_systems(
            PreUpdate,
            systems::validate_controllers::<B>.in_set(PlatformerSet::Validation),
        );

        app.add_systems(
            Update,
            (
                systems::suspend_paused_controllers,
                systems::resume_unpaused_controllers,
                systems::apply_respawn_requests::<B>,
                systems::frame_tick,
            )
                .chain()
                .in_set(PlatformerSet::FrameTick),
        );

        app.add_systems(
            FixedUpdate,
            systems::physics_tick::<B>.in_set(PlatformerSet::Motion),
        );

        app.add_plugins(B::plugin());
    }
}
