//! The platformer controller component.
//!
//! [`PlatformerController`] owns all per-character motion state and exposes
//! two ticks:
//!
//! - [`tick_frame`](PlatformerController::tick_frame) runs once per rendered
//!   frame. It consumes input edges, arms the jump buffer, updates facing and
//!   the walking/idle flags, decides climb transitions and polls the jump
//!   animation wait.
//! - [`tick_physics`](PlatformerController::tick_physics) runs once per fixed
//!   physics step. It is the only place velocity is written.
//!
//! Ground contact and the overlapped climbable are recorded by the physics
//! backend at the start of each physics step, before `tick_physics`.

use bevy::prelude::*;

use crate::animation::AnimationStateReporter;
use crate::climb::{ClimbExit, ClimbState, ClimbTransition, ClimbableContact};
use crate::config::ControllerConfig;
use crate::error::ConfigError;
use crate::intent::MovementIntent;
use crate::jump::{JumpAdmission, JumpAnimationWait, WaitOutcome};
use crate::locomotion::step_horizontal;
use crate::motion::MotionState;

/// Lifecycle of a controller.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerStatus {
    /// Dependencies not checked yet. Ticks are no-ops.
    #[default]
    Uninitialized,
    Active,
    /// A dependency was missing. Ticks are no-ops until initialized again.
    Disabled,
}

/// Dependencies resolved by the host before initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerDependencies {
    pub has_physics_body: bool,
    /// Name of the component the backend expects as physics body.
    pub physics_body: &'static str,
    pub has_ground_anchor: bool,
    pub has_animation_reporter: bool,
}

/// Marker for a character whose controller is suspended.
///
/// Paused controllers are skipped by both ticks. Pausing cancels a pending
/// jump animation wait; input latched before or during the pause is discarded
/// rather than replayed on resume.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct ControllerPaused;

/// 2D platformer movement controller.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use platformer_controller::prelude::*;
///
/// let config = ControllerConfig::default();
/// let mut controller = PlatformerController::new();
/// let mut params = AnimatorParams::default();
/// let mut intent = MovementIntent::new();
///
/// controller
///     .initialize(
///         &ControllerDependencies {
///             has_physics_body: true,
///             physics_body: "Velocity",
///             has_ground_anchor: true,
///             has_animation_reporter: true,
///         },
///         &config,
///     )
///     .unwrap();
///
/// intent.set_walk(1.0);
/// controller.tick_frame(1.0 / 60.0, &mut intent, &config, &mut params);
///
/// controller.record_ground_contact(true);
/// let mut velocity = Vec2::ZERO;
/// let mut position = Vec2::ZERO;
/// controller.tick_physics(0.02, &mut velocity, &mut position, &config, &mut params);
/// assert!((velocity.x - 0.8).abs() < 1e-5);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
#[require(MovementIntent, ControllerConfig)]
pub struct PlatformerController {
    pub motion: MotionState,
    pub climb: ClimbState,
    jump_wait: Option<JumpAnimationWait>,
    status: ControllerStatus,
}

impl PlatformerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ControllerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ControllerStatus::Active
    }

    /// The pending jump animation wait, if a jump is in flight.
    pub fn jump_wait(&self) -> Option<&JumpAnimationWait> {
        self.jump_wait.as_ref()
    }

    /// Check dependencies and tuning, then activate.
    ///
    /// Every problem found is returned. On error the controller is disabled.
    pub fn initialize(
        &mut self,
        deps: &ControllerDependencies,
        config: &ControllerConfig,
    ) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if !deps.has_physics_body {
            errors.push(ConfigError::MissingPhysicsBody {
                component: deps.physics_body,
            });
        }
        if !deps.has_ground_anchor {
            errors.push(ConfigError::MissingGroundAnchor);
        }
        if !deps.has_animation_reporter {
            errors.push(ConfigError::MissingAnimationReporter);
        }
        if let Err(err) = config.validate() {
            errors.push(err);
        }

        if errors.is_empty() {
            self.status = ControllerStatus::Active;
            Ok(())
        } else {
            self.disable();
            Err(errors)
        }
    }

    /// Stop running. Any pending jump animation wait is cancelled.
    pub fn disable(&mut self) {
        self.cancel_jump_wait();
        self.status = ControllerStatus::Disabled;
    }

    /// Store the ground sensor result for the current physics step.
    pub fn record_ground_contact(&mut self, grounded: bool) {
        self.motion.is_grounded = grounded;
    }

    /// Store the climbable overlapped during the current physics step.
    pub fn record_climbable(&mut self, contact: Option<ClimbableContact>) {
        self.climb.available = contact;
    }

    /// Drop the pending jump animation wait. Returns whether one was pending.
    ///
    /// The in-flight flag is cleared too, so the next admissible jump fires.
    pub fn cancel_jump_wait(&mut self) -> bool {
        if self.jump_wait.take().is_none() {
            return false;
        }
        self.motion.waiting_for_jump_animation = false;
        true
    }

    /// Forget input that was latched but not yet acted on: a buffered jump,
    /// a pending release cut and a pending climb transition.
    pub fn discard_pending_input(&mut self) {
        self.motion.jump_buffer_timer = 0.0;
        self.motion.jump_release_pending = false;
        self.climb.pending = None;
    }

    /// Signal from the animation that the jump has finished.
    ///
    /// Ends the wait early. Returns `false` if no jump was in flight.
    pub fn finish_jump_from_animation_event(&mut self) -> bool {
        if !self.motion.waiting_for_jump_animation {
            return false;
        }
        self.jump_wait = None;
        self.motion.waiting_for_jump_animation = false;
        true
    }

    /// Return to spawn state, keeping the lifecycle status.
    pub fn reset(&mut self) {
        self.motion.reset();
        self.climb = ClimbState::default();
        self.jump_wait = None;
    }

    /// Per-frame update.
    ///
    /// Returns the outcome of polling the jump animation wait, if one is pending.
    pub fn tick_frame(
        &mut self,
        dt: f32,
        intent: &mut MovementIntent,
        config: &ControllerConfig,
        reporter: &mut dyn AnimationStateReporter,
    ) -> Option<WaitOutcome> {
        if !self.is_active() {
            return None;
        }

        let edges = intent.take_edges();
        self.motion.horizontal_input = intent.walk;
        self.motion.vertical_input = intent.vertical;
        self.motion.facing = self.motion.facing.with_input(intent.walk);

        if self.climb.pending.is_none() {
            self.climb.pending = self.climb.evaluate_input(intent.is_moving_up(), &edges);
        }

        // A jump press while climbing is the climb exit, not a buffered jump.
        let arm_buffer = edges.jump_down && !self.climb.is_climbing;
        self.motion
            .update_jump_buffer(arm_buffer, &config.jumping, dt);

        if edges.jump_up {
            self.motion.jump_release_pending = true;
        }

        if self.motion.is_grounded && !self.climb.is_climbing {
            let walking = intent.walk.abs() > config.walking.walk_animation_threshold;
            reporter.set_walking(walking);
            reporter.set_idle(!walking);
        }

        self.poll_jump_wait(reporter, dt)
    }

    fn poll_jump_wait(
        &mut self,
        reporter: &dyn AnimationStateReporter,
        dt: f32,
    ) -> Option<WaitOutcome> {
        let wait = self.jump_wait.as_mut()?;
        let outcome = wait.poll(reporter, dt);
        if outcome.is_finished() {
            self.jump_wait = None;
            self.motion.waiting_for_jump_animation = false;
        }
        Some(outcome)
    }

    /// Per-physics-step update.
    ///
    /// `velocity` is the body's linear velocity and `position` its world
    /// position; climbing may snap or clamp the latter. Returns the jump
    /// admission result, or `None` while inactive or climbing.
    pub fn tick_physics(
        &mut self,
        dt: f32,
        velocity: &mut Vec2,
        position: &mut Vec2,
        config: &ControllerConfig,
        reporter: &mut dyn AnimationStateReporter,
    ) -> Option<JumpAdmission> {
        if !self.is_active() {
            return None;
        }

        let grounded = self.motion.is_grounded;
        self.motion
            .update_coyote_timer(grounded, &config.jumping, dt);

        match self.climb.pending.take() {
            Some(ClimbTransition::Enter) => {
                self.climb.enter(position, velocity, reporter);
            }
            Some(ClimbTransition::Exit(exit)) => {
                self.climb.exit(exit, &config.climbing, velocity, reporter);
            }
            None => {}
        }

        if self.climb.left_region() {
            self.climb
                .exit(ClimbExit::LeftRegion, &config.climbing, velocity, reporter);
        }

        if self.climb.is_climbing {
            self.climb.drive(
                self.motion.vertical_input,
                &config.climbing,
                velocity,
                position,
                reporter,
            );
            self.motion.jump_release_pending = false;
            return None;
        }

        let admission = self
            .motion
            .try_admit_jump(velocity, &config.jumping, reporter);
        if admission == JumpAdmission::Fired {
            self.jump_wait = Some(JumpAnimationWait::new(config.jumping.animation_timeout));
        }

        self.motion.apply_jump_release(velocity, &config.jumping);

        velocity.x = step_horizontal(
            &config.walking,
            self.motion.horizontal_input,
            grounded,
            velocity.x,
            dt,
        );

        Some(admission)
    }
}
