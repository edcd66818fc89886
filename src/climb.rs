//! Ladder and rope climbing.
//!
//! While climbing, horizontal locomotion and the jump impulse are suspended:
//! horizontal velocity is held at zero and vertical velocity follows the
//! vertical input axis directly. Input-driven transitions are decided on the
//! frame tick and applied on the next physics tick, so every velocity write
//! happens at physics cadence.

use bevy::prelude::*;

use crate::animation::AnimationStateReporter;
use crate::config::ClimbingConfig;
use crate::intent::InputEdges;

/// What kind of surface a climbable is. Reported to the animator.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClimbKind {
    #[default]
    Ladder,
    Rope,
}

/// Vertical extent a climbing character is held within.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct ClimbBounds {
    pub bottom: f32,
    pub top: f32,
}

impl ClimbBounds {
    pub fn new(bottom: f32, top: f32) -> Self {
        Self {
            bottom: bottom.min(top),
            top: bottom.max(top),
        }
    }

    pub fn clamp(&self, y: f32) -> f32 {
        y.clamp(self.bottom, self.top)
    }

    /// Shift bounds by `offset` (local to world space).
    pub fn offset(&self, offset: f32) -> Self {
        Self {
            bottom: self.bottom + offset,
            top: self.top + offset,
        }
    }
}

/// A region the character can climb while overlapping it.
///
/// Bounds are relative to the climbable's own translation.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Climbable {
    pub kind: ClimbKind,
    pub bounds: Option<ClimbBounds>,
    /// Center the character on the climbable's x on entry.
    pub snap_to_x: bool,
}

impl Default for Climbable {
    fn default() -> Self {
        Self {
            kind: ClimbKind::Ladder,
            bounds: None,
            snap_to_x: true,
        }
    }
}

impl Climbable {
    pub fn ladder() -> Self {
        Self::default()
    }

    pub fn rope() -> Self {
        Self {
            kind: ClimbKind::Rope,
            ..default()
        }
    }

    pub fn with_bounds(mut self, bottom: f32, top: f32) -> Self {
        self.bounds = Some(ClimbBounds::new(bottom, top));
        self
    }

    pub fn with_snap_to_x(mut self, snap: bool) -> Self {
        self.snap_to_x = snap;
        self
    }
}

/// World-space description of the climbable the character overlaps.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct ClimbableContact {
    pub entity: Entity,
    pub kind: ClimbKind,
    pub x: f32,
    pub bounds: Option<ClimbBounds>,
    pub snap_to_x: bool,
}

impl ClimbableContact {
    /// Build a contact for `climbable` located at `translation`.
    pub fn new(entity: Entity, climbable: &Climbable, translation: Vec2) -> Self {
        Self {
            entity,
            kind: climbable.kind,
            x: translation.x,
            bounds: climbable.bounds.map(|b| b.offset(translation.y)),
            snap_to_x: climbable.snap_to_x,
        }
    }
}

/// Why a climb ended.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbExit {
    /// The character left the climbable's region.
    LeftRegion,
    /// Jump pressed while climbing.
    JumpOff,
    PushOffLeft,
    PushOffRight,
}

impl ClimbExit {
    /// Velocity the body leaves the climbable with.
    pub fn velocity(self, config: &ClimbingConfig) -> Vec2 {
        match self {
            ClimbExit::LeftRegion => Vec2::ZERO,
            ClimbExit::JumpOff => Vec2::new(0.0, config.jump_off_vertical),
            ClimbExit::PushOffLeft => {
                Vec2::new(-config.push_off_horizontal, config.push_off_vertical)
            }
            ClimbExit::PushOffRight => {
                Vec2::new(config.push_off_horizontal, config.push_off_vertical)
            }
        }
    }
}

/// A climb state change requested by input, applied on the next physics tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbTransition {
    Enter,
    Exit(ClimbExit),
}

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct ClimbState {
    pub is_climbing: bool,
    pub climb_vertical_velocity: f32,
    /// The climbable currently occupied. Not owned.
    pub anchor: Option<Entity>,
    /// The climbable currently overlapped, refreshed every physics tick.
    pub available: Option<ClimbableContact>,
    pub pending: Option<ClimbTransition>,
}

impl ClimbState {
    /// Decide a transition from this frame's input.
    pub fn evaluate_input(&self, moving_up: bool, edges: &InputEdges) -> Option<ClimbTransition> {
        if !self.is_climbing {
            return (self.available.is_some() && moving_up).then_some(ClimbTransition::Enter);
        }

        if edges.jump_down {
            Some(ClimbTransition::Exit(ClimbExit::JumpOff))
        } else if edges.left_down {
            Some(ClimbTransition::Exit(ClimbExit::PushOffLeft))
        } else if edges.right_down {
            Some(ClimbTransition::Exit(ClimbExit::PushOffRight))
        } else {
            None
        }
    }

    /// Whether the occupied climbable is no longer overlapped.
    pub fn left_region(&self) -> bool {
        self.is_climbing && self.available.map(|c| c.entity) != self.anchor
    }

    /// Start climbing the available climbable. Returns `false` if none is available.
    pub fn enter(
        &mut self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        reporter: &mut dyn AnimationStateReporter,
    ) -> bool {
        let Some(contact) = self.available else {
            return false;
        };

        self.is_climbing = true;
        self.anchor = Some(contact.entity);
        self.climb_vertical_velocity = 0.0;

        if contact.snap_to_x {
            position.x = contact.x;
        }
        *velocity = Vec2::ZERO;

        let ladder = contact.kind == ClimbKind::Ladder;
        reporter.set_climb_active(true);
        reporter.set_climb_ladder(ladder);
        reporter.set_climb_rope(!ladder);
        true
    }

    /// Stop climbing and leave with the exit's velocity.
    pub fn exit(
        &mut self,
        exit: ClimbExit,
        config: &ClimbingConfig,
        velocity: &mut Vec2,
        reporter: &mut dyn AnimationStateReporter,
    ) {
        self.is_climbing = false;
        self.anchor = None;
        self.climb_vertical_velocity = 0.0;

        *velocity = exit.velocity(config);

        reporter.set_climb_active(false);
        reporter.set_climb_ladder(false);
        reporter.set_climb_rope(false);
    }

    /// Drive climbing velocity and keep the character inside the climbable's bounds.
    pub fn drive(
        &mut self,
        vertical: f32,
        config: &ClimbingConfig,
        velocity: &mut Vec2,
        position: &mut Vec2,
        reporter: &mut dyn AnimationStateReporter,
    ) {
        self.climb_vertical_velocity = vertical * config.climb_speed;
        velocity.x = 0.0;
        velocity.y = self.climb_vertical_velocity;

        reporter.set_climb_active(vertical.abs() > config.active_threshold);

        if let Some(bounds) = self.available.and_then(|c| c.bounds) {
            position.y = bounds.clamp(position.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimatorParams;

    fn entity() -> Entity {
        World::new().spawn_empty().id()
    }

    fn contact(entity: Entity, climbable: Climbable, at: Vec2) -> ClimbableContact {
        ClimbableContact::new(entity, &climbable, at)
    }

    fn climbing_on(contact: ClimbableContact) -> ClimbState {
        ClimbState {
            is_climbing: true,
            anchor: Some(contact.entity),
            available: Some(contact),
            ..default()
        }
    }

    #[test]
    fn bounds_are_ordered_and_offset() {
        let bounds = ClimbBounds::new(5.0, -5.0).offset(10.0);
        assert_eq!(bounds.bottom, 5.0);
        assert_eq!(bounds.top, 15.0);
        assert_eq!(bounds.clamp(20.0), 15.0);
        assert_eq!(bounds.clamp(0.0), 5.0);
    }

    #[test]
    fn up_input_enters_only_when_available() {
        let mut state = ClimbState::default();
        let edges = InputEdges::default();
        assert_eq!(state.evaluate_input(true, &edges), None);

        state.available = Some(contact(entity(), Climbable::ladder(), Vec2::ZERO));
        assert_eq!(state.evaluate_input(false, &edges), None);
        assert_eq!(
            state.evaluate_input(true, &edges),
            Some(ClimbTransition::Enter)
        );
    }

    #[test]
    fn exit_inputs_while_climbing() {
        let state = climbing_on(contact(entity(), Climbable::ladder(), Vec2::ZERO));

        let jump = InputEdges {
            jump_down: true,
            left_down: true,
            ..default()
        };
        assert_eq!(
            state.evaluate_input(false, &jump),
            Some(ClimbTransition::Exit(ClimbExit::JumpOff))
        );

        let left = InputEdges {
            left_down: true,
            ..default()
        };
        assert_eq!(
            state.evaluate_input(false, &left),
            Some(ClimbTransition::Exit(ClimbExit::PushOffLeft))
        );

        let right = InputEdges {
            right_down: true,
            ..default()
        };
        assert_eq!(
            state.evaluate_input(false, &right),
            Some(ClimbTransition::Exit(ClimbExit::PushOffRight))
        );

        assert_eq!(state.evaluate_input(true, &InputEdges::default()), None);
    }

    #[test]
    fn enter_snaps_x_zeroes_velocity_and_notifies() {
        let ladder = entity();
        let mut state = ClimbState {
            available: Some(contact(ladder, Climbable::ladder(), Vec2::new(4.0, 0.0))),
            ..default()
        };
        let mut params = AnimatorParams::default();
        let mut position = Vec2::new(3.2, 1.0);
        let mut velocity = Vec2::new(5.0, -2.0);

        assert!(state.enter(&mut position, &mut velocity, &mut params));

        assert!(state.is_climbing);
        assert_eq!(state.anchor, Some(ladder));
        assert_eq!(position, Vec2::new(4.0, 1.0));
        assert_eq!(velocity, Vec2::ZERO);
        assert!(params.climb_active);
        assert!(params.climb_ladder);
        assert!(!params.climb_rope);
    }

    #[test]
    fn enter_without_snap_keeps_x() {
        let rope = Climbable::rope().with_snap_to_x(false);
        let mut state = ClimbState {
            available: Some(contact(entity(), rope, Vec2::new(4.0, 0.0))),
            ..default()
        };
        let mut params = AnimatorParams::default();
        let mut position = Vec2::new(3.2, 1.0);

        assert!(state.enter(&mut position, &mut Vec2::ZERO, &mut params));
        assert_eq!(position.x, 3.2);
        assert!(params.climb_rope);
        assert!(!params.climb_ladder);
    }

    #[test]
    fn enter_with_nothing_available_fails() {
        let mut state = ClimbState::default();
        let mut params = AnimatorParams::default();
        assert!(!state.enter(&mut Vec2::ZERO, &mut Vec2::ZERO, &mut params));
        assert!(!state.is_climbing);
    }

    #[test]
    fn push_off_applies_both_components() {
        let config = ClimbingConfig::default();
        let mut state = climbing_on(contact(entity(), Climbable::ladder(), Vec2::ZERO));
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::new(0.0, 2.0);

        state.exit(ClimbExit::PushOffLeft, &config, &mut velocity, &mut params);

        assert!(!state.is_climbing);
        assert_eq!(state.anchor, None);
        assert_eq!(velocity, Vec2::new(-6.0, 3.0));
        assert!(!params.climb_active);
        assert!(!params.climb_ladder);
    }

    #[test]
    fn jump_off_and_leaving_region_velocities() {
        let config = ClimbingConfig::default();
        assert_eq!(ClimbExit::JumpOff.velocity(&config), Vec2::new(0.0, 8.0));
        assert_eq!(ClimbExit::LeftRegion.velocity(&config), Vec2::ZERO);
        assert_eq!(ClimbExit::PushOffRight.velocity(&config), Vec2::new(6.0, 3.0));
    }

    #[test]
    fn left_region_when_anchor_no_longer_overlapped() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut state = climbing_on(contact(first, Climbable::ladder(), Vec2::ZERO));
        assert!(!state.left_region());

        state.available = None;
        assert!(state.left_region());

        state.available = Some(contact(second, Climbable::ladder(), Vec2::ZERO));
        assert!(state.left_region());
    }

    #[test]
    fn drive_sets_vertical_velocity_and_locks_horizontal() {
        let config = ClimbingConfig::default();
        let mut state = climbing_on(contact(entity(), Climbable::ladder(), Vec2::ZERO));
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::new(4.0, -9.0);
        let mut position = Vec2::ZERO;

        state.drive(-1.0, &config, &mut velocity, &mut position, &mut params);

        assert_eq!(velocity, Vec2::new(0.0, -3.0));
        assert!(params.climb_active);

        state.drive(0.0, &config, &mut velocity, &mut position, &mut params);
        assert_eq!(velocity, Vec2::ZERO);
        assert!(!params.climb_active, "released input hangs idle");
    }

    #[test]
    fn drive_clamps_to_world_bounds() {
        let config = ClimbingConfig::default();
        let ladder = Climbable::ladder().with_bounds(-2.0, 3.0);
        let mut state = climbing_on(contact(entity(), ladder, Vec2::new(0.0, 10.0)));
        let mut params = AnimatorParams::default();
        let mut position = Vec2::new(0.0, 14.0);

        state.drive(1.0, &config, &mut Vec2::ZERO, &mut position, &mut params);
        assert_eq!(position.y, 13.0);

        position.y = 5.0;
        state.drive(-1.0, &config, &mut Vec2::ZERO, &mut position, &mut params);
        assert_eq!(position.y, 8.0);
    }
}
