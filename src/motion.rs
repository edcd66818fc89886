//! Per-character motion state.

use bevy::prelude::*;

/// Direction the character sprite faces.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing after horizontal input `input`; zero input keeps the current facing.
    pub fn with_input(self, input: f32) -> Self {
        if input > 0.0 {
            Facing::Right
        } else if input < 0.0 {
            Facing::Left
        } else {
            self
        }
    }

    pub fn is_left(self) -> bool {
        self == Facing::Left
    }
}

/// Transient movement and jump state of one character.
///
/// Nothing here is persisted; every field returns to its default on
/// respawn. Velocity is not stored here: it belongs to the physics body and
/// is passed to the ticks by mutable reference.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    /// Horizontal input axis sampled this frame, in [-1, 1].
    pub horizontal_input: f32,
    /// Vertical input axis sampled this frame, in [-1, 1].
    pub vertical_input: f32,
    /// Ground sensor result of the latest physics tick.
    pub is_grounded: bool,
    /// Remaining coyote time. Never negative.
    pub coyote_timer: f32,
    /// Remaining jump buffer time. Never negative.
    pub jump_buffer_timer: f32,
    /// A jump has been admitted and its animation has not finished yet.
    pub waiting_for_jump_animation: bool,
    /// Jump release edge seen by the frame tick, not yet applied by a physics tick.
    pub jump_release_pending: bool,
    pub facing: Facing,
}

impl MotionState {
    /// Whether a jump is currently in flight.
    pub fn is_jump_in_flight(&self) -> bool {
        self.waiting_for_jump_animation
    }

    /// Return every field to its spawn default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
