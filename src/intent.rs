//! Movement intent components.
//!
//! Intents represent the desired movement from player input or AI. Input
//! systems write them once per frame; the frame tick consumes the latched
//! button edges so that a press or release is never lost between frames and
//! fixed physics steps.

use bevy::prelude::*;

/// Button edges latched since the last frame tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    /// Jump button went down.
    pub jump_down: bool,
    /// Jump button went up.
    pub jump_up: bool,
    /// Left directional key went down.
    pub left_down: bool,
    /// Right directional key went down.
    pub right_down: bool,
}

impl InputEdges {
    /// Whether any edge is set.
    pub fn any(&self) -> bool {
        self.jump_down || self.jump_up || self.left_down || self.right_down
    }
}

/// Polled input for one controlled character.
///
/// # Example
///
/// ```rust
/// use platformer_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_walk(1.0);
/// assert!(intent.is_walking());
///
/// intent.set_jump_pressed(true);
/// let edges = intent.take_edges();
/// assert!(edges.jump_down);
///
/// // Holding the button does not produce a second edge.
/// intent.set_jump_pressed(true);
/// assert!(!intent.take_edges().jump_down);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Horizontal movement intent (-1.0 = left, 1.0 = right).
    pub walk: f32,
    /// Vertical intent used while climbing (-1.0 = down, 1.0 = up).
    pub vertical: f32,
    /// Whether the jump button is currently held.
    pub jump_pressed: bool,
    edges: InputEdges,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the walking direction (-1.0 = left, 1.0 = right).
    pub fn set_walk(&mut self, direction: f32) {
        self.walk = direction.clamp(-1.0, 1.0);
    }

    /// Set the vertical direction (-1.0 = down, 1.0 = up).
    pub fn set_vertical(&mut self, direction: f32) {
        self.vertical = direction.clamp(-1.0, 1.0);
    }

    /// Report the held state of the jump button.
    ///
    /// Rising and falling edges are latched until [`take_edges`](Self::take_edges).
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        if pressed && !self.jump_pressed {
            self.edges.jump_down = true;
        }
        if !pressed && self.jump_pressed {
            self.edges.jump_up = true;
        }
        self.jump_pressed = pressed;
    }

    /// Latch a jump press reported as an event rather than a held state.
    pub fn press_jump(&mut self) {
        self.edges.jump_down = true;
        self.jump_pressed = true;
    }

    /// Latch a jump release reported as an event rather than a held state.
    pub fn release_jump(&mut self) {
        self.edges.jump_up = true;
        self.jump_pressed = false;
    }

    /// Latch a left directional key press.
    pub fn press_left(&mut self) {
        self.edges.left_down = true;
    }

    /// Latch a right directional key press.
    pub fn press_right(&mut self) {
        self.edges.right_down = true;
    }

    /// Peek at the latched edges without consuming them.
    pub fn edges(&self) -> InputEdges {
        self.edges
    }

    /// Consume the latched edges.
    pub fn take_edges(&mut self) -> InputEdges {
        std::mem::take(&mut self.edges)
    }

    /// Clear axes, held state and latched edges.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if there is active walking input.
    pub fn is_walking(&self) -> bool {
        self.walk.abs() > 0.001
    }

    /// Check if there is upward vertical input.
    pub fn is_moving_up(&self) -> bool {
        self.vertical > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_intent_new() {
        let intent = MovementIntent::new();
        assert_eq!(intent.walk, 0.0);
        assert_eq!(intent.vertical, 0.0);
        assert!(!intent.jump_pressed);
        assert!(!intent.edges().any());
    }

    #[test]
    fn set_walk_clamps() {
        let mut intent = MovementIntent::new();
        intent.set_walk(0.5);
        assert_eq!(intent.walk, 0.5);

        intent.set_walk(5.0);
        assert_eq!(intent.walk, 1.0);

        intent.set_walk(-5.0);
        assert_eq!(intent.walk, -1.0);
    }

    #[test]
    fn set_vertical_clamps() {
        let mut intent = MovementIntent::new();
        intent.set_vertical(-3.0);
        assert_eq!(intent.vertical, -1.0);
        assert!(!intent.is_moving_up());

        intent.set_vertical(0.4);
        assert!(intent.is_moving_up());
    }

    #[test]
    fn is_walking_threshold() {
        let mut intent = MovementIntent::new();
        intent.set_walk(0.0001);
        assert!(!intent.is_walking());

        intent.set_walk(-0.5);
        assert!(intent.is_walking());
    }

    #[test]
    fn jump_press_latches_rising_edge_once() {
        let mut intent = MovementIntent::new();
        intent.set_jump_pressed(true);
        intent.set_jump_pressed(true);

        let edges = intent.take_edges();
        assert!(edges.jump_down);
        assert!(!edges.jump_up);

        intent.set_jump_pressed(true);
        assert!(!intent.take_edges().jump_down);
    }

    #[test]
    fn jump_release_latches_falling_edge() {
        let mut intent = MovementIntent::new();
        intent.set_jump_pressed(true);
        intent.take_edges();

        intent.set_jump_pressed(false);
        let edges = intent.take_edges();
        assert!(edges.jump_up);
        assert!(!edges.jump_down);
    }

    #[test]
    fn tap_within_one_frame_keeps_both_edges() {
        let mut intent = MovementIntent::new();
        intent.set_jump_pressed(true);
        intent.set_jump_pressed(false);

        let edges = intent.take_edges();
        assert!(edges.jump_down);
        assert!(edges.jump_up);
    }

    #[test]
    fn press_and_release_events_latch_edges() {
        let mut intent = MovementIntent::new();
        intent.press_jump();
        assert!(intent.jump_pressed);

        intent.release_jump();
        assert!(!intent.jump_pressed);

        let edges = intent.take_edges();
        assert!(edges.jump_down);
        assert!(edges.jump_up);
        assert!(!intent.edges().any());
    }

    #[test]
    fn directional_edges() {
        let mut intent = MovementIntent::new();
        intent.press_left();
        assert!(intent.edges().left_down);
        assert!(!intent.edges().right_down);

        intent.take_edges();
        intent.press_right();
        assert!(intent.take_edges().right_down);
    }

    #[test]
    fn clear_resets_everything() {
        let mut intent = MovementIntent::new();
        intent.set_walk(1.0);
        intent.set_vertical(1.0);
        intent.set_jump_pressed(true);

        intent.clear();
        assert!(!intent.is_walking());
        assert!(!intent.jump_pressed);
        assert!(!intent.edges().any());
    }
}
