//! Keyboard input for player-controlled characters.
//!
//! Optional: AI or networked characters write [`MovementIntent`] directly.

use bevy::prelude::*;

use crate::intent::MovementIntent;
use crate::PlatformerSet;

/// Marks a character whose [`MovementIntent`] is filled from the keyboard.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(MovementIntent)]
pub struct KeyboardControlled;

/// Keys bound to each movement action. Any bound key triggers its action.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            up: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            down: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            jump: vec![KeyCode::Space],
        }
    }
}

impl KeyBindings {
    fn axis(keyboard: &ButtonInput<KeyCode>, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
        let mut axis = 0.0;
        if keyboard.any_pressed(negative.iter().copied()) {
            axis -= 1.0;
        }
        if keyboard.any_pressed(positive.iter().copied()) {
            axis += 1.0;
        }
        axis
    }

    /// Write the current keyboard state into `intent`.
    pub fn apply(&self, keyboard: &ButtonInput<KeyCode>, intent: &mut MovementIntent) {
        intent.set_walk(Self::axis(keyboard, &self.left, &self.right));
        intent.set_vertical(Self::axis(keyboard, &self.down, &self.up));

        // A tap inside one frame is just pressed and just released but never held.
        if keyboard.any_just_pressed(self.jump.iter().copied()) {
            intent.press_jump();
        }
        if keyboard.any_just_released(self.jump.iter().copied()) {
            intent.release_jump();
        }
        intent.set_jump_pressed(keyboard.any_pressed(self.jump.iter().copied()));

        if keyboard.any_just_pressed(self.left.iter().copied()) {
            intent.press_left();
        }
        if keyboard.any_just_pressed(self.right.iter().copied()) {
            intent.press_right();
        }
    }
}

/// Fills [`MovementIntent`] of [`KeyboardControlled`] characters each frame.
pub struct PlatformerKeyboardPlugin;

impl Plugin for PlatformerKeyboardPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<KeyboardControlled>()
            .register_type::<KeyBindings>()
            .init_resource::<KeyBindings>()
            .add_systems(Update, read_keyboard.in_set(PlatformerSet::Input));
    }
}

fn read_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut intents: Query<&mut MovementIntent, With<KeyboardControlled>>,
) {
    for mut intent in &mut intents {
        bindings.apply(&keyboard, &mut intent);
    }
}
