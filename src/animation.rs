//! Animation state reporting.
//!
//! The controller never inspects animation clips or state graphs. It pushes
//! boolean flags and a jump trigger through [`AnimationStateReporter`] and
//! polls back whether the jump state is playing and how far along it is.

use bevy::prelude::*;

/// Command and query surface the controller uses to drive animation.
///
/// Walking and idle are independent flags; the controller keeps them
/// mutually exclusive.
pub trait AnimationStateReporter {
    fn set_walking(&mut self, walking: bool);
    fn set_idle(&mut self, idle: bool);

    /// Fire-and-forget jump trigger.
    fn trigger_jump(&mut self);

    /// Whether the jump animation state is currently playing.
    fn is_in_jump_state(&self) -> bool;

    /// Normalized playback time of the current animation state.
    ///
    /// `1.0` means the state has played through once.
    fn current_state_normalized_time(&self) -> f32;

    fn set_climb_active(&mut self, _active: bool) {}
    fn set_climb_ladder(&mut self, _ladder: bool) {}
    fn set_climb_rope(&mut self, _rope: bool) {}
}

/// Component implementation of [`AnimationStateReporter`].
///
/// The controller writes flags and the jump trigger here; the game's
/// animation systems read them, drive their animator, and report playback
/// back with [`report_playback`](Self::report_playback).
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct AnimatorParams {
    pub walking: bool,
    pub idle: bool,
    pub climb_active: bool,
    pub climb_ladder: bool,
    pub climb_rope: bool,
    jump_triggered: bool,
    in_jump_state: bool,
    normalized_time: f32,
}

impl Default for AnimatorParams {
    fn default() -> Self {
        Self {
            walking: false,
            idle: true,
            climb_active: false,
            climb_ladder: false,
            climb_rope: false,
            jump_triggered: false,
            in_jump_state: false,
            normalized_time: 0.0,
        }
    }
}

impl AnimatorParams {
    /// Consume a pending jump trigger.
    pub fn take_jump_trigger(&mut self) -> bool {
        std::mem::take(&mut self.jump_triggered)
    }

    /// Whether a jump trigger is pending.
    pub fn jump_triggered(&self) -> bool {
        self.jump_triggered
    }

    /// Report the animator's current playback state.
    pub fn report_playback(&mut self, in_jump_state: bool, normalized_time: f32) {
        self.in_jump_state = in_jump_state;
        self.normalized_time = normalized_time;
    }
}

impl AnimationStateReporter for AnimatorParams {
    fn set_walking(&mut self, walking: bool) {
        self.walking = walking;
    }

    fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
    }

    fn trigger_jump(&mut self) {
        self.jump_triggered = true;
    }

    fn is_in_jump_state(&self) -> bool {
        self.in_jump_state
    }

    fn current_state_normalized_time(&self) -> f32 {
        self.normalized_time
    }

    fn set_climb_active(&mut self, active: bool) {
        self.climb_active = active;
    }

    fn set_climb_ladder(&mut self, ladder: bool) {
        self.climb_ladder = ladder;
    }

    fn set_climb_rope(&mut self, rope: bool) {
        self.climb_rope = rope;
    }
}
