//! Jump state machine.
//!
//! A jump is admitted when a buffered press meets ground contact (or the
//! coyote window after leaving it). The impulse is written to the body in the
//! same physics tick as the decision; the jump animation is triggered at the
//! same time and a [`JumpAnimationWait`] keeps further jumps blocked until the
//! animation reports completion or a timeout elapses.
//!
//! Order within a physics tick:
//!
//! 1. [`MotionState::update_coyote_timer`]
//! 2. [`MotionState::update_jump_buffer`] (runs on the frame tick, which owns input edges)
//! 3. [`MotionState::can_jump`]
//! 4. [`MotionState::try_admit_jump`] applies the impulse and zeroes the buffer
//! 5. [`MotionState::apply_jump_release`]

use bevy::prelude::*;

use crate::animation::AnimationStateReporter;
use crate::config::JumpingConfig;
use crate::motion::MotionState;

/// Result of a jump admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpAdmission {
    /// No buffered press, or neither grounded nor inside the coyote window.
    NotAdmissible,
    /// The jump fired this tick.
    Fired,
    /// Admissible, but another jump is still in flight. The buffer is consumed anyway.
    BlockedInFlight,
}

impl MotionState {
    /// Refresh the coyote window while grounded, count it down otherwise.
    pub fn update_coyote_timer(&mut self, grounded: bool, config: &JumpingConfig, dt: f32) {
        if grounded {
            self.coyote_timer = config.coyote_time;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
    }

    /// Arm the buffer on a jump-down edge, count it down otherwise.
    pub fn update_jump_buffer(&mut self, pressed: bool, config: &JumpingConfig, dt: f32) {
        if pressed {
            self.jump_buffer_timer = config.buffer_time;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }
    }

    /// Whether a buffered jump may fire right now, ignoring any jump in flight.
    pub fn can_jump(&self) -> bool {
        (self.coyote_timer > 0.0 || self.is_grounded) && self.jump_buffer_timer > 0.0
    }

    /// Fire a jump if one is admissible and none is in flight.
    ///
    /// On [`JumpAdmission::Fired`] the caller starts a [`JumpAnimationWait`].
    pub fn try_admit_jump(
        &mut self,
        velocity: &mut Vec2,
        config: &JumpingConfig,
        reporter: &mut dyn AnimationStateReporter,
    ) -> JumpAdmission {
        if !self.can_jump() {
            return JumpAdmission::NotAdmissible;
        }

        let admission = if self.waiting_for_jump_animation {
            JumpAdmission::BlockedInFlight
        } else {
            velocity.y = config.power;
            self.waiting_for_jump_animation = true;
            reporter.trigger_jump();
            reporter.set_idle(false);
            JumpAdmission::Fired
        };

        self.jump_buffer_timer = 0.0;
        admission
    }

    /// Cut upward velocity if a release edge is pending. Returns whether it was cut.
    ///
    /// The pending release is consumed either way.
    pub fn apply_jump_release(&mut self, velocity: &mut Vec2, config: &JumpingConfig) -> bool {
        let released = std::mem::take(&mut self.jump_release_pending);
        if released && velocity.y > 0.0 {
            velocity.y *= config.release_velocity_factor;
            true
        } else {
            false
        }
    }
}

/// Phase of a [`JumpAnimationWait`].
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    /// Waiting for the animator to enter the jump state.
    AwaitingEntry,
    /// Waiting for the jump state to play through or be left.
    AwaitingCompletion,
}

/// Result of polling a [`JumpAnimationWait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Pending,
    Completed,
    TimedOut(WaitPhase),
}

impl WaitOutcome {
    /// Whether the wait has ended.
    pub fn is_finished(self) -> bool {
        self != WaitOutcome::Pending
    }
}

/// Poll loop that follows the jump animation.
///
/// Polled once per frame tick and owned by the controller, which cancels it
/// by dropping it. Each phase has its own timeout so a misconfigured animator
/// can never leave the character unable to jump.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct JumpAnimationWait {
    phase: WaitPhase,
    elapsed: f32,
    timeout: f32,
}

impl JumpAnimationWait {
    pub fn new(timeout: f32) -> Self {
        Self {
            phase: WaitPhase::AwaitingEntry,
            elapsed: 0.0,
            timeout,
        }
    }

    pub fn phase(&self) -> WaitPhase {
        self.phase
    }

    /// Time spent in the current phase.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the wait by one frame.
    pub fn poll(&mut self, reporter: &dyn AnimationStateReporter, dt: f32) -> WaitOutcome {
        if self.phase == WaitPhase::AwaitingEntry {
            if !reporter.is_in_jump_state() {
                return self.tick(dt);
            }
            self.phase = WaitPhase::AwaitingCompletion;
            self.elapsed = 0.0;
        }

        if !reporter.is_in_jump_state() || reporter.current_state_normalized_time() >= 1.0 {
            return WaitOutcome::Completed;
        }
        self.tick(dt)
    }

    fn tick(&mut self, dt: f32) -> WaitOutcome {
        if self.elapsed >= self.timeout {
            return WaitOutcome::TimedOut(self.phase);
        }
        self.elapsed += dt;
        WaitOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimatorParams;

    const DT: f32 = 0.02;

    fn config() -> JumpingConfig {
        JumpingConfig::default()
    }

    fn airborne_with_coyote(coyote: f32) -> MotionState {
        MotionState {
            is_grounded: false,
            coyote_timer: coyote,
            ..default()
        }
    }

    // ==================== Timers ====================

    #[test]
    fn coyote_resets_to_full_whenever_grounded() {
        let config = config();
        for prior in [0.0, 0.05, config.coyote_time, 10.0] {
            let mut state = MotionState {
                coyote_timer: prior,
                ..default()
            };
            state.update_coyote_timer(true, &config, DT);
            assert_eq!(state.coyote_timer, config.coyote_time);
        }
    }

    #[test]
    fn coyote_counts_down_and_clamps_at_zero() {
        let config = config();
        let mut state = airborne_with_coyote(0.03);

        state.update_coyote_timer(false, &config, DT);
        assert!((state.coyote_timer - 0.01).abs() < 1e-6);

        state.update_coyote_timer(false, &config, DT);
        assert_eq!(state.coyote_timer, 0.0);

        state.update_coyote_timer(false, &config, DT);
        assert_eq!(state.coyote_timer, 0.0);
    }

    #[test]
    fn buffer_arms_on_press_and_decays() {
        let config = config();
        let mut state = MotionState::default();

        state.update_jump_buffer(true, &config, DT);
        assert_eq!(state.jump_buffer_timer, config.buffer_time);

        let mut previous = state.jump_buffer_timer;
        for _ in 0..20 {
            state.update_jump_buffer(false, &config, DT);
            assert!(state.jump_buffer_timer <= previous);
            assert!(state.jump_buffer_timer >= 0.0);
            previous = state.jump_buffer_timer;
        }
        assert_eq!(state.jump_buffer_timer, 0.0);
    }

    // ==================== Admission ====================

    #[test]
    fn jump_in_coyote_window_fires_immediately() {
        let config = JumpingConfig {
            power: 12.0,
            ..config()
        };
        let mut state = airborne_with_coyote(0.05);
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::new(3.0, -2.0);

        state.update_jump_buffer(true, &config, DT);
        let admission = state.try_admit_jump(&mut velocity, &config, &mut params);

        assert_eq!(admission, JumpAdmission::Fired);
        assert_eq!(velocity, Vec2::new(3.0, 12.0));
        assert!(state.waiting_for_jump_animation);
        assert_eq!(state.jump_buffer_timer, 0.0);
        assert!(params.jump_triggered());
        assert!(!params.idle);
    }

    #[test]
    fn no_coyote_and_no_buffer_does_not_fire() {
        let config = config();
        let mut state = airborne_with_coyote(0.0);
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::new(0.0, -4.0);

        let admission = state.try_admit_jump(&mut velocity, &config, &mut params);

        assert_eq!(admission, JumpAdmission::NotAdmissible);
        assert_eq!(velocity.y, -4.0);
        assert!(!state.waiting_for_jump_animation);
        assert!(!params.jump_triggered());
    }

    #[test]
    fn buffered_press_without_ground_or_coyote_waits() {
        let config = config();
        let mut state = airborne_with_coyote(0.0);
        state.update_jump_buffer(true, &config, DT);

        let mut velocity = Vec2::ZERO;
        let admission =
            state.try_admit_jump(&mut velocity, &config, &mut AnimatorParams::default());

        assert_eq!(admission, JumpAdmission::NotAdmissible);
        assert!(state.jump_buffer_timer > 0.0, "press must stay buffered");
    }

    #[test]
    fn grounded_admits_even_with_expired_coyote() {
        let config = config();
        let mut state = MotionState {
            is_grounded: true,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.1,
            ..default()
        };

        let mut velocity = Vec2::ZERO;
        let admission =
            state.try_admit_jump(&mut velocity, &config, &mut AnimatorParams::default());
        assert_eq!(admission, JumpAdmission::Fired);
    }

    #[test]
    fn in_flight_jump_blocks_and_consumes_buffer() {
        let config = config();
        let mut state = MotionState {
            is_grounded: true,
            coyote_timer: config.coyote_time,
            jump_buffer_timer: config.buffer_time,
            waiting_for_jump_animation: true,
            ..default()
        };
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::new(0.0, 1.0);

        let admission = state.try_admit_jump(&mut velocity, &config, &mut params);

        assert_eq!(admission, JumpAdmission::BlockedInFlight);
        assert_eq!(velocity.y, 1.0);
        assert_eq!(state.jump_buffer_timer, 0.0);
        assert!(!params.jump_triggered());
    }

    #[test]
    fn second_admission_in_same_tick_is_impossible() {
        let config = config();
        let mut state = MotionState {
            is_grounded: true,
            jump_buffer_timer: config.buffer_time,
            ..default()
        };
        let mut params = AnimatorParams::default();
        let mut velocity = Vec2::ZERO;

        assert_eq!(
            state.try_admit_jump(&mut velocity, &config, &mut params),
            JumpAdmission::Fired
        );
        state.waiting_for_jump_animation = false;
        assert_eq!(
            state.try_admit_jump(&mut velocity, &config, &mut params),
            JumpAdmission::NotAdmissible
        );
    }

    // ==================== Variable height ====================

    #[test]
    fn release_while_rising_halves_velocity() {
        let config = config();
        let mut state = MotionState {
            jump_release_pending: true,
            ..default()
        };
        let mut velocity = Vec2::new(2.0, 10.0);

        assert!(state.apply_jump_release(&mut velocity, &config));
        assert_eq!(velocity, Vec2::new(2.0, 5.0));
        assert!(!state.jump_release_pending);
    }

    #[test]
    fn release_while_falling_has_no_effect() {
        let config = config();
        for vy in [0.0, -3.0] {
            let mut state = MotionState {
                jump_release_pending: true,
                ..default()
            };
            let mut velocity = Vec2::new(0.0, vy);

            assert!(!state.apply_jump_release(&mut velocity, &config));
            assert_eq!(velocity.y, vy);
            assert!(!state.jump_release_pending);
        }
    }

    #[test]
    fn no_release_edge_keeps_velocity() {
        let mut state = MotionState::default();
        let mut velocity = Vec2::new(0.0, 10.0);
        assert!(!state.apply_jump_release(&mut velocity, &config()));
        assert_eq!(velocity.y, 10.0);
    }

    // ==================== Animation wait ====================

    #[test]
    fn wait_completes_after_animation_plays_through() {
        let mut params = AnimatorParams::default();
        let mut wait = JumpAnimationWait::new(2.0);

        assert_eq!(wait.poll(&params, DT), WaitOutcome::Pending);
        assert_eq!(wait.phase(), WaitPhase::AwaitingEntry);

        params.report_playback(true, 0.3);
        assert_eq!(wait.poll(&params, DT), WaitOutcome::Pending);
        assert_eq!(wait.phase(), WaitPhase::AwaitingCompletion);

        params.report_playback(true, 1.0);
        assert_eq!(wait.poll(&params, DT), WaitOutcome::Completed);
    }

    #[test]
    fn wait_completes_when_jump_state_is_left() {
        let mut params = AnimatorParams::default();
        let mut wait = JumpAnimationWait::new(2.0);

        params.report_playback(true, 0.1);
        assert_eq!(wait.poll(&params, DT), WaitOutcome::Pending);

        params.report_playback(false, 0.1);
        assert_eq!(wait.poll(&params, DT), WaitOutcome::Completed);
    }

    #[test]
    fn wait_times_out_when_animation_never_starts() {
        let params = AnimatorParams::default();
        let mut wait = JumpAnimationWait::new(2.0);

        let mut frames = 0;
        let outcome = loop {
            let outcome = wait.poll(&params, DT);
            if outcome.is_finished() {
                break outcome;
            }
            frames += 1;
            assert!(frames < 1000, "wait never finished");
        };

        assert_eq!(outcome, WaitOutcome::TimedOut(WaitPhase::AwaitingEntry));
        assert!(frames as f32 * DT >= 2.0 - 1e-3);
    }

    #[test]
    fn wait_times_out_when_animation_never_finishes() {
        let mut params = AnimatorParams::default();
        params.report_playback(true, 0.5);
        let mut wait = JumpAnimationWait::new(0.1);

        let mut outcome = WaitOutcome::Pending;
        for _ in 0..100 {
            outcome = wait.poll(&params, DT);
            if outcome.is_finished() {
                break;
            }
        }

        assert_eq!(outcome, WaitOutcome::TimedOut(WaitPhase::AwaitingCompletion));
    }

    #[test]
    fn completion_phase_gets_its_own_timeout() {
        let mut params = AnimatorParams::default();
        let mut wait = JumpAnimationWait::new(0.1);

        // Spend most of the entry budget.
        for _ in 0..4 {
            assert_eq!(wait.poll(&params, DT), WaitOutcome::Pending);
        }

        params.report_playback(true, 0.2);
        assert_eq!(wait.poll(&params, DT), WaitOutcome::Pending);
        assert_eq!(wait.phase(), WaitPhase::AwaitingCompletion);
        assert!(wait.elapsed() <= DT + 1e-6);
    }
}
