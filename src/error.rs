//! Errors that keep a platformer controller from running.

use thiserror::Error;

/// A dependency or tuning value that prevents a controller from running.
///
/// These are detected when the controller is initialized. A controller that
/// reports any of them is disabled until the dependency is supplied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("physics body missing from controlled entity (expected a `{component}` component)")]
    MissingPhysicsBody { component: &'static str },
    #[error("ground check anchor missing; assign one with `GroundSensor::set_anchor`")]
    MissingGroundAnchor,
    #[error("animation reporter missing from controlled entity")]
    MissingAnimationReporter,
    #[error("invalid controller parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
