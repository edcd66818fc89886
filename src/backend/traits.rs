//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the platformer controller. This allows swapping the physics
//! engine without touching the controller's state machines.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// A backend owns everything engine-specific: the velocity component of the
/// body, the ground overlap query and climbable detection. Its plugin must
/// register the sensing systems in
/// [`PlatformerSet::Sensors`](crate::PlatformerSet::Sensors) so that each
/// physics step records ground contact through
/// [`PlatformerController::record_ground_contact`](crate::controller::PlatformerController::record_ground_contact)
/// before the controller runs.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use platformer_controller::prelude::*;
///
/// #[derive(Component, Default)]
/// struct Velocity(Vec2);
///
/// struct MyBackend;
///
/// impl CharacterPhysicsBackend for MyBackend {
///     type VelocityComponent = Velocity;
///
///     fn plugin() -> impl Plugin {
///         |_app: &mut App| {}
///     }
///
///     fn velocity(component: &Velocity) -> Vec2 {
///         component.0
///     }
///
///     fn set_velocity(component: &mut Velocity, velocity: Vec2) {
///         component.0 = velocity;
///     }
/// }
/// ```
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    ///
    /// Its presence on a controlled entity is what counts as "has a physics body".
    type VelocityComponent: Component<Mutability = Mutable>;

    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Read the linear velocity from the component.
    fn velocity(component: &Self::VelocityComponent) -> Vec2;

    /// Overwrite the linear velocity in the component.
    fn set_velocity(component: &mut Self::VelocityComponent, velocity: Vec2);

    /// Short name of the velocity component, used in diagnostics.
    fn velocity_component_name() -> &'static str {
        let path = std::any::type_name::<Self::VelocityComponent>();
        path.rsplit("::").next().unwrap_or(path)
    }
}
