//! Rigid body component
//!
//! Thin entity-side facade over a solver body. The component stores the
//! handle; all state lives in the solver and is reached through the
//! [`PhysicsWorld`] passed to each accessor. After the body is destroyed
//! the setters become no-ops and the getters return `None`.

use super::world::PhysicsWorld;
use super::{BodyHandle, BodyType};
use crate::ecs::components::Transform2D;
use crate::ecs::{Component, Entity, Registry};
use crate::foundation::math::Vec2;

/// Simulated rigid body attached to an entity
#[derive(Debug, Clone, Copy)]
pub struct RigidBody {
    entity: Entity,
    handle: BodyHandle,
    body_type: BodyType,
}

impl Component for RigidBody {}

impl RigidBody {
    /// Create a solver body for `entity` at its current transform.
    ///
    /// An entity without a transform gets its body at the origin; physics
    /// will drive the transform once one is added.
    pub fn attach(
        entity: Entity,
        registry: &Registry,
        physics: &mut PhysicsWorld,
        body_type: BodyType,
    ) -> Self {
        let transform = registry
            .get_component::<Transform2D>(entity)
            .copied()
            .unwrap_or_else(|| {
                log::warn!("entity has no Transform2D, creating its body at the origin");
                Transform2D::default()
            });
        let handle = physics.create_body(
            entity,
            transform.position,
            transform.rotation,
            body_type,
        );
        Self {
            entity,
            handle,
            body_type,
        }
    }

    /// Entity this body belongs to
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Solver handle of the body
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Simulation role chosen at attach time
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Whether the body still exists in the solver
    pub fn is_valid(&self, physics: &PhysicsWorld) -> bool {
        physics.body_is_valid(self.handle)
    }

    /// Destroy the solver body. The component itself is removed by the
    /// scene context.
    pub fn detach(&self, physics: &mut PhysicsWorld) {
        physics.destroy_body(self.handle);
    }

    /// Linear velocity in world units per second
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.linear_velocity(self.handle)
    }

    /// Set the linear velocity
    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec2) -> bool {
        physics.set_linear_velocity(self.handle, velocity)
    }

    /// Angular velocity in radians per second
    pub fn angular_velocity(&self, physics: &PhysicsWorld) -> Option<f32> {
        physics.angular_velocity(self.handle)
    }

    /// Set the angular velocity in radians per second
    pub fn set_angular_velocity(&self, physics: &mut PhysicsWorld, velocity: f32) -> bool {
        physics.set_angular_velocity(self.handle, velocity)
    }

    /// Per-body gravity multiplier
    pub fn gravity_scale(&self, physics: &PhysicsWorld) -> Option<f32> {
        physics.gravity_scale(self.handle)
    }

    /// Set the gravity multiplier; zero makes the body float
    pub fn set_gravity_scale(&self, physics: &mut PhysicsWorld, scale: f32) -> bool {
        physics.set_gravity_scale(self.handle, scale)
    }

    /// Body mass including shape contributions
    pub fn mass(&self, physics: &PhysicsWorld) -> Option<f32> {
        physics.mass(self.handle)
    }

    /// Add mass on top of what the shapes contribute
    pub fn set_additional_mass(&self, physics: &mut PhysicsWorld, mass: f32) -> bool {
        physics.set_additional_mass(self.handle, mass)
    }

    /// Linear damping factor
    pub fn linear_damping(&self, physics: &PhysicsWorld) -> Option<f32> {
        physics.linear_damping(self.handle)
    }

    /// Set the linear damping factor
    pub fn set_linear_damping(&self, physics: &mut PhysicsWorld, damping: f32) -> bool {
        physics.set_linear_damping(self.handle, damping)
    }

    /// Set the angular damping factor
    pub fn set_angular_damping(&self, physics: &mut PhysicsWorld, damping: f32) -> bool {
        physics.set_angular_damping(self.handle, damping)
    }

    /// Body position and rotation in world space
    pub fn position(&self, physics: &PhysicsWorld) -> Option<(Vec2, f32)> {
        physics.body_position(self.handle)
    }

    /// Teleport the body, keeping its rotation
    pub fn set_position(&self, physics: &mut PhysicsWorld, position: Vec2) -> bool {
        physics.set_body_position(self.handle, position)
    }

    /// Set the body rotation in radians
    pub fn set_rotation(&self, physics: &mut PhysicsWorld, radians: f32) -> bool {
        physics.set_body_rotation(self.handle, radians)
    }

    /// Prevent or allow rotation under simulation
    pub fn lock_rotation(&self, physics: &mut PhysicsWorld, locked: bool) -> bool {
        physics.lock_rotation(self.handle, locked)
    }

    /// Include or exclude the body from simulation
    pub fn set_enabled(&self, physics: &mut PhysicsWorld, enabled: bool) -> bool {
        physics.set_body_enabled(self.handle, enabled)
    }

    /// Whether the body participates in simulation
    pub fn enabled(&self, physics: &PhysicsWorld) -> Option<bool> {
        physics.body_enabled(self.handle)
    }
}
