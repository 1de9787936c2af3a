//! Collision shape components
//!
//! Box and circle shapes attachable to entities. A collider attached to an
//! entity that already owns a [`RigidBody`] shares that body; otherwise it
//! creates an implicit static body and owns it, so a bare collider still
//! participates in collision detection. The shared behavior lives on the
//! [`Collider`] trait so gameplay can treat both kinds uniformly.

use super::dispatcher::{ContactBegin, ContactEnd, ContactHit};
use super::rigid_body::RigidBody;
use super::world::PhysicsWorld;
use super::{BodyHandle, BodyType, PhysicsError, ShapeHandle, ShapeKind};
use crate::ecs::components::Transform2D;
use crate::ecs::{Component, Entity, Registry};
use crate::foundation::math::Vec2;

/// Behavior common to every collision shape component
pub trait Collider {
    /// Entity the shape belongs to
    fn entity(&self) -> Entity;

    /// Solver handle of the shape
    fn shape(&self) -> ShapeHandle;

    /// Solver handle of the body carrying the shape
    fn body(&self) -> BodyHandle;

    /// Whether the collider created its own static body
    fn owns_body(&self) -> bool;

    /// Whether both shape and body still exist in the solver
    fn is_valid(&self, physics: &PhysicsWorld) -> bool {
        physics.shape_is_valid(self.shape()) && physics.body_is_valid(self.body())
    }

    /// Destroy the shape, and the body too when this collider owns it
    fn detach(&self, physics: &mut PhysicsWorld) {
        physics.destroy_shape(self.shape());
        if self.owns_body() {
            physics.destroy_body(self.body());
        }
    }

    /// Set surface friction
    fn set_friction(&self, physics: &mut PhysicsWorld, friction: f32) -> bool {
        physics.set_friction(self.shape(), friction)
    }

    /// Set bounciness
    fn set_restitution(&self, physics: &mut PhysicsWorld, restitution: f32) -> bool {
        physics.set_restitution(self.shape(), restitution)
    }

    /// Offset of the shape relative to its body origin
    fn offset(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.shape_offset(self.shape())
    }

    /// Move the shape relative to its body origin
    fn set_offset(&self, physics: &mut PhysicsWorld, offset: Vec2) -> bool {
        physics.set_shape_offset(self.shape(), offset)
    }

    /// Rotation of the shape relative to its body origin, in radians
    fn rotation(&self, physics: &PhysicsWorld) -> Option<f32> {
        physics.shape_rotation(self.shape())
    }

    /// Rotate the shape relative to its body origin
    fn set_rotation(&self, physics: &mut PhysicsWorld, radians: f32) -> bool {
        physics.set_shape_rotation(self.shape(), radians)
    }

    /// Opt the shape in or out of contact event reporting
    fn set_contact_events_enabled(&self, physics: &mut PhysicsWorld, enabled: bool) -> bool {
        physics.set_contact_events_enabled(self.shape(), enabled)
    }

    /// Whether the shape reports contact events
    fn contact_events_enabled(&self, physics: &PhysicsWorld) -> bool {
        physics.contact_events_enabled(self.shape())
    }

    /// React to contacts beginning on this shape.
    ///
    /// The callback only fires while contact events are enabled on the
    /// shape; registering beforehand logs a warning but keeps the
    /// registration for when events are switched on.
    fn on_contact_begin(
        &self,
        physics: &mut PhysicsWorld,
        callback: impl FnMut(&ContactBegin) + 'static,
    ) {
        self.warn_if_events_disabled(physics, "begin");
        physics.dispatcher_mut().register_begin(self.shape(), callback);
    }

    /// React to contacts ending on this shape
    fn on_contact_end(
        &self,
        physics: &mut PhysicsWorld,
        callback: impl FnMut(&ContactEnd) + 'static,
    ) {
        self.warn_if_events_disabled(physics, "end");
        physics.dispatcher_mut().register_end(self.shape(), callback);
    }

    /// React to force reports on this shape
    fn on_contact_hit(
        &self,
        physics: &mut PhysicsWorld,
        callback: impl FnMut(&ContactHit) + 'static,
    ) {
        self.warn_if_events_disabled(physics, "hit");
        physics.dispatcher_mut().register_hit(self.shape(), callback);
    }

    #[doc(hidden)]
    fn warn_if_events_disabled(&self, physics: &PhysicsWorld, kind: &str) {
        if !self.contact_events_enabled(physics) {
            log::warn!(
                "registering a contact {kind} callback on a shape with contact events disabled; \
                 it will not fire until set_contact_events_enabled(true)"
            );
        }
    }
}

fn resolve_body(
    entity: Entity,
    registry: &Registry,
    physics: &mut PhysicsWorld,
) -> (BodyHandle, bool) {
    if let Some(body) = registry.get_component::<RigidBody>(entity) {
        if physics.body_is_valid(body.handle()) {
            return (body.handle(), false);
        }
    }
    let transform = registry
        .get_component::<Transform2D>(entity)
        .copied()
        .unwrap_or_default();
    let body = physics.create_body(
        entity,
        transform.position,
        transform.rotation,
        BodyType::Static,
    );
    (body, true)
}

fn entity_transform(entity: Entity, registry: &Registry) -> Transform2D {
    registry
        .get_component::<Transform2D>(entity)
        .copied()
        .unwrap_or_default()
}

/// Box collision shape sized from the entity's transform scale
#[derive(Debug, Clone, Copy)]
pub struct BoxCollider {
    entity: Entity,
    body: BodyHandle,
    shape: ShapeHandle,
    owns_body: bool,
}

impl Component for BoxCollider {}

impl Collider for BoxCollider {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn shape(&self) -> ShapeHandle {
        self.shape
    }

    fn body(&self) -> BodyHandle {
        self.body
    }

    fn owns_body(&self) -> bool {
        self.owns_body
    }
}

impl BoxCollider {
    /// Attach a box shape to `entity`, reusing its rigid body if present.
    ///
    /// Half-extents start at half the transform scale, matching the unit
    /// sprite footprint.
    pub fn attach(
        entity: Entity,
        registry: &Registry,
        physics: &mut PhysicsWorld,
    ) -> Result<Self, PhysicsError> {
        let (body, owns_body) = resolve_body(entity, registry, physics);
        let transform = entity_transform(entity, registry);
        let shape = physics.create_shape(body, ShapeKind::Box, &transform)?;
        Ok(Self {
            entity,
            body,
            shape,
            owns_body,
        })
    }

    /// Current half-extents of the shape
    pub fn half_extents(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics.box_half_extents(self.shape)
    }

    /// Resize the shape to the given half-extents
    pub fn set_half_extents(
        &self,
        physics: &mut PhysicsWorld,
        half_extents: Vec2,
    ) -> Result<(), PhysicsError> {
        physics.set_box_half_extents(self.shape, half_extents)
    }

    /// Resize the shape from the entity's current transform scale
    pub fn rescale(
        &self,
        registry: &Registry,
        physics: &mut PhysicsWorld,
    ) -> Result<(), PhysicsError> {
        let transform = entity_transform(self.entity, registry);
        physics.set_box_half_extents(self.shape, transform.scale * 0.5)
    }
}

/// Circle collision shape sized from the entity's transform scale
#[derive(Debug, Clone, Copy)]
pub struct CircleCollider {
    entity: Entity,
    body: BodyHandle,
    shape: ShapeHandle,
    owns_body: bool,
}

impl Component for CircleCollider {}

impl Collider for CircleCollider {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn shape(&self) -> ShapeHandle {
        self.shape
    }

    fn body(&self) -> BodyHandle {
        self.body
    }

    fn owns_body(&self) -> bool {
        self.owns_body
    }
}

impl CircleCollider {
    /// Attach a circle shape to `entity`, reusing its rigid body if
    /// present. The radius starts at a quarter of the summed scale axes.
    pub fn attach(
        entity: Entity,
        registry: &Registry,
        physics: &mut PhysicsWorld,
    ) -> Result<Self, PhysicsError> {
        let (body, owns_body) = resolve_body(entity, registry, physics);
        let transform = entity_transform(entity, registry);
        let shape = physics.create_shape(body, ShapeKind::Circle, &transform)?;
        Ok(Self {
            entity,
            body,
            shape,
            owns_body,
        })
    }

    /// Current radius of the shape
    pub fn radius(&self, physics: &PhysicsWorld) -> Result<f32, PhysicsError> {
        physics.circle_radius(self.shape)
    }

    /// Resize the shape to the given radius
    pub fn set_radius(&self, physics: &mut PhysicsWorld, radius: f32) -> Result<(), PhysicsError> {
        physics.set_circle_radius(self.shape, radius)
    }

    /// Resize the shape from the entity's current transform scale
    pub fn rescale(
        &self,
        registry: &Registry,
        physics: &mut PhysicsWorld,
    ) -> Result<(), PhysicsError> {
        let transform = entity_transform(self.entity, registry);
        physics.set_circle_radius(
            self.shape,
            0.25 * (transform.scale.x + transform.scale.y),
        )
    }
}
