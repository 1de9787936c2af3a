//! Per-phase view into engine services
//!
//! Systems never hold references into the engine; each phase call hands
//! them a short-lived context borrowing the scene's registry, the shared
//! physics world and the gizmo queue. The context also carries the
//! compound operations that must touch registry and physics together,
//! such as attaching physics components and destroying entities.

use crate::ecs::components::{SpriteRenderer, Transform2D};
use crate::ecs::{Component, EcsError, Entity, Registry};
use crate::foundation::time::FrameTime;
use crate::physics::{
    BodyType, BoxCollider, CircleCollider, Collider, PhysicsWorld, RigidBody,
};
use crate::render::{Camera, Gizmos};
use crate::EngineError;

/// Services available to a system during one phase call
pub struct SceneContext<'a> {
    /// The owning scene's entity registry
    pub registry: &'a mut Registry,
    /// Physics world shared by every loaded scene
    pub physics: &'a mut PhysicsWorld,
    /// Debug overlay queue
    pub gizmos: &'a mut Gizmos,
    /// Timing for the current phase
    pub time: FrameTime,
    scene_name: &'a str,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(
        registry: &'a mut Registry,
        physics: &'a mut PhysicsWorld,
        gizmos: &'a mut Gizmos,
        time: FrameTime,
        scene_name: &'a str,
    ) -> Self {
        Self {
            registry,
            physics,
            gizmos,
            time,
            scene_name,
        }
    }

    /// Name of the scene the running system belongs to
    pub fn scene_name(&self) -> &str {
        self.scene_name
    }

    /// Create an empty entity
    pub fn create_entity(&mut self) -> Entity {
        self.registry.create_entity()
    }

    /// Create an entity holding the given transform
    pub fn spawn(&mut self, transform: Transform2D) -> Entity {
        let entity = self.registry.create_entity();
        let _ = self.registry.add_component(entity, transform);
        entity
    }

    /// Create an entity holding a transform and a sprite
    pub fn spawn_sprite(&mut self, transform: Transform2D, sprite: SpriteRenderer) -> Entity {
        let entity = self.spawn(transform);
        let _ = self.registry.add_component(entity, sprite);
        entity
    }

    /// Attach a camera to an entity, adding a default transform first if
    /// the entity has none
    pub fn add_camera(&mut self, entity: Entity, camera: Camera) -> Result<(), EngineError> {
        if !self.registry.has_component::<Transform2D>(entity) {
            log::warn!("camera entity has no Transform2D, adding a default one");
            self.registry.add_component(entity, Transform2D::default())?;
        }
        self.registry.add_component(entity, camera)?;
        Ok(())
    }

    /// Attach a rigid body to an entity.
    ///
    /// Checked before the solver body is created, so a duplicate add never
    /// leaks a body.
    pub fn add_rigid_body(
        &mut self,
        entity: Entity,
        body_type: BodyType,
    ) -> Result<RigidBody, EngineError> {
        self.ensure_can_add::<RigidBody>(entity)?;
        let body = RigidBody::attach(entity, self.registry, self.physics, body_type);
        self.registry.add_component(entity, body)?;
        Ok(body)
    }

    /// Attach a box collider, sharing the entity's rigid body if present
    pub fn add_box_collider(&mut self, entity: Entity) -> Result<BoxCollider, EngineError> {
        self.ensure_can_add::<BoxCollider>(entity)?;
        let collider = BoxCollider::attach(entity, self.registry, self.physics)?;
        self.registry.add_component(entity, collider)?;
        Ok(collider)
    }

    /// Attach a circle collider, sharing the entity's rigid body if
    /// present
    pub fn add_circle_collider(&mut self, entity: Entity) -> Result<CircleCollider, EngineError> {
        self.ensure_can_add::<CircleCollider>(entity)?;
        let collider = CircleCollider::attach(entity, self.registry, self.physics)?;
        self.registry.add_component(entity, collider)?;
        Ok(collider)
    }

    /// Detach an entity's rigid body, destroying the solver body
    pub fn remove_rigid_body(&mut self, entity: Entity) {
        if let Some(body) = self.registry.remove_component::<RigidBody>(entity) {
            body.detach(self.physics);
        }
    }

    /// Detach an entity's box collider, destroying its solver shape
    pub fn remove_box_collider(&mut self, entity: Entity) {
        if let Some(collider) = self.registry.remove_component::<BoxCollider>(entity) {
            collider.detach(self.physics);
        }
    }

    /// Detach an entity's circle collider, destroying its solver shape
    pub fn remove_circle_collider(&mut self, entity: Entity) {
        if let Some(collider) = self.registry.remove_component::<CircleCollider>(entity) {
            collider.detach(self.physics);
        }
    }

    /// Destroy an entity, releasing its physics resources first
    pub fn destroy_entity(&mut self, entity: Entity) {
        release_physics(self.registry, self.physics, entity);
        self.registry.destroy_entity(entity);
    }

    fn ensure_can_add<T: Component>(&self, entity: Entity) -> Result<(), EcsError> {
        if !self.registry.is_valid(entity) {
            return Err(EcsError::DeadEntity);
        }
        if self.registry.has_component::<T>(entity) {
            return Err(EcsError::DuplicateComponent {
                type_name: std::any::type_name::<T>(),
            });
        }
        Ok(())
    }
}

/// Destroy the solver resources of an entity's physics components without
/// touching the registry entry itself
pub(crate) fn release_physics(registry: &mut Registry, physics: &mut PhysicsWorld, entity: Entity) {
    if let Some(collider) = registry.remove_component::<BoxCollider>(entity) {
        collider.detach(physics);
    }
    if let Some(collider) = registry.remove_component::<CircleCollider>(entity) {
        collider.detach(physics);
    }
    if let Some(body) = registry.remove_component::<RigidBody>(entity) {
        body.detach(physics);
    }
}
