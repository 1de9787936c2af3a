//! Solver ownership and stepping
//!
//! `PhysicsWorld` owns every rapier data structure for one simulation plus
//! the contact dispatcher. The scene orchestrator holds exactly one world
//! and passes it to whichever scene needs it, so bodies from all loaded
//! scenes share a single simulation.

use super::dispatcher::{
    CollisionDispatcher, ContactBegin, ContactEnd, ContactEvents, ContactHit,
};
use super::{BodyHandle, BodyType, PhysicsError, ShapeHandle, ShapeKind};
use crate::ecs::components::Transform2D;
use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use crossbeam_channel::Receiver;
use rapier2d::prelude::{
    ActiveEvents, CCDSolver, ChannelEventCollector, ColliderBuilder, ColliderSet,
    CollisionEvent, ContactForceEvent, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, Isometry, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, QueryPipeline, RigidBodyBuilder, RigidBodySet, Rotation, SharedShape,
};
use std::num::NonZeroUsize;

/// Body defaults applied at creation time, overridable per body afterwards
const DEFAULT_LINEAR_DAMPING: f32 = 0.1;
const DEFAULT_BODY_MASS: f32 = 1.0;
/// Shape defaults applied at creation time
const DEFAULT_DENSITY: f32 = 1.0;
const DEFAULT_FRICTION: f32 = 0.3;
const DEFAULT_RESTITUTION: f32 = 0.0;

/// One rigid-body simulation shared by all loaded scenes
pub struct PhysicsWorld {
    gravity: Vec2,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    events: ChannelEventCollector,
    collision_recv: Receiver<CollisionEvent>,
    contact_force_recv: Receiver<ContactForceEvent>,
    dispatcher: CollisionDispatcher,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, -9.8), 4)
    }
}

impl PhysicsWorld {
    /// World with the given gravity and solver iteration count
    pub fn new(gravity: Vec2, solver_iterations: u32) -> Self {
        let (collision_send, collision_recv) = crossbeam_channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam_channel::unbounded();

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(solver_iterations as usize).unwrap_or(NonZeroUsize::MIN);

        Self {
            gravity,
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            events: ChannelEventCollector::new(collision_send, contact_force_send),
            collision_recv,
            contact_force_recv,
            dispatcher: CollisionDispatcher::default(),
        }
    }

    /// Gravity applied to dynamic bodies, scaled per body
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Change the world gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Advance the simulation by one fixed step of `dt` seconds.
    ///
    /// Contact events produced by the step are dispatched to registered
    /// callbacks before this returns, so gameplay reacts in the same fixed
    /// tick the solver reported them.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
        let events = self.drain_events();
        if !events.is_empty() {
            self.dispatcher.process(&events);
        }
    }

    fn drain_events(&mut self) -> ContactEvents {
        let mut events = ContactEvents::default();
        while let Ok(event) = self.collision_recv.try_recv() {
            match event {
                CollisionEvent::Started(a, b, _) => {
                    events.begin.push(ContactBegin { shape_a: a, shape_b: b });
                }
                CollisionEvent::Stopped(a, b, _) => {
                    events.end.push(ContactEnd { shape_a: a, shape_b: b });
                }
            }
        }
        while let Ok(event) = self.contact_force_recv.try_recv() {
            events.hit.push(ContactHit {
                shape_a: event.collider1,
                shape_b: event.collider2,
                direction: event.max_force_direction,
                force: event.total_force_magnitude,
            });
        }
        events
    }

    /// Callback registration for contact events
    pub fn dispatcher_mut(&mut self) -> &mut CollisionDispatcher {
        &mut self.dispatcher
    }

    // -- body lifecycle ----------------------------------------------------

    /// Create a body at the entity's transform and tag it with the entity
    /// id so solver reports can be mapped back.
    pub fn create_body(
        &mut self,
        entity: Entity,
        position: Vec2,
        rotation: f32,
        body_type: BodyType,
    ) -> BodyHandle {
        let builder = match body_type {
            BodyType::Static => RigidBodyBuilder::fixed(),
            BodyType::Kinematic => RigidBodyBuilder::kinematic_position_based(),
            // rapier does not simulate zero-mass dynamic bodies, so a body
            // without shapes carries a unit mass of its own
            BodyType::Dynamic => RigidBodyBuilder::dynamic().additional_mass(DEFAULT_BODY_MASS),
        };
        let body = builder
            .translation(position)
            .rotation(rotation)
            .gravity_scale(1.0)
            .linear_damping(DEFAULT_LINEAR_DAMPING)
            .ccd_enabled(true)
            .user_data(u128::from(entity.to_bits()))
            .build();
        self.bodies.insert(body)
    }

    /// Remove a body and every shape attached to it. Stale handles are
    /// ignored.
    pub fn destroy_body(&mut self, handle: BodyHandle) {
        if let Some(body) = self.bodies.get(handle) {
            let attached: Vec<ShapeHandle> = body.colliders().to_vec();
            for shape in attached {
                self.dispatcher.unregister_shape(shape);
            }
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    /// Whether the handle still refers to a live body
    pub fn body_is_valid(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// The entity a body was created for, if the body is still alive
    pub fn entity_of_body(&self, handle: BodyHandle) -> Option<Entity> {
        let body = self.bodies.get(handle)?;
        u64::try_from(body.user_data)
            .ok()
            .map(Entity::from_bits)
    }

    // -- shape lifecycle ---------------------------------------------------

    /// Attach a collision shape to a body, sized from the transform scale.
    ///
    /// Boxes take half-extents of `scale / 2`; circles take a radius of a
    /// quarter of the summed scale axes, so a unit scale yields a circle
    /// inscribed in the unit sprite. The body is snapped back onto the
    /// transform afterwards, which keeps creation order between body and
    /// shape from mattering.
    pub fn create_shape(
        &mut self,
        body: BodyHandle,
        kind: ShapeKind,
        transform: &Transform2D,
    ) -> Result<ShapeHandle, PhysicsError> {
        if !self.bodies.contains(body) {
            return Err(PhysicsError::InvalidBody);
        }
        let builder = match kind {
            ShapeKind::Box => ColliderBuilder::cuboid(
                (transform.scale.x * 0.5).abs(),
                (transform.scale.y * 0.5).abs(),
            ),
            ShapeKind::Circle => ColliderBuilder::ball(
                (0.25 * (transform.scale.x + transform.scale.y)).abs(),
            ),
        };
        let collider = builder
            .density(DEFAULT_DENSITY)
            .friction(DEFAULT_FRICTION)
            .restitution(DEFAULT_RESTITUTION)
            .build();
        let shape = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        if let Some(body) = self.bodies.get_mut(body) {
            body.set_position(
                Isometry::new(transform.position, transform.rotation),
                true,
            );
        }
        Ok(shape)
    }

    /// Remove a shape and its callback registrations. Stale handles are
    /// ignored.
    pub fn destroy_shape(&mut self, handle: ShapeHandle) {
        if self.colliders.contains(handle) {
            self.dispatcher.unregister_shape(handle);
            self.colliders
                .remove(handle, &mut self.islands, &mut self.bodies, true);
        }
    }

    /// Whether the handle still refers to a live shape
    pub fn shape_is_valid(&self, handle: ShapeHandle) -> bool {
        self.colliders.contains(handle)
    }

    /// The body a shape is attached to
    pub fn body_of_shape(&self, handle: ShapeHandle) -> Option<BodyHandle> {
        self.colliders.get(handle)?.parent()
    }

    /// The entity a shape's owning body was created for
    pub fn entity_of_shape(&self, handle: ShapeHandle) -> Option<Entity> {
        self.entity_of_body(self.body_of_shape(handle)?)
    }

    // -- body state --------------------------------------------------------

    /// Position and rotation of a body
    pub fn body_position(&self, handle: BodyHandle) -> Option<(Vec2, f32)> {
        let body = self.bodies.get(handle)?;
        Some((*body.translation(), body.rotation().angle()))
    }

    /// Teleport a body, keeping its rotation
    pub fn set_body_position(&mut self, handle: BodyHandle, position: Vec2) -> bool {
        self.with_body(handle, |body| {
            body.set_translation(position, true);
        })
    }

    /// Set a body's rotation in radians
    pub fn set_body_rotation(&mut self, handle: BodyHandle, radians: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_rotation(Rotation::new(radians), true);
        })
    }

    /// Linear velocity of a body
    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|body| *body.linvel())
    }

    /// Set a body's linear velocity
    pub fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> bool {
        self.with_body(handle, |body| {
            body.set_linvel(velocity, true);
        })
    }

    /// Angular velocity of a body in radians per second
    pub fn angular_velocity(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(rapier2d::prelude::RigidBody::angvel)
    }

    /// Set a body's angular velocity in radians per second
    pub fn set_angular_velocity(&mut self, handle: BodyHandle, velocity: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_angvel(velocity, true);
        })
    }

    /// Per-body gravity multiplier
    pub fn gravity_scale(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies
            .get(handle)
            .map(rapier2d::prelude::RigidBody::gravity_scale)
    }

    /// Set a body's gravity multiplier
    pub fn set_gravity_scale(&mut self, handle: BodyHandle, scale: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_gravity_scale(scale, true);
        })
    }

    /// Mass of a body including attached shapes
    pub fn mass(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(rapier2d::prelude::RigidBody::mass)
    }

    /// Add mass on top of what the shapes contribute
    pub fn set_additional_mass(&mut self, handle: BodyHandle, mass: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_additional_mass(mass, true);
        })
    }

    /// Linear damping of a body
    pub fn linear_damping(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies
            .get(handle)
            .map(rapier2d::prelude::RigidBody::linear_damping)
    }

    /// Set a body's linear damping
    pub fn set_linear_damping(&mut self, handle: BodyHandle, damping: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_linear_damping(damping);
        })
    }

    /// Set a body's angular damping
    pub fn set_angular_damping(&mut self, handle: BodyHandle, damping: f32) -> bool {
        self.with_body(handle, |body| {
            body.set_angular_damping(damping);
        })
    }

    /// Prevent or allow the body rotating under simulation
    pub fn lock_rotation(&mut self, handle: BodyHandle, locked: bool) -> bool {
        self.with_body(handle, |body| {
            body.lock_rotations(locked, true);
        })
    }

    /// Include or exclude the body from simulation without destroying it
    pub fn set_body_enabled(&mut self, handle: BodyHandle, enabled: bool) -> bool {
        self.with_body(handle, |body| {
            body.set_enabled(enabled);
        })
    }

    /// Whether the body participates in simulation
    pub fn body_enabled(&self, handle: BodyHandle) -> Option<bool> {
        self.bodies
            .get(handle)
            .map(rapier2d::prelude::RigidBody::is_enabled)
    }

    fn with_body(
        &mut self,
        handle: BodyHandle,
        apply: impl FnOnce(&mut rapier2d::prelude::RigidBody),
    ) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                apply(body);
                true
            }
            None => false,
        }
    }

    // -- shape state -------------------------------------------------------

    /// Half-extents of a box shape.
    ///
    /// Fails with [`PhysicsError::ShapeMismatch`] if the backend shape is
    /// not a box; that means the component and solver disagree about the
    /// shape's identity and continuing would corrupt gameplay state.
    pub fn box_half_extents(&self, handle: ShapeHandle) -> Result<Vec2, PhysicsError> {
        let collider = self.colliders.get(handle).ok_or(PhysicsError::InvalidShape)?;
        let cuboid = collider
            .shape()
            .as_cuboid()
            .ok_or(PhysicsError::ShapeMismatch { expected: "box" })?;
        Ok(cuboid.half_extents)
    }

    /// Resize a box shape
    pub fn set_box_half_extents(
        &mut self,
        handle: ShapeHandle,
        half_extents: Vec2,
    ) -> Result<(), PhysicsError> {
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or(PhysicsError::InvalidShape)?;
        if collider.shape().as_cuboid().is_none() {
            return Err(PhysicsError::ShapeMismatch { expected: "box" });
        }
        collider.set_shape(SharedShape::cuboid(
            half_extents.x.abs(),
            half_extents.y.abs(),
        ));
        Ok(())
    }

    /// Radius of a circle shape
    pub fn circle_radius(&self, handle: ShapeHandle) -> Result<f32, PhysicsError> {
        let collider = self.colliders.get(handle).ok_or(PhysicsError::InvalidShape)?;
        let ball = collider
            .shape()
            .as_ball()
            .ok_or(PhysicsError::ShapeMismatch { expected: "circle" })?;
        Ok(ball.radius)
    }

    /// Resize a circle shape
    pub fn set_circle_radius(
        &mut self,
        handle: ShapeHandle,
        radius: f32,
    ) -> Result<(), PhysicsError> {
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or(PhysicsError::InvalidShape)?;
        if collider.shape().as_ball().is_none() {
            return Err(PhysicsError::ShapeMismatch { expected: "circle" });
        }
        collider.set_shape(SharedShape::ball(radius.abs()));
        Ok(())
    }

    /// Offset of a shape relative to its body origin
    pub fn shape_offset(&self, handle: ShapeHandle) -> Option<Vec2> {
        self.colliders
            .get(handle)?
            .position_wrt_parent()
            .map(|iso| iso.translation.vector)
    }

    /// Move a shape relative to its body origin, keeping its local
    /// rotation
    pub fn set_shape_offset(&mut self, handle: ShapeHandle, offset: Vec2) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                let rotation = collider
                    .position_wrt_parent()
                    .map_or(0.0, |iso| iso.rotation.angle());
                collider.set_position_wrt_parent(Isometry::new(offset, rotation));
                true
            }
            None => false,
        }
    }

    /// Rotation of a shape relative to its body origin, in radians
    pub fn shape_rotation(&self, handle: ShapeHandle) -> Option<f32> {
        self.colliders
            .get(handle)?
            .position_wrt_parent()
            .map(|iso| iso.rotation.angle())
    }

    /// Rotate a shape relative to its body origin, keeping its offset
    pub fn set_shape_rotation(&mut self, handle: ShapeHandle, radians: f32) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                let offset = collider
                    .position_wrt_parent()
                    .map_or_else(|| Vec2::new(0.0, 0.0), |iso| iso.translation.vector);
                collider.set_position_wrt_parent(Isometry::new(offset, radians));
                true
            }
            None => false,
        }
    }

    /// Surface friction of a shape
    pub fn set_friction(&mut self, handle: ShapeHandle, friction: f32) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                collider.set_friction(friction);
                true
            }
            None => false,
        }
    }

    /// Bounciness of a shape
    pub fn set_restitution(&mut self, handle: ShapeHandle, restitution: f32) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                collider.set_restitution(restitution);
                true
            }
            None => false,
        }
    }

    /// Opt a shape in or out of contact event reporting.
    ///
    /// Contact events are off by default; shapes with events disabled never
    /// reach the dispatcher even if callbacks are registered.
    pub fn set_contact_events_enabled(&mut self, handle: ShapeHandle, enabled: bool) -> bool {
        match self.colliders.get_mut(handle) {
            Some(collider) => {
                let events = if enabled {
                    ActiveEvents::COLLISION_EVENTS | ActiveEvents::CONTACT_FORCE_EVENTS
                } else {
                    ActiveEvents::empty()
                };
                collider.set_active_events(events);
                true
            }
            None => false,
        }
    }

    /// Whether the shape reports contact events
    pub fn contact_events_enabled(&self, handle: ShapeHandle) -> bool {
        self.colliders
            .get(handle)
            .is_some_and(|collider| {
                collider
                    .active_events()
                    .contains(ActiveEvents::COLLISION_EVENTS)
            })
    }

    pub(crate) fn query_parts(&self) -> (&RigidBodySet, &ColliderSet, &QueryPipeline) {
        (&self.bodies, &self.colliders, &self.query_pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Registry;
    use approx::assert_relative_eq;

    fn spawn_entity() -> Entity {
        Registry::new().create_entity()
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let body = world.create_body(entity, Vec2::new(0.0, 10.0), 0.0, BodyType::Dynamic);

        for _ in 0..50 {
            world.step(1.0 / 50.0);
        }

        let (position, _) = world.body_position(body).expect("body alive");
        assert!(position.y < 10.0, "body did not fall: y = {}", position.y);
    }

    #[test]
    fn static_body_never_moves() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let body = world.create_body(entity, Vec2::new(2.0, 3.0), 0.0, BodyType::Static);

        for _ in 0..20 {
            world.step(1.0 / 50.0);
        }

        let (position, _) = world.body_position(body).expect("body alive");
        assert_relative_eq!(position.x, 2.0);
        assert_relative_eq!(position.y, 3.0);
    }

    #[test]
    fn dynamic_body_without_shapes_keeps_a_unit_mass() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let body = world.create_body(entity, Vec2::new(0.0, 0.0), 0.0, BodyType::Dynamic);
        assert_relative_eq!(world.mass(body).expect("body alive"), 1.0);
    }

    #[test]
    fn body_round_trips_its_entity() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let body = world.create_body(entity, Vec2::new(0.0, 0.0), 0.0, BodyType::Dynamic);
        assert_eq!(world.entity_of_body(body), Some(entity));
    }

    #[test]
    fn shape_sizing_follows_transform_scale() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let transform =
            Transform2D::from_position_scale(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        let body = world.create_body(
            entity,
            transform.position,
            transform.rotation,
            BodyType::Static,
        );

        let cube = world
            .create_shape(body, ShapeKind::Box, &transform)
            .unwrap();
        let half = world.box_half_extents(cube).unwrap();
        assert_relative_eq!(half.x, 2.0);
        assert_relative_eq!(half.y, 1.0);

        let ball = world
            .create_shape(body, ShapeKind::Circle, &transform)
            .unwrap();
        assert_relative_eq!(world.circle_radius(ball).unwrap(), 1.5);
    }

    #[test]
    fn shape_creation_snaps_body_onto_transform() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let transform = Transform2D::from_position(Vec2::new(5.0, -3.0));
        // body deliberately created somewhere else
        let body = world.create_body(entity, Vec2::new(0.0, 0.0), 0.0, BodyType::Static);
        world
            .create_shape(body, ShapeKind::Box, &transform)
            .unwrap();

        let (position, _) = world.body_position(body).unwrap();
        assert_relative_eq!(position.x, 5.0);
        assert_relative_eq!(position.y, -3.0);
    }

    #[test]
    fn shape_mismatch_is_a_hard_error() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let transform = Transform2D::default();
        let body = world.create_body(entity, Vec2::new(0.0, 0.0), 0.0, BodyType::Static);
        let ball = world
            .create_shape(body, ShapeKind::Circle, &transform)
            .unwrap();

        assert!(matches!(
            world.box_half_extents(ball),
            Err(PhysicsError::ShapeMismatch { expected: "box" })
        ));
        assert!(matches!(
            world.set_box_half_extents(ball, Vec2::new(1.0, 1.0)),
            Err(PhysicsError::ShapeMismatch { expected: "box" })
        ));
    }

    #[test]
    fn stale_handles_are_inert() {
        let mut world = PhysicsWorld::default();
        let entity = spawn_entity();
        let transform = Transform2D::default();
        let body = world.create_body(entity, Vec2::new(0.0, 0.0), 0.0, BodyType::Dynamic);
        let shape = world
            .create_shape(body, ShapeKind::Box, &transform)
            .unwrap();

        world.destroy_body(body);
        assert!(!world.body_is_valid(body));
        assert!(!world.shape_is_valid(shape));

        assert!(!world.set_linear_velocity(body, Vec2::new(1.0, 0.0)));
        assert!(world.linear_velocity(body).is_none());
        assert!(world.body_position(body).is_none());
        assert!(matches!(
            world.box_half_extents(shape),
            Err(PhysicsError::InvalidShape)
        ));

        // double destroy is a no-op
        world.destroy_body(body);
        world.destroy_shape(shape);
    }

    #[test]
    fn overlapping_shapes_with_events_enabled_dispatch_begin() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut world = PhysicsWorld::new(Vec2::new(0.0, 0.0), 4);
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        let transform = Transform2D::default();

        let body_a = world.create_body(a, Vec2::new(0.0, 0.0), 0.0, BodyType::Dynamic);
        let shape_a = world
            .create_shape(body_a, ShapeKind::Box, &transform)
            .unwrap();
        let body_b = world.create_body(b, Vec2::new(0.25, 0.0), 0.0, BodyType::Dynamic);
        let shape_b = world
            .create_shape(body_b, ShapeKind::Box, &Transform2D::from_position(Vec2::new(0.25, 0.0)))
            .unwrap();

        world.set_contact_events_enabled(shape_a, true);
        world.set_contact_events_enabled(shape_b, true);

        let begins = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&begins);
        world
            .dispatcher_mut()
            .register_begin(shape_a, move |_| *sink.borrow_mut() += 1);

        world.step(1.0 / 50.0);
        assert_eq!(*begins.borrow(), 1);
    }

    #[test]
    fn shapes_without_events_stay_silent() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut world = PhysicsWorld::new(Vec2::new(0.0, 0.0), 4);
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        let transform = Transform2D::default();

        let body_a = world.create_body(a, Vec2::new(0.0, 0.0), 0.0, BodyType::Dynamic);
        let shape_a = world
            .create_shape(body_a, ShapeKind::Box, &transform)
            .unwrap();
        let body_b = world.create_body(b, Vec2::new(0.25, 0.0), 0.0, BodyType::Dynamic);
        world
            .create_shape(body_b, ShapeKind::Box, &Transform2D::from_position(Vec2::new(0.25, 0.0)))
            .unwrap();

        assert!(!world.contact_events_enabled(shape_a));
        let begins = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&begins);
        world
            .dispatcher_mut()
            .register_begin(shape_a, move |_| *sink.borrow_mut() += 1);

        world.step(1.0 / 50.0);
        assert_eq!(*begins.borrow(), 0);
    }
}
