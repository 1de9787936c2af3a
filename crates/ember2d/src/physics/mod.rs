//! Physics bridge
//!
//! Ownership layer over the external `rapier2d` rigid-body solver. The
//! bridge creates and destroys bodies and shapes mirroring entity
//! transforms, steps the simulation at the engine's fixed rate, and routes
//! the step's begin/end/hit contact events into per-shape gameplay
//! callbacks.
//!
//! Every body is tagged with its originating entity id, so any handle the
//! solver reports later (collision events, queries) can be mapped back to
//! an entity. Handles are validated at every mutating entry point: a
//! destroyed body or shape is a no-op or "no result", never undefined
//! behavior.

pub mod collider;
pub mod dispatcher;
pub mod query;
pub mod rigid_body;
pub mod world;

pub use collider::{BoxCollider, CircleCollider, Collider};
pub use dispatcher::{
    CollisionDispatcher, ContactBegin, ContactEnd, ContactEvents, ContactHit,
};
pub use query::{OverlapMode, RaycastHit};
pub use rigid_body::RigidBody;
pub use world::PhysicsWorld;

use crate::ecs::components::Transform2D;
use crate::ecs::Registry;

/// Handle to one simulated rigid body in the physics world
pub type BodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to one collision shape attached to a body
pub type ShapeHandle = rapier2d::prelude::ColliderHandle;

/// Simulation role of a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// Never moves under simulation
    Static,
    /// Moves only when explicitly repositioned
    Kinematic,
    /// Fully simulated
    Dynamic,
}

/// Collision shape variants supported by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Axis-aligned box in body-local space, sized from the transform scale
    Box,
    /// Circle sized from the mean of the transform scale axes
    Circle,
}

/// Errors raised by the physics bridge
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    /// The body handle no longer refers to a live body
    #[error("body handle is no longer valid")]
    InvalidBody,

    /// The shape handle no longer refers to a live shape
    #[error("shape handle is no longer valid")]
    InvalidShape,

    /// A raycast was asked to travel along a zero-length direction
    #[error("raycast direction has zero length")]
    ZeroDirection,

    /// The backend shape does not match the component's expectation, which
    /// indicates an unrecoverable state mismatch between engine and solver
    #[error("shape is not a {expected} in the physics backend")]
    ShapeMismatch {
        /// Shape kind the component expected to find
        expected: &'static str,
    },
}

/// Write simulated body positions and rotations back into entity
/// transforms.
///
/// Runs once after each fixed step, before gameplay fixed-update systems,
/// for every entity holding a [`RigidBody`]. Bodies whose handle no longer
/// resolves are skipped.
pub fn sync_transforms(registry: &mut Registry, world: &PhysicsWorld) {
    for entity in registry.entities_with::<RigidBody>() {
        let Some(handle) = registry
            .get_component::<RigidBody>(entity)
            .map(RigidBody::handle)
        else {
            continue;
        };
        let Some((position, rotation)) = world.body_position(handle) else {
            continue;
        };
        if let Some(transform) = registry.get_component_mut::<Transform2D>(entity) {
            transform.position = position;
            transform.rotation = rotation;
        }
    }
}
