//! # Ember2D
//!
//! A modular 2D game engine core built around three tightly coupled
//! subsystems:
//!
//! - **Scenes & ECS**: an entity registry with typed component columns,
//!   singleton queries, and a per-scene system list driven through
//!   awake/start/update/fixed-update/destroy phases.
//! - **Physics bridge**: a thin ownership layer over the `rapier2d`
//!   rigid-body solver that mirrors entity transforms into bodies and
//!   shapes, steps the simulation at a fixed rate, and dispatches
//!   begin/end/hit contact events to per-shape callbacks.
//! - **Sprite rendering**: a frustum-culled, (layer, texture)-bucketed
//!   instanced sprite pass behind a backend trait, plus an immediate-mode
//!   gizmo overlay for debugging.
//!
//! Windowing, input, GPU submission, texture decoding and the profiler UI
//! are external collaborators; this crate talks to them through the
//! [`render::RenderBackend`] and [`render::ProfilerSink`] traits and the
//! [`render::TexturePool`].
//!
//! ## Quick Start
//!
//! ```rust
//! use ember2d::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.scene_manager_mut().create_scene("level-1");
//! engine.scene_manager_mut().load_scene("level-1").unwrap();
//!
//! let mut backend = RecordingBackend::default();
//! engine.advance(1.0 / 60.0, &mut backend);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;
pub mod spatial;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::EngineConfig,
        ecs::{
            components::{SpriteRenderer, Transform2D},
            Component, EcsError, Entity, Registry,
        },
        engine::{Engine, EngineError},
        foundation::{
            math::Vec2,
            time::{FixedTimestep, FrameTime, Timer},
        },
        physics::{
            BodyType, BoxCollider, CircleCollider, Collider, ContactBegin, ContactEnd,
            ContactHit, OverlapMode, PhysicsError, PhysicsWorld, RaycastHit, RigidBody,
        },
        render::{
            Camera, CollectingProfiler, Gizmos, NullProfiler, ProfilerSink, RecordingBackend,
            RenderBackend, SpriteRenderSystem, TextureHandle, TexturePool,
        },
        scene::{Scene, SceneContext, SceneError, SceneManager, System},
        spatial::Aabb,
    };
}
