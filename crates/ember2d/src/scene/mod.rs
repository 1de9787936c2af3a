//! Scenes and the system lifecycle
//!
//! A scene is an entity registry plus an ordered list of gameplay systems.
//! Systems run through phases (awake, start, update, fixed update,
//! disable, destroy) and receive a [`SceneContext`] giving access to the
//! registry, the shared physics world, the gizmo queue and frame timing.
//! A failing system is logged and isolated; its siblings still run.

pub mod context;
pub mod scene;
pub mod scene_manager;
pub mod system;

pub use context::SceneContext;
pub use scene::Scene;
pub use scene_manager::{SceneError, SceneManager};
pub use system::System;
