//! Entity-Component-System implementation
//!
//! Entities are generation-checked handles into column-oriented component
//! storage. A registry owns all entities and components of one scene.

pub mod components;
pub mod entity;
pub mod registry;

pub use entity::Entity;
pub use registry::{Component, EcsError, Registry};
