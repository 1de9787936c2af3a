//! Spatial math utilities
//!
//! Axis-aligned bounding boxes used by view-frustum culling, the gizmo
//! overlay, and physics-adjacent code.

pub mod aabb;

pub use aabb::Aabb;
