//! Built-in engine components

pub mod sprite;
pub mod transform;

pub use sprite::SpriteRenderer;
pub use transform::Transform2D;
