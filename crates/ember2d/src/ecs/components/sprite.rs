//! Sprite renderer component

use crate::ecs::Component;
use crate::render::TextureHandle;

/// Marks an entity as a drawable sprite.
///
/// The render pass buckets visible sprites by `(layer, texture)`; lower
/// layers draw first (further back). A color alpha of zero or below makes
/// the sprite invisible and skips it before culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRenderer {
    /// Texture bound for this sprite's batch
    pub texture: TextureHandle,
    /// Render layer sort key; ascending layers draw back to front
    pub layer: i16,
    /// RGBA tint, multiplied over the texture
    pub color: [f32; 4],
}

impl Component for SpriteRenderer {}

impl SpriteRenderer {
    /// Sprite on layer 0 with a white tint
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            layer: 0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Sprite with explicit layer and tint
    pub fn with_layer_color(texture: TextureHandle, layer: i16, color: [f32; 4]) -> Self {
        Self {
            texture,
            layer,
            color,
        }
    }

    /// Whether the sprite is fully transparent and should be skipped
    pub fn is_invisible(&self) -> bool {
        self.color[3] <= 0.0
    }
}
