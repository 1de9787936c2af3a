//! Texture registry
//!
//! The engine never decodes or uploads image data; the embedding
//! application registers its textures here and receives stable handles to
//! put on sprites. Handles are generation checked, so a handle to a
//! removed texture resolves to `None` instead of aliasing a newer one.

use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Vec2;

/// Generation-checked reference to a registered texture
pub type TextureHandle = TypedHandle<TextureInfo>;

/// Metadata the renderer keeps per texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    /// Name the texture was registered under, used in log messages
    pub name: String,
    /// Pixel width of the source image
    pub width: u32,
    /// Pixel height of the source image
    pub height: u32,
}

impl TextureInfo {
    /// Aspect-normalized quad size: the longer axis is 1, the shorter
    /// shrinks proportionally. A unit-scale sprite keeps the image's
    /// proportions.
    pub fn aspect_size(&self) -> Vec2 {
        if self.width == 0 || self.height == 0 {
            return Vec2::new(1.0, 1.0);
        }
        let w = self.width as f32;
        let h = self.height as f32;
        if w >= h {
            Vec2::new(1.0, h / w)
        } else {
            Vec2::new(w / h, 1.0)
        }
    }
}

/// Pool of registered textures
#[derive(Default)]
pub struct TexturePool {
    textures: HandleMap<TextureInfo>,
}

impl TexturePool {
    /// Empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture and get a handle for sprites to reference
    pub fn register(&mut self, name: impl Into<String>, width: u32, height: u32) -> TextureHandle {
        let key = self.textures.insert(TextureInfo {
            name: name.into(),
            width,
            height,
        });
        TextureHandle::new(key)
    }

    /// Look up a texture, `None` if the handle is stale
    pub fn get(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(handle.key())
    }

    /// Whether the handle refers to a live texture
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(handle.key())
    }

    /// Remove a texture; sprites still holding the handle are skipped at
    /// render time
    pub fn remove(&mut self, handle: TextureHandle) -> Option<TextureInfo> {
        self.textures.remove(handle.key())
    }

    /// Number of live textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the pool holds no textures
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_size_preserves_proportions() {
        let wide = TextureInfo {
            name: "wide".into(),
            width: 200,
            height: 100,
        };
        assert_relative_eq!(wide.aspect_size().x, 1.0);
        assert_relative_eq!(wide.aspect_size().y, 0.5);

        let tall = TextureInfo {
            name: "tall".into(),
            width: 50,
            height: 100,
        };
        assert_relative_eq!(tall.aspect_size().x, 0.5);
        assert_relative_eq!(tall.aspect_size().y, 1.0);
    }

    #[test]
    fn removed_texture_handle_goes_stale() {
        let mut pool = TexturePool::new();
        let handle = pool.register("ship", 64, 64);
        assert!(pool.contains(handle));
        assert_eq!(pool.get(handle).map(|t| t.name.as_str()), Some("ship"));

        pool.remove(handle);
        assert!(!pool.contains(handle));
        assert!(pool.get(handle).is_none());

        let _other = pool.register("rock", 32, 32);
        assert!(pool.get(handle).is_none());
    }
}
