//! Sprite rendering and debug overlay
//!
//! The render pass walks a scene's sprites, culls against the active
//! camera's view rectangle, buckets the survivors by `(layer, texture)`
//! and emits one instanced draw per bucket through the [`RenderBackend`]
//! trait. GPU submission, windowing and texture decoding live on the other
//! side of that trait.

pub mod backend;
pub mod camera;
pub mod gizmos;
pub mod profiler;
pub mod sprite_pass;
pub mod texture;

pub use backend::{DrawCall, RecordingBackend, RenderBackend, SpriteInstance};
pub use camera::Camera;
pub use gizmos::Gizmos;
pub use profiler::{CollectingProfiler, NullProfiler, ProfilerSink};
pub use sprite_pass::{RenderStats, SpriteRenderSystem};
pub use texture::{TextureHandle, TextureInfo, TexturePool};
