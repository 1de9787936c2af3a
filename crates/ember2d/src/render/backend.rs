//! Render backend boundary
//!
//! Everything GPU-shaped happens behind [`RenderBackend`]. The sprite pass
//! produces instance buffers and draw calls; a real implementation turns
//! them into API submissions, and [`RecordingBackend`] captures them for
//! tests and headless runs.

use super::texture::TextureHandle;
use crate::foundation::math::Vec2;

/// One sprite in an instanced draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInstance {
    /// Column-major 3x3 model matrix
    pub model: [[f32; 3]; 3],
    /// RGBA tint
    pub color: [f32; 4],
}

/// Consumer of the engine's draw stream
pub trait RenderBackend {
    /// Upload the camera for this frame
    fn set_camera(&mut self, center: Vec2, world_viewport: Vec2);

    /// Bind the texture used by the next instanced draw
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Draw every instance in the slice with the bound texture
    fn draw_sprite_instances(&mut self, instances: &[SpriteInstance]);

    /// Overlay an unfilled rotated box
    fn draw_gizmo_box(&mut self, center: Vec2, half_extents: Vec2, radians: f32, color: [f32; 4]);

    /// Overlay an unfilled circle approximated with `segments` edges
    fn draw_gizmo_circle(&mut self, center: Vec2, radius: f32, segments: u32, color: [f32; 4]);

    /// Overlay a line segment
    fn draw_gizmo_line(&mut self, start: Vec2, end: Vec2, color: [f32; 4]);
}

/// One recorded instanced draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Texture bound when the draw was issued
    pub texture: TextureHandle,
    /// Number of instances in the draw
    pub instance_count: usize,
}

/// Backend that records the draw stream instead of submitting it.
///
/// Used by tests and headless tools to assert on batching and culling
/// without a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Last camera uploaded with [`RenderBackend::set_camera`]
    pub camera: Option<(Vec2, Vec2)>,
    /// Instanced draws in submission order
    pub draws: Vec<DrawCall>,
    /// Gizmo primitives overlaid this frame
    pub gizmo_primitives: usize,
    bound: Option<TextureHandle>,
}

impl RecordingBackend {
    /// Total instances across all recorded draws
    pub fn total_instances(&self) -> usize {
        self.draws.iter().map(|draw| draw.instance_count).sum()
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.camera = None;
        self.draws.clear();
        self.gizmo_primitives = 0;
        self.bound = None;
    }
}

impl RenderBackend for RecordingBackend {
    fn set_camera(&mut self, center: Vec2, world_viewport: Vec2) {
        self.camera = Some((center, world_viewport));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.bound = Some(texture);
    }

    fn draw_sprite_instances(&mut self, instances: &[SpriteInstance]) {
        if let Some(texture) = self.bound {
            self.draws.push(DrawCall {
                texture,
                instance_count: instances.len(),
            });
        }
    }

    fn draw_gizmo_box(
        &mut self,
        _center: Vec2,
        _half_extents: Vec2,
        _radians: f32,
        _color: [f32; 4],
    ) {
        self.gizmo_primitives += 1;
    }

    fn draw_gizmo_circle(&mut self, _center: Vec2, _radius: f32, _segments: u32, _color: [f32; 4]) {
        self.gizmo_primitives += 1;
    }

    fn draw_gizmo_line(&mut self, _start: Vec2, _end: Vec2, _color: [f32; 4]) {
        self.gizmo_primitives += 1;
    }
}
