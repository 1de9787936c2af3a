//! Orthographic camera component

use crate::ecs::Component;
use crate::foundation::math::Vec2;
use crate::spatial::Aabb;

/// Orthographic 2D camera.
///
/// Exactly one entity per scene should hold a camera; the render pass
/// finds it with a singleton query and warns (throttled) when none
/// exists. `orthographic_size` is half the vertical extent of the view in
/// world units; the horizontal extent follows the viewport aspect ratio.
/// The camera's world position comes from its entity's transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    viewport_width: u32,
    viewport_height: u32,
    orthographic_size: f32,
}

impl Component for Camera {}

impl Camera {
    /// Camera for a viewport of the given pixel size, seeing 10 world
    /// units vertically
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            orthographic_size: 5.0,
        }
    }

    /// Resize the viewport, typically on window resize
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Half the vertical view extent in world units
    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    /// Zoom by changing the vertical view extent
    pub fn set_orthographic_size(&mut self, size: f32) {
        self.orthographic_size = size.max(f32::EPSILON);
    }

    /// Viewport aspect ratio, width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_height == 0 {
            return 1.0;
        }
        self.viewport_width as f32 / self.viewport_height as f32
    }

    /// Size of the visible world rectangle
    pub fn world_viewport(&self) -> Vec2 {
        let height = 2.0 * self.orthographic_size;
        Vec2::new(height * self.aspect_ratio(), height)
    }

    /// Visible world rectangle for a camera at `position`
    pub fn view_aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_center_half_extents(position, self.world_viewport() * 0.5)
    }

    /// Map a screen pixel (origin top-left, y down) to world space
    pub fn screen_to_world(&self, screen: Vec2, camera_position: Vec2) -> Vec2 {
        let viewport = self.world_viewport();
        let ndc_x = if self.viewport_width == 0 {
            0.0
        } else {
            screen.x / self.viewport_width as f32 * 2.0 - 1.0
        };
        let ndc_y = if self.viewport_height == 0 {
            0.0
        } else {
            1.0 - screen.y / self.viewport_height as f32 * 2.0
        };
        camera_position + Vec2::new(ndc_x * viewport.x * 0.5, ndc_y * viewport.y * 0.5)
    }
}
