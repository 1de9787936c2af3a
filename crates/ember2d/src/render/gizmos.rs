//! Immediate-mode debug overlay
//!
//! Systems enqueue boxes, circles and lines during update; the engine
//! draws and clears the queue at the end of the frame. Enqueueing culls
//! against the previous frame's camera view and stops accepting
//! primitives once the vertex budget is exhausted, so a runaway debug
//! loop degrades to dropped gizmos instead of unbounded memory.

use crate::foundation::math::Vec2;
use crate::spatial::Aabb;

const BOX_VERTICES: usize = 4;
const LINE_VERTICES: usize = 2;

/// Default color for primitives enqueued without an explicit color
pub const DEFAULT_GIZMO_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Queued unfilled box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoBox {
    /// World-space center
    pub center: Vec2,
    /// Half the box size along each axis
    pub half_extents: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// RGBA line color
    pub color: [f32; 4],
}

/// Queued unfilled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoCircle {
    /// World-space center
    pub center: Vec2,
    /// Circle radius
    pub radius: f32,
    /// Number of line segments approximating the circle
    pub segments: u32,
    /// RGBA line color
    pub color: [f32; 4],
}

/// Queued line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoLine {
    /// Segment start in world space
    pub start: Vec2,
    /// Segment end in world space
    pub end: Vec2,
    /// RGBA line color
    pub color: [f32; 4],
}

/// Per-frame queue of debug primitives
pub struct Gizmos {
    boxes: Vec<GizmoBox>,
    circles: Vec<GizmoCircle>,
    lines: Vec<GizmoLine>,
    view: Aabb,
    vertex_budget: usize,
    queued_vertices: usize,
    dropped: usize,
    /// Color applied to subsequently enqueued primitives
    pub color: [f32; 4],
    /// Master switch; when off, enqueue calls are ignored
    pub enabled: bool,
}

impl Default for Gizmos {
    fn default() -> Self {
        Self::new(16 * 1024)
    }
}

impl Gizmos {
    /// Queue with the given vertex budget
    pub fn new(vertex_budget: usize) -> Self {
        Self {
            boxes: Vec::new(),
            circles: Vec::new(),
            lines: Vec::new(),
            // everything is "visible" until the first frame provides a view
            view: Aabb {
                min: Vec2::new(f32::MIN * 0.5, f32::MIN * 0.5),
                max: Vec2::new(f32::MAX * 0.5, f32::MAX * 0.5),
            },
            vertex_budget,
            queued_vertices: 0,
            dropped: 0,
            color: DEFAULT_GIZMO_COLOR,
            enabled: true,
        }
    }

    /// Update the culling rectangle, called once per frame by the engine
    pub fn set_view_aabb(&mut self, view: Aabb) {
        self.view = view;
    }

    /// Enqueue an unfilled box. `size` is the full box size; rotation is
    /// in radians.
    pub fn draw_box(&mut self, center: Vec2, size: Vec2, rotation: f32) {
        let half_extents = size * 0.5;
        let bounds = Aabb::from_oriented_box(center, half_extents, rotation);
        if !self.admit(bounds, BOX_VERTICES) {
            return;
        }
        self.boxes.push(GizmoBox {
            center,
            half_extents,
            rotation,
            color: self.color,
        });
    }

    /// Enqueue an unfilled circle
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, segments: u32) {
        let bounds = Aabb::from_center_half_extents(center, Vec2::new(radius, radius));
        if !self.admit(bounds, segments.max(3) as usize) {
            return;
        }
        self.circles.push(GizmoCircle {
            center,
            radius,
            segments: segments.max(3),
            color: self.color,
        });
    }

    /// Enqueue a line segment
    pub fn draw_line(&mut self, start: Vec2, end: Vec2) {
        let bounds = Aabb {
            min: crate::foundation::math::min2(start, end),
            max: crate::foundation::math::max2(start, end),
        };
        if !self.admit(bounds, LINE_VERTICES) {
            return;
        }
        self.lines.push(GizmoLine {
            start,
            end,
            color: self.color,
        });
    }

    fn admit(&mut self, bounds: Aabb, vertices: usize) -> bool {
        if !self.enabled {
            return false;
        }
        if !Aabb::intersects(bounds, self.view) {
            return false;
        }
        if self.queued_vertices + vertices > self.vertex_budget {
            self.dropped += 1;
            return false;
        }
        self.queued_vertices += vertices;
        true
    }

    /// Queued boxes, in enqueue order
    pub fn boxes(&self) -> &[GizmoBox] {
        &self.boxes
    }

    /// Queued circles, in enqueue order
    pub fn circles(&self) -> &[GizmoCircle] {
        &self.circles
    }

    /// Queued lines, in enqueue order
    pub fn lines(&self) -> &[GizmoLine] {
        &self.lines
    }

    /// Vertices consumed by the queued primitives
    pub fn queued_vertices(&self) -> usize {
        self.queued_vertices
    }

    /// Primitives dropped since the last clear because the budget was
    /// exhausted
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Drop all queued primitives, called after the overlay is drawn
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.circles.clear();
        self.lines.clear();
        self.queued_vertices = 0;
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_accumulate_until_cleared() {
        let mut gizmos = Gizmos::default();
        gizmos.draw_box(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        gizmos.draw_circle(Vec2::new(1.0, 1.0), 0.5, 16);
        gizmos.draw_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));

        assert_eq!(gizmos.boxes().len(), 1);
        assert_eq!(gizmos.circles().len(), 1);
        assert_eq!(gizmos.lines().len(), 1);
        assert_eq!(gizmos.queued_vertices(), 4 + 16 + 2);

        gizmos.clear();
        assert_eq!(gizmos.queued_vertices(), 0);
        assert!(gizmos.boxes().is_empty());
    }

    #[test]
    fn offscreen_primitives_are_dropped_at_enqueue() {
        let mut gizmos = Gizmos::default();
        gizmos.set_view_aabb(Aabb {
            min: Vec2::new(-5.0, -5.0),
            max: Vec2::new(5.0, 5.0),
        });

        gizmos.draw_box(Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0), 0.0);
        assert!(gizmos.boxes().is_empty());

        // a rotated box whose envelope reaches into view is kept
        gizmos.draw_box(
            Vec2::new(5.5, 0.0),
            Vec2::new(2.0, 2.0),
            std::f32::consts::FRAC_PI_4,
        );
        assert_eq!(gizmos.boxes().len(), 1);
    }

    #[test]
    fn budget_exhaustion_drops_not_grows() {
        let mut gizmos = Gizmos::new(10);
        gizmos.draw_box(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        gizmos.draw_box(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        // 8 of 10 vertices used; a 4-vertex box no longer fits
        gizmos.draw_box(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
        assert_eq!(gizmos.boxes().len(), 2);
        assert_eq!(gizmos.dropped(), 1);

        // but a 2-vertex line still does
        gizmos.draw_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(gizmos.lines().len(), 1);
        assert_eq!(gizmos.queued_vertices(), 10);
    }

    #[test]
    fn disabled_queue_ignores_draws() {
        let mut gizmos = Gizmos::default();
        gizmos.enabled = false;
        gizmos.draw_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(gizmos.lines().is_empty());
    }
}
