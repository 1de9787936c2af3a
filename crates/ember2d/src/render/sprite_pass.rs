//! Batched sprite pass
//!
//! Culls sprites against the camera view, buckets the survivors by
//! `(layer, texture)` and issues one instanced draw per bucket. Layers
//! draw in ascending order; texture order inside a layer is unspecified.
//! Sprites pointing at a stale texture handle are skipped with a warning
//! rather than aborting the frame.

use super::backend::{RenderBackend, SpriteInstance};
use super::gizmos::Gizmos;
use super::profiler::ProfilerSink;
use super::texture::{TextureHandle, TexturePool};
use crate::ecs::components::{SpriteRenderer, Transform2D};
use crate::ecs::Registry;
use crate::spatial::Aabb;
use std::collections::{BTreeMap, HashMap};

const NO_CAMERA_WARN_INTERVAL: f32 = 1.0;

/// Counters for one rendered frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Instanced draw calls issued
    pub batches: u32,
    /// Sprites that survived culling and were drawn
    pub visible_sprites: u32,
    /// Sprites rejected by visibility or view culling
    pub culled_sprites: u32,
    /// Triangles submitted, two per visible sprite
    pub triangles: u32,
    /// Vertices submitted, four per visible sprite quad
    pub vertices: u32,
}

/// The engine's sprite renderer
pub struct SpriteRenderSystem {
    stats: RenderStats,
    last_no_camera_warn: Option<f32>,
}

impl Default for SpriteRenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteRenderSystem {
    /// Renderer with zeroed stats
    pub fn new() -> Self {
        Self {
            stats: RenderStats::default(),
            last_no_camera_warn: None,
        }
    }

    /// Reset the frame counters, called before the first scene of a frame
    pub fn begin_frame(&mut self) {
        self.stats = RenderStats::default();
    }

    /// Cull, bucket and draw one scene's sprites
    pub fn render_scene(
        &mut self,
        registry: &Registry,
        view: Aabb,
        textures: &TexturePool,
        backend: &mut dyn RenderBackend,
    ) {
        let mut buckets: BTreeMap<i16, HashMap<TextureHandle, Vec<SpriteInstance>>> =
            BTreeMap::new();

        for (_, transform, sprite) in registry.view2::<Transform2D, SpriteRenderer>() {
            if sprite.is_invisible() {
                self.stats.culled_sprites += 1;
                continue;
            }
            if !Aabb::intersects(Aabb::from_transform(transform), view) {
                self.stats.culled_sprites += 1;
                continue;
            }
            buckets
                .entry(sprite.layer)
                .or_default()
                .entry(sprite.texture)
                .or_default()
                .push(SpriteInstance {
                    model: transform.model_matrix().into(),
                    color: sprite.color,
                });
        }

        for textured in buckets.values() {
            for (texture, instances) in textured {
                if !textures.contains(*texture) {
                    log::warn!("skipping sprite batch with stale texture handle");
                    continue;
                }
                backend.bind_texture(*texture);
                backend.draw_sprite_instances(instances);
                self.stats.batches += 1;
                self.stats.visible_sprites += instances.len() as u32;
            }
        }

        self.stats.triangles = self.stats.visible_sprites * 2;
        self.stats.vertices = self.stats.visible_sprites * 4;
    }

    /// Draw the queued debug overlay on top of the sprites
    pub fn render_gizmos(&self, gizmos: &Gizmos, backend: &mut dyn RenderBackend) {
        for gizmo in gizmos.boxes() {
            backend.draw_gizmo_box(gizmo.center, gizmo.half_extents, gizmo.rotation, gizmo.color);
        }
        for gizmo in gizmos.circles() {
            backend.draw_gizmo_circle(gizmo.center, gizmo.radius, gizmo.segments, gizmo.color);
        }
        for gizmo in gizmos.lines() {
            backend.draw_gizmo_line(gizmo.start, gizmo.end, gizmo.color);
        }
    }

    /// Push the frame counters to the profiler, called once per frame
    pub fn end_frame(&self, profiler: &mut dyn ProfilerSink) {
        profiler.record("render.batches", f64::from(self.stats.batches));
        profiler.record("render.visible_sprites", f64::from(self.stats.visible_sprites));
        profiler.record("render.culled_sprites", f64::from(self.stats.culled_sprites));
        profiler.record("render.triangles", f64::from(self.stats.triangles));
        profiler.record("render.vertices", f64::from(self.stats.vertices));
    }

    /// Warn that no camera exists, at most once per second of engine time
    pub fn warn_no_camera(&mut self, elapsed: f32) {
        let due = self
            .last_no_camera_warn
            .map_or(true, |last| elapsed - last >= NO_CAMERA_WARN_INTERVAL);
        if due {
            log::warn!("no active camera, skipping render");
            self.last_no_camera_warn = Some(elapsed);
        }
    }

    /// Counters for the frame rendered last
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}
