//! Engine frame loop
//!
//! Glue between the scene manager, the fixed-timestep accumulator and the
//! render pass. The embedding application owns the window and the real
//! clock; it calls [`Engine::frame`] (or [`Engine::advance`] with an
//! explicit delta) once per display frame and hands in its
//! [`RenderBackend`].

use crate::core::config::{ConfigError, EngineConfig};
use crate::ecs::EcsError;
use crate::foundation::math::Vec2;
use crate::foundation::time::{FixedTimestep, Timer};
use crate::physics::{PhysicsError, PhysicsWorld};
use crate::render::{
    Gizmos, NullProfiler, ProfilerSink, RenderBackend, SpriteRenderSystem, TexturePool,
};
use crate::scene::{SceneError, SceneManager};

/// Top-level error type surfaced by engine operations and system phases
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A registry contract was violated
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// Scene bookkeeping failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The physics bridge rejected an operation
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    /// The configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Free-form failure reported by a gameplay system
    #[error("{0}")]
    System(String),
}

/// The engine core: scenes, physics, fixed timing and the sprite pass
pub struct Engine {
    config: EngineConfig,
    scenes: SceneManager,
    sprites: SpriteRenderSystem,
    textures: TexturePool,
    profiler: Box<dyn ProfilerSink>,
    fixed: FixedTimestep,
    timer: Timer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Engine from a configuration. Invalid fields are reported and
    /// replaced by the defaults.
    pub fn new(config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::error!("{err}, falling back to default config");
                EngineConfig::default()
            }
        };
        let physics = PhysicsWorld::new(
            Vec2::new(config.gravity[0], config.gravity[1]),
            config.solver_iterations,
        );
        let gizmos = Gizmos::new(config.gizmo_vertex_budget);
        let scenes = SceneManager::new(physics, gizmos, config.fixed_timestep);
        let fixed = FixedTimestep::new(config.fixed_timestep, config.max_substeps);
        Self {
            config,
            scenes,
            sprites: SpriteRenderSystem::new(),
            textures: TexturePool::new(),
            profiler: Box::new(NullProfiler),
            fixed,
            timer: Timer::new(),
        }
    }

    /// The configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scene orchestration
    pub fn scene_manager(&self) -> &SceneManager {
        &self.scenes
    }

    /// Mutable scene orchestration
    pub fn scene_manager_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// Registered textures
    pub fn textures(&self) -> &TexturePool {
        &self.textures
    }

    /// Register and remove textures
    pub fn textures_mut(&mut self) -> &mut TexturePool {
        &mut self.textures
    }

    /// The sprite pass, for reading frame stats
    pub fn sprites(&self) -> &SpriteRenderSystem {
        &self.sprites
    }

    /// Replace the profiler sink frame counters are pushed to
    pub fn set_profiler(&mut self, profiler: Box<dyn ProfilerSink>) {
        self.profiler = profiler;
    }

    /// Change the time scale at runtime; 0 pauses simulation, values above
    /// 1 are clamped
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.clamp(0.0, 1.0);
    }

    /// Run one frame using the engine's own wall clock
    pub fn frame(&mut self, backend: &mut dyn RenderBackend) {
        self.timer.update();
        let delta = self.timer.delta_time();
        self.advance(delta, backend);
    }

    /// Run one frame with an explicit real-time delta in seconds.
    ///
    /// Order per frame: fixed catch-up steps (physics, contact dispatch,
    /// transform sync, fixed-update systems), then per-frame systems, then
    /// the render pass.
    pub fn advance(&mut self, delta: f32, backend: &mut dyn RenderBackend) {
        let scaled = delta * self.config.time_scale;
        let steps = self.fixed.advance(scaled);
        for _ in 0..steps {
            self.scenes.fixed_update();
        }
        self.scenes.update(scaled);
        self.render(backend);
    }

    fn render(&mut self, backend: &mut dyn RenderBackend) {
        let Some((camera, position)) = self.scenes.active_camera() else {
            self.sprites.warn_no_camera(self.scenes.elapsed());
            self.scenes.gizmos_mut().clear();
            return;
        };
        let view = camera.view_aabb(position);
        backend.set_camera(position, camera.world_viewport());
        self.sprites.begin_frame();
        for scene in self.scenes.scenes() {
            self.sprites
                .render_scene(scene.registry(), view, &self.textures, backend);
        }
        self.sprites.render_gizmos(self.scenes.gizmos(), backend);
        self.sprites.end_frame(self.profiler.as_mut());

        // gizmos enqueued next frame cull against this frame's view
        let gizmos = self.scenes.gizmos_mut();
        gizmos.set_view_aabb(view);
        gizmos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingBackend;

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let engine = Engine::new(EngineConfig {
            fixed_timestep: -1.0,
            ..EngineConfig::default()
        });
        assert_eq!(*engine.config(), EngineConfig::default());
    }

    #[test]
    fn frame_without_scenes_or_camera_is_harmless() {
        let mut engine = Engine::default();
        let mut backend = RecordingBackend::default();
        engine.advance(1.0 / 60.0, &mut backend);
        assert!(backend.camera.is_none());
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn zero_time_scale_freezes_physics() {
        use crate::ecs::components::Transform2D;
        use crate::physics::BodyType;

        let mut engine = Engine::default();
        engine.scene_manager_mut().create_scene("t");
        engine.scene_manager_mut().load_scene("t").unwrap();
        let entity = engine
            .scene_manager_mut()
            .with_scene("t", |ctx| {
                let entity = ctx.spawn(Transform2D::from_position(Vec2::new(0.0, 10.0)));
                ctx.add_rigid_body(entity, BodyType::Dynamic).unwrap();
                entity
            })
            .unwrap();

        engine.set_time_scale(0.0);
        let mut backend = RecordingBackend::default();
        for _ in 0..10 {
            engine.advance(1.0 / 10.0, &mut backend);
        }

        let scene = engine.scene_manager().scene("t").unwrap();
        let transform = scene
            .registry()
            .get_component::<Transform2D>(entity)
            .unwrap();
        approx::assert_relative_eq!(transform.position.y, 10.0);
    }
}
