//! Scene orchestration
//!
//! The manager owns the set of known scene names, the loaded scene
//! instances, the single shared physics world and the gizmo queue. Several
//! scenes can be loaded at once; they all simulate in the one physics
//! world and all render each frame. Exactly one loaded scene is "active",
//! which only determines where the render pass looks for the camera.

use super::scene::Scene;
use super::system::System;
use crate::foundation::time::FrameTime;
use crate::physics::{self, PhysicsWorld};
use crate::render::{Camera, Gizmos};
use crate::ecs::components::Transform2D;
use crate::foundation::math::Vec2;

/// Errors raised by scene bookkeeping
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The name was never registered with `create_scene`
    #[error("scene \"{name}\" does not exist")]
    UnknownScene {
        /// The offending scene name
        name: String,
    },

    /// The scene is already loaded
    #[error("scene \"{name}\" is already loaded")]
    AlreadyLoaded {
        /// The offending scene name
        name: String,
    },

    /// The operation needs the scene to be loaded first
    #[error("scene \"{name}\" is not loaded")]
    NotLoaded {
        /// The offending scene name
        name: String,
    },

    /// No scene is currently active
    #[error("no active scene")]
    NoActiveScene,
}

/// Owner of every scene plus the services they share
pub struct SceneManager {
    available: Vec<String>,
    scenes: Vec<Scene>,
    active: Option<String>,
    physics: PhysicsWorld,
    gizmos: Gizmos,
    fixed_delta: f32,
    elapsed: f32,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new(PhysicsWorld::default(), Gizmos::default(), 1.0 / 50.0)
    }
}

impl SceneManager {
    /// Manager sharing the given physics world and gizmo queue across its
    /// scenes
    pub fn new(physics: PhysicsWorld, gizmos: Gizmos, fixed_delta: f32) -> Self {
        Self {
            available: Vec::new(),
            scenes: Vec::new(),
            active: None,
            physics,
            gizmos,
            fixed_delta,
            elapsed: 0.0,
        }
    }

    /// Register a scene name so it can be loaded later
    pub fn create_scene(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.available.contains(&name) {
            self.available.push(name);
        }
    }

    /// Instantiate a registered scene and make it the active one.
    ///
    /// Already-loaded scenes stay loaded; their bodies share the one
    /// physics world with the new scene's.
    pub fn load_scene(&mut self, name: &str) -> Result<(), SceneError> {
        if !self.available.iter().any(|n| n == name) {
            return Err(SceneError::UnknownScene { name: name.into() });
        }
        if self.scenes.iter().any(|scene| scene.name() == name) {
            return Err(SceneError::AlreadyLoaded { name: name.into() });
        }
        log::info!("loading scene \"{name}\"");
        self.scenes.push(Scene::new(name));
        self.active = Some(name.to_owned());
        Ok(())
    }

    /// Tear a scene down and rebuild its systems from their factories.
    ///
    /// Runs the destroy phase, releases every entity's physics resources,
    /// clears the registry and reruns awake and start on fresh system
    /// instances.
    pub fn reload_scene(&mut self, name: &str) -> Result<(), SceneError> {
        let time = FrameTime::fixed(self.fixed_delta, self.elapsed);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name() == name)
            .ok_or_else(|| SceneError::NotLoaded { name: name.into() })?;
        log::info!("reloading scene \"{name}\"");
        scene.run_destroy(physics, gizmos, time);
        scene.clear_entities(physics);
        scene.restart_systems(physics, gizmos, time);
        Ok(())
    }

    /// Unload a scene: run the destroy phase, release its physics
    /// resources and drop it.
    ///
    /// If the unloaded scene was active, the most recently loaded
    /// remaining scene becomes active.
    pub fn unload_scene(&mut self, name: &str) -> Result<(), SceneError> {
        let index = self
            .scenes
            .iter()
            .position(|scene| scene.name() == name)
            .ok_or_else(|| SceneError::NotLoaded { name: name.into() })?;
        let time = FrameTime::fixed(self.fixed_delta, self.elapsed);
        {
            let Self {
                scenes,
                physics,
                gizmos,
                ..
            } = self;
            let scene = &mut scenes[index];
            scene.run_destroy(physics, gizmos, time);
            scene.clear_entities(physics);
        }
        log::info!("unloading scene \"{name}\"");
        self.scenes.remove(index);
        if self.active.as_deref() == Some(name) {
            self.active = self.scenes.last().map(|scene| scene.name().to_owned());
        }
        Ok(())
    }

    /// Register a system on a loaded scene; awake and start run before
    /// this returns
    pub fn add_system<S, F>(&mut self, scene_name: &str, factory: F) -> Result<(), SceneError>
    where
        S: System + 'static,
        F: Fn() -> S + 'static,
    {
        let time = FrameTime::variable(0.0, self.fixed_delta, self.elapsed);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name() == scene_name)
            .ok_or_else(|| SceneError::NotLoaded {
                name: scene_name.into(),
            })?;
        scene.add_system(physics, gizmos, time, factory);
        Ok(())
    }

    /// Switch a system on or off on a loaded scene
    pub fn set_system_enabled<S: System + 'static>(
        &mut self,
        scene_name: &str,
        enabled: bool,
    ) -> Result<bool, SceneError> {
        let time = FrameTime::variable(0.0, self.fixed_delta, self.elapsed);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name() == scene_name)
            .ok_or_else(|| SceneError::NotLoaded {
                name: scene_name.into(),
            })?;
        Ok(scene.set_system_enabled::<S>(physics, gizmos, time, enabled))
    }

    /// Run a closure with a [`super::SceneContext`] for a loaded scene.
    ///
    /// This is the entry point for entity setup outside of systems.
    pub fn with_scene<R>(
        &mut self,
        scene_name: &str,
        f: impl FnOnce(&mut super::SceneContext<'_>) -> R,
    ) -> Result<R, SceneError> {
        let time = FrameTime::variable(0.0, self.fixed_delta, self.elapsed);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name() == scene_name)
            .ok_or_else(|| SceneError::NotLoaded {
                name: scene_name.into(),
            })?;
        let name = scene.name().to_owned();
        let mut ctx =
            super::SceneContext::new(scene.registry_mut(), physics, gizmos, time, &name);
        Ok(f(&mut ctx))
    }

    /// Run the per-frame update phase over every loaded scene
    pub fn update(&mut self, delta: f32) {
        self.elapsed += delta;
        let time = FrameTime::variable(delta, self.fixed_delta, self.elapsed);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        for scene in scenes.iter_mut() {
            scene.run_update(physics, gizmos, time);
        }
    }

    /// Advance physics by one fixed step, write transforms back and run
    /// the fixed-update phase over every loaded scene.
    ///
    /// Contact callbacks fire inside the physics step, before transforms
    /// are synced.
    pub fn fixed_update(&mut self) {
        let time = FrameTime::fixed(self.fixed_delta, self.elapsed);
        self.physics.step(self.fixed_delta);
        let Self {
            scenes,
            physics,
            gizmos,
            ..
        } = self;
        for scene in scenes.iter_mut() {
            physics::sync_transforms(scene.registry_mut(), physics);
        }
        for scene in scenes.iter_mut() {
            scene.run_fixed_update(physics, gizmos, time);
        }
    }

    /// The loaded scenes, in load order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// A loaded scene by name
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.name() == name)
    }

    /// Mutable access to a loaded scene
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.name() == name)
    }

    /// Whether a scene is currently loaded
    pub fn is_loaded(&self, name: &str) -> bool {
        self.scene(name).is_some()
    }

    /// The active scene
    pub fn active_scene(&self) -> Result<&Scene, SceneError> {
        let name = self.active.as_deref().ok_or(SceneError::NoActiveScene)?;
        self.scene(name).ok_or(SceneError::NoActiveScene)
    }

    /// Make a loaded scene the active one
    pub fn set_active_scene(&mut self, name: &str) -> Result<(), SceneError> {
        if !self.is_loaded(name) {
            return Err(SceneError::NotLoaded { name: name.into() });
        }
        self.active = Some(name.to_owned());
        Ok(())
    }

    /// Camera and world position to render the active scene with
    pub fn active_camera(&self) -> Option<(Camera, Vec2)> {
        let scene = self.active_scene().ok()?;
        let entity = scene.registry().singleton_entity::<Camera>().ok()?;
        let camera = *scene.registry().get_component::<Camera>(entity)?;
        let position = scene
            .registry()
            .get_component::<Transform2D>(entity)
            .map_or_else(|| Vec2::new(0.0, 0.0), |transform| transform.position);
        Some((camera, position))
    }

    /// Physics world shared by the loaded scenes
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable access to the shared physics world
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// The shared gizmo queue
    pub fn gizmos(&self) -> &Gizmos {
        &self.gizmos
    }

    /// Mutable access to the shared gizmo queue
    pub fn gizmos_mut(&mut self) -> &mut Gizmos {
        &mut self.gizmos
    }

    /// Seconds of scaled engine time since startup
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Transform2D;
    use crate::physics::BodyType;

    #[test]
    fn load_requires_create_and_rejects_double_load() {
        let mut manager = SceneManager::default();
        assert!(matches!(
            manager.load_scene("ghost"),
            Err(SceneError::UnknownScene { .. })
        ));

        manager.create_scene("level");
        manager.load_scene("level").unwrap();
        assert!(manager.is_loaded("level"));
        assert!(matches!(
            manager.load_scene("level"),
            Err(SceneError::AlreadyLoaded { .. })
        ));
    }

    #[test]
    fn loading_makes_the_scene_active() {
        let mut manager = SceneManager::default();
        manager.create_scene("a");
        manager.create_scene("b");
        manager.load_scene("a").unwrap();
        manager.load_scene("b").unwrap();
        assert_eq!(manager.active_scene().unwrap().name(), "b");

        manager.set_active_scene("a").unwrap();
        assert_eq!(manager.active_scene().unwrap().name(), "a");
    }

    #[test]
    fn unload_releases_physics_and_fixes_active() {
        let mut manager = SceneManager::default();
        manager.create_scene("a");
        manager.create_scene("b");
        manager.load_scene("a").unwrap();
        manager.load_scene("b").unwrap();

        let body = manager
            .with_scene("b", |ctx| {
                let entity = ctx.spawn(Transform2D::default());
                ctx.add_rigid_body(entity, BodyType::Dynamic).unwrap()
            })
            .unwrap();
        assert!(manager.physics().body_is_valid(body.handle()));

        manager.unload_scene("b").unwrap();
        assert!(!manager.is_loaded("b"));
        assert!(!manager.physics().body_is_valid(body.handle()));
        assert_eq!(manager.active_scene().unwrap().name(), "a");
    }

    #[test]
    fn bodies_from_two_scenes_share_one_world() {
        let mut manager = SceneManager::default();
        manager.create_scene("a");
        manager.create_scene("b");
        manager.load_scene("a").unwrap();
        manager.load_scene("b").unwrap();

        for name in ["a", "b"] {
            manager
                .with_scene(name, |ctx| {
                    let entity = ctx.spawn(Transform2D::default());
                    ctx.add_rigid_body(entity, BodyType::Dynamic).unwrap();
                })
                .unwrap();
        }

        // both fall under the same gravity step
        manager.fixed_update();
        for name in ["a", "b"] {
            let scene = manager.scene(name).unwrap();
            let entity = scene.registry().entities().next().unwrap();
            let transform = scene
                .registry()
                .get_component::<Transform2D>(entity)
                .unwrap();
            assert!(transform.position.y < 0.0);
        }
    }

    #[test]
    fn reload_wipes_entities_but_keeps_systems() {
        let mut manager = SceneManager::default();
        manager.create_scene("level");
        manager.load_scene("level").unwrap();

        struct Spawner;
        impl System for Spawner {
            fn start(
                &mut self,
                ctx: &mut super::super::SceneContext<'_>,
            ) -> Result<(), crate::EngineError> {
                ctx.spawn(Transform2D::default());
                Ok(())
            }
        }

        manager.add_system("level", || Spawner).unwrap();
        assert_eq!(manager.scene("level").unwrap().registry().entity_count(), 1);

        manager
            .with_scene("level", |ctx| {
                ctx.spawn(Transform2D::default());
            })
            .unwrap();
        assert_eq!(manager.scene("level").unwrap().registry().entity_count(), 2);

        manager.reload_scene("level").unwrap();
        let scene = manager.scene("level").unwrap();
        // the spawner ran again on the fresh registry
        assert_eq!(scene.registry().entity_count(), 1);
        assert_eq!(scene.system_count(), 1);
    }

    #[test]
    fn fixed_update_writes_body_transforms_back() {
        let mut manager = SceneManager::default();
        manager.create_scene("level");
        manager.load_scene("level").unwrap();

        let entity = manager
            .with_scene("level", |ctx| {
                let entity = ctx.spawn(Transform2D::from_position(Vec2::new(0.0, 10.0)));
                ctx.add_rigid_body(entity, BodyType::Dynamic).unwrap();
                entity
            })
            .unwrap();

        for _ in 0..50 {
            manager.fixed_update();
        }

        let scene = manager.scene("level").unwrap();
        let transform = scene
            .registry()
            .get_component::<Transform2D>(entity)
            .unwrap();
        assert!(transform.position.y < 10.0);
    }
}
