//! A scene and its system list

use super::context::{release_physics, SceneContext};
use super::system::System;
use crate::ecs::{Entity, Registry};
use crate::foundation::time::FrameTime;
use crate::physics::PhysicsWorld;
use crate::render::Gizmos;
use std::any::TypeId;

type SystemFactory = Box<dyn Fn() -> Box<dyn System>>;

struct SystemEntry {
    type_id: TypeId,
    type_name: &'static str,
    enabled: bool,
    system: Box<dyn System>,
    factory: SystemFactory,
}

/// One world of entities driven by an ordered list of systems.
///
/// Systems are stored with the factory that built them, so a scene reload
/// can rebuild every system from scratch while the registered order and
/// set survive. Phase failures are logged with the scene and system name
/// and never stop sibling systems.
pub struct Scene {
    name: String,
    registry: Registry,
    systems: Vec<SystemEntry>,
}

impl Scene {
    /// Empty scene with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Registry::new(),
            systems: Vec::new(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene's entity registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the scene's entity registry
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Register a system built by `factory` and run its awake and start
    /// phases immediately.
    ///
    /// The factory is kept so a reload can rebuild the system.
    pub fn add_system<S, F>(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
        factory: F,
    ) where
        S: System + 'static,
        F: Fn() -> S + 'static,
    {
        let mut system: Box<dyn System> = Box::new(factory());
        let type_name = std::any::type_name::<S>();
        {
            let mut ctx =
                SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
            if let Err(err) = system.awake(&mut ctx) {
                log::error!("[{}] system {type_name} failed during awake: {err}", self.name);
            }
            if let Err(err) = system.start(&mut ctx) {
                log::error!("[{}] system {type_name} failed during start: {err}", self.name);
            }
        }
        self.systems.push(SystemEntry {
            type_id: TypeId::of::<S>(),
            type_name,
            enabled: true,
            system,
            factory: Box::new(move || Box::new(factory())),
        });
    }

    /// Switch a system on or off by its type.
    ///
    /// Disabling runs the system's disable phase; a disabled system skips
    /// update and fixed update but still runs destroy on unload. Returns
    /// whether a system of that type was found.
    pub fn set_system_enabled<S: System + 'static>(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
        enabled: bool,
    ) -> bool {
        let type_id = TypeId::of::<S>();
        let Some(entry) = self.systems.iter_mut().find(|entry| entry.type_id == type_id)
        else {
            return false;
        };
        if entry.enabled && !enabled {
            let mut ctx =
                SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
            if let Err(err) = entry.system.disable(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during disable: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
        entry.enabled = enabled;
        true
    }

    /// Whether a system of this type is registered and enabled
    pub fn system_enabled<S: System + 'static>(&self) -> Option<bool> {
        let type_id = TypeId::of::<S>();
        self.systems
            .iter()
            .find(|entry| entry.type_id == type_id)
            .map(|entry| entry.enabled)
    }

    /// Run the per-frame update phase over the enabled systems
    pub fn run_update(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
    ) {
        let mut ctx = SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
        for entry in &mut self.systems {
            if !entry.enabled {
                continue;
            }
            if let Err(err) = entry.system.update(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during update: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
    }

    /// Run the fixed-update phase over the enabled systems
    pub fn run_fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
    ) {
        let mut ctx = SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
        for entry in &mut self.systems {
            if !entry.enabled {
                continue;
            }
            if let Err(err) = entry.system.fixed_update(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during fixed update: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
    }

    /// Run the destroy phase over every system, enabled or not
    pub(crate) fn run_destroy(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
    ) {
        let mut ctx = SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
        for entry in &mut self.systems {
            if let Err(err) = entry.system.destroy(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during destroy: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
    }

    /// Release every entity's physics resources and clear the registry
    pub(crate) fn clear_entities(&mut self, physics: &mut PhysicsWorld) {
        let entities: Vec<Entity> = self.registry.entities().collect();
        for entity in entities {
            release_physics(&mut self.registry, physics, entity);
        }
        self.registry.clear();
    }

    /// Rebuild every system from its factory and rerun awake and start, in
    /// the original registration order
    pub(crate) fn restart_systems(
        &mut self,
        physics: &mut PhysicsWorld,
        gizmos: &mut Gizmos,
        time: FrameTime,
    ) {
        let mut ctx = SceneContext::new(&mut self.registry, physics, gizmos, time, &self.name);
        for entry in &mut self.systems {
            entry.system = (entry.factory)();
            entry.enabled = true;
            if let Err(err) = entry.system.awake(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during awake: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
        for entry in &mut self.systems {
            if let Err(err) = entry.system.start(&mut ctx) {
                log::error!(
                    "[{}] system {} failed during start: {err}",
                    self.name,
                    entry.type_name
                );
            }
        }
    }
}
