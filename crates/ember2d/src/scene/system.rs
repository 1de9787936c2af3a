//! Gameplay system trait

use super::context::SceneContext;
use crate::EngineError;

/// One unit of gameplay logic attached to a scene.
///
/// All phases default to doing nothing, so a system implements only the
/// hooks it cares about. Phase order per system lifetime:
///
/// 1. [`System::awake`] then [`System::start`], immediately when the
///    system is added to its scene.
/// 2. [`System::fixed_update`] zero or more times per frame, after the
///    physics step and transform write-back.
/// 3. [`System::update`] once per frame.
/// 4. [`System::disable`] when the system is switched off.
/// 5. [`System::destroy`] when the scene unloads.
///
/// Returning an error aborts only the failing system's phase call; the
/// scene logs it and keeps running the remaining systems.
#[allow(unused_variables)]
pub trait System {
    /// Called once, before `start`, when the system joins the scene
    fn awake(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once, after every system of the batch has awoken
    fn start(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once per rendered frame
    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once per fixed physics step, after transforms were synced
    fn fixed_update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called when the system is disabled via the scene
    fn disable(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called when the scene unloads or reloads
    fn destroy(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }
}
