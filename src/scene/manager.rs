use slotmap::{SlotMap, new_key_type};

use crate::errors::{Result, WorldError};
use crate::scene::Scene;

new_key_type! {
    pub struct SceneHandle;
}

/// Owns every scene of the session, in creation order.
///
/// Scenes are never destroyed; switching worlds only moves the active
/// pointer.
#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: SlotMap<SceneHandle, Scene>,
    order: Vec<SceneHandle>,
    active_scene: Option<SceneHandle>,
}

impl SceneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scene. The first becomes active automatically.
    pub fn create_scene(&mut self, name: impl Into<String>) -> SceneHandle {
        let handle = self.scenes.insert(Scene::new(name));
        self.order.push(handle);
        if self.active_scene.is_none() {
            self.active_scene = Some(handle);
        }
        handle
    }

    pub fn set_active(&mut self, handle: SceneHandle) {
        if self.scenes.contains_key(handle) {
            self.active_scene = Some(handle);
        } else {
            log::error!("Attempted to set invalid SceneHandle as active.");
        }
    }

    /// Activates the scene at creation index `index`.
    pub fn set_active_index(&mut self, index: usize) -> Result<()> {
        let handle = self.handle_at(index).ok_or(WorldError::SceneNotFound(index))?;
        self.active_scene = Some(handle);
        Ok(())
    }

    #[must_use]
    pub fn handle_at(&self, index: usize) -> Option<SceneHandle> {
        self.order.get(index).copied()
    }

    #[must_use]
    pub fn index_of(&self, handle: SceneHandle) -> Option<usize> {
        self.order.iter().position(|&h| h == handle)
    }

    #[must_use]
    pub fn scene_at(&self, index: usize) -> Option<&Scene> {
        self.handle_at(index).and_then(|h| self.scenes.get(h))
    }

    pub fn scene_at_mut(&mut self, index: usize) -> Option<&mut Scene> {
        let handle = self.handle_at(index)?;
        self.scenes.get_mut(handle)
    }

    #[must_use]
    pub fn get_scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    pub fn get_scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<SceneHandle> {
        self.active_scene
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active_scene.and_then(|h| self.index_of(h))
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.and_then(|h| self.scenes.get(h))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.active_scene.and_then(|h| self.scenes.get_mut(h))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
