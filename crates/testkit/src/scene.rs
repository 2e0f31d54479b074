use exhibit_sound_core::SceneLookup;
use glam::Vec3;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory scene whose entities can be moved or removed while shared.
///
/// Clones share the same entity table, so a test can keep a handle and move
/// the rig after handing the scene to the system under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    entities: Rc<RefCell<HashMap<String, Vec3>>>,
}

impl MemoryScene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an entity at `position`.
    pub fn with(self, entity: &str, position: Vec3) -> Self {
        self.place(entity, position);
        self
    }

    /// Insert or move an entity.
    pub fn place(&self, entity: &str, position: Vec3) {
        self.entities
            .borrow_mut()
            .insert(entity.to_string(), position);
    }

    /// Remove an entity.
    pub fn remove(&self, entity: &str) {
        self.entities.borrow_mut().remove(entity);
    }
}

impl SceneLookup for MemoryScene {
    fn entity_position(&self, entity: &str) -> Option<Vec3> {
        self.entities.borrow().get(entity).copied()
    }
}
