//! Exhibit registry: point-in-time snapshots of scene entities.

use crate::CreatureId;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capability for resolving scene entities to world positions.
///
/// Implemented by whatever hosts the 3D scene. Returning `None` means the
/// entity does not exist or has no resolvable position.
pub trait SceneLookup {
    /// Current position of the entity with the given id.
    fn entity_position(&self, entity: &str) -> Option<Vec3>;
}

impl<T: SceneLookup + ?Sized> SceneLookup for &T {
    fn entity_position(&self, entity: &str) -> Option<Vec3> {
        (**self).entity_position(entity)
    }
}

/// Associates a scene entity with the creature whose sound it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitBinding {
    /// Scene entity id.
    pub entity: String,
    /// Creature id looked up in the sound bank.
    pub creature: CreatureId,
}

impl ExhibitBinding {
    /// Bind `entity` to `creature`.
    pub fn new(entity: impl Into<String>, creature: impl Into<CreatureId>) -> Self {
        Self {
            entity: entity.into(),
            creature: creature.into(),
        }
    }
}

/// The seven gallery artworks, each bound to the creature of the same name.
pub fn default_bindings() -> Vec<ExhibitBinding> {
    (1..=7)
        .map(|n| {
            let name = format!("artwork{n}");
            ExhibitBinding::new(name.clone(), name)
        })
        .collect()
}

/// A creature display at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exhibit {
    /// Creature played when this exhibit is triggered.
    pub id: CreatureId,
    /// Position captured at snapshot time.
    pub position: Vec3,
}

/// Resolve every binding against the scene, in binding order.
///
/// Entities that are missing or have no position are left out. The
/// returned positions are copies; later scene movement does not affect them.
pub fn snapshot_exhibits<S: SceneLookup + ?Sized>(
    scene: &S,
    bindings: &[ExhibitBinding],
) -> Vec<Exhibit> {
    bindings
        .iter()
        .filter_map(|binding| match scene.entity_position(&binding.entity) {
            Some(position) => Some(Exhibit {
                id: binding.creature.clone(),
                position,
            }),
            None => {
                debug!(entity = %binding.entity, "Exhibit entity not in scene");
                None
            }
        })
        .collect()
}
