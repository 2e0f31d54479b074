#![warn(missing_docs)]
//! Core primitives shared across the workspace.
//!
//! Everything here is independent of the host environment: the scene is
//! reached through [`SceneLookup`], positions are plain [`glam::Vec3`] values.

pub mod creature;
pub mod exhibit;
pub mod proximity;

// Re-export commonly used types
pub use creature::{CreatureId, CreatureRecord};
pub use exhibit::{default_bindings, snapshot_exhibits, Exhibit, ExhibitBinding, SceneLookup};
pub use proximity::find_nearest;

/// Radius (scene units) within which an exhibit can be triggered.
pub const DEFAULT_MAX_DISTANCE: f32 = 7.0;

/// Scene entity that carries the visitor's position.
pub const DEFAULT_RIG_ENTITY: &str = "rig";

/// Keyboard code (DOM `KeyboardEvent.code` naming) that triggers playback.
pub const DEFAULT_TRIGGER_KEY: &str = "KeyX";
