//! Serializable state dump for inspecting a running gallery.

use exhibit_sound_audio::PlaybackState;
use exhibit_sound_core::{CreatureId, Exhibit};
use serde::Serialize;

/// Point-in-time view of the gallery for inspection and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    /// Number of catalog records, playable or not.
    pub catalog_size: usize,
    /// Source the catalog came from, if any loaded.
    pub catalog_source: Option<String>,
    /// Exhibits as last snapshotted.
    pub exhibits: Vec<Exhibit>,
    /// Creatures with a preloaded sound, sorted.
    pub loaded_sounds: Vec<CreatureId>,
    /// URL prefix sounds were requested under.
    pub sound_prefix: String,
    /// Current sound, if any.
    pub playback: PlaybackState,
    /// Whether triggers are currently allowed.
    pub inside_museum: bool,
    /// Entity the visitor position is read from.
    pub rig_entity: String,
    /// Key code that triggers playback.
    pub trigger_key: String,
    /// Trigger radius in scene units.
    pub max_distance: f32,
    /// Name of the audio backend.
    pub backend: &'static str,
}

impl DebugSnapshot {
    /// Pretty JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
