//! Preloaded creature clips.

use crate::{AudioBackend, AudioClip, Preload};
use exhibit_sound_core::{CreatureId, CreatureRecord};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Path prefix under which sound files are served.
pub const DEFAULT_SOUND_PREFIX: &str = "/sound/";

/// URL of a catalog sound: the prefix plus the percent-encoded file name.
pub fn sound_url(prefix: &str, sound: &str) -> String {
    format!("{prefix}{}", urlencoding::encode(sound))
}

/// Clips keyed by creature id, one clip per creature.
pub struct SoundBank {
    prefix: String,
    clips: HashMap<CreatureId, Box<dyn AudioClip>>,
}

impl SoundBank {
    /// Empty bank resolving sounds under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            clips: HashMap::new(),
        }
    }

    /// Replace the whole bank with clips for `records`.
    ///
    /// Records without an id or sound are skipped. A clip the backend cannot
    /// create is logged and skipped. Returns the number of clips loaded.
    pub fn rebuild(&mut self, backend: &mut dyn AudioBackend, records: &[CreatureRecord]) -> usize {
        self.clips.clear();
        for record in records {
            let Some((id, sound)) = record.playable() else {
                debug!(id = ?record.id, "Skipping catalog entry without id or sound");
                continue;
            };
            let url = sound_url(&self.prefix, sound);
            match backend.load(&url, Preload::Auto) {
                Ok(clip) => {
                    self.clips.insert(id.clone(), clip);
                }
                Err(e) => warn!(creature = %id, url = %url, "Failed to load creature sound: {e}"),
            }
        }
        debug!(
            count = self.clips.len(),
            backend = backend.name(),
            "Creature sounds preloaded"
        );
        self.clips.len()
    }

    /// Clip for a creature.
    pub fn get_mut(&mut self, id: &CreatureId) -> Option<&mut Box<dyn AudioClip>> {
        self.clips.get_mut(id)
    }

    /// Whether a creature has a clip.
    pub fn contains(&self, id: &CreatureId) -> bool {
        self.clips.contains_key(id)
    }

    /// Source URL of a creature's clip.
    pub fn source_of(&self, id: &CreatureId) -> Option<&str> {
        self.clips.get(id).map(|clip| clip.source())
    }

    /// Loaded creature ids, sorted.
    pub fn ids(&self) -> Vec<CreatureId> {
        let mut ids: Vec<_> = self.clips.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of loaded clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether no clips are loaded.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Prefix sound files are resolved under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new(DEFAULT_SOUND_PREFIX)
    }
}
