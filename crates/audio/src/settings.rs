//! Audio settings and volume controls.

use serde::{Deserialize, Serialize};

/// Volume settings for the creature channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 to 1.0)
    pub master: f32,
    /// Creature sound volume (0.0 to 1.0)
    pub creature: f32,
    /// Whether creature sounds are muted
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            creature: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Create new audio settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the effective creature volume (master * creature).
    pub fn effective_creature_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.creature
        }
    }

    /// Toggle mute state.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set master volume (clamped to 0.0-1.0).
    pub fn set_master(&mut self, volume: f32) {
        self.master = volume.clamp(0.0, 1.0);
    }

    /// Set creature volume (clamped to 0.0-1.0).
    pub fn set_creature(&mut self, volume: f32) {
        self.creature = volume.clamp(0.0, 1.0);
    }

    /// Clamp values that came from an external source (config files).
    pub fn sanitized(mut self) -> Self {
        self.set_master(self.master);
        self.set_creature(self.creature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AudioSettings::default();
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.creature, 1.0);
        assert!(!settings.muted);
    }

    #[test]
    fn test_effective_volume() {
        let settings = AudioSettings {
            master: 0.5,
            creature: 0.6,
            ..Default::default()
        };
        assert!((settings.effective_creature_volume() - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_mute() {
        let mut settings = AudioSettings::default();
        settings.toggle_mute();
        assert!(settings.muted);
        assert_eq!(settings.effective_creature_volume(), 0.0);

        settings.toggle_mute();
        assert!(!settings.muted);
        assert!(settings.effective_creature_volume() > 0.0);
    }

    #[test]
    fn test_volume_clamping() {
        let mut settings = AudioSettings::default();
        settings.set_master(1.5);
        assert_eq!(settings.master, 1.0);

        settings.set_creature(-0.5);
        assert_eq!(settings.creature, 0.0);

        let loaded = AudioSettings {
            master: 3.0,
            creature: -1.0,
            muted: false,
        }
        .sanitized();
        assert_eq!(loaded.master, 1.0);
        assert_eq!(loaded.creature, 0.0);
    }
}
