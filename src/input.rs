//! Trigger-key gate.

use exhibit_sound_audio::PlaybackTicket;
use exhibit_sound_core::CreatureId;
use serde::Serialize;

/// What a trigger event led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TriggerOutcome {
    /// The key is not the trigger key.
    Ignored,
    /// The visitor is outside the museum; triggers are disabled.
    OutsideMuseum,
    /// The rig entity has no position.
    NoPlayerPosition,
    /// No exhibit lies within the trigger radius.
    NoExhibitInRange,
    /// The nearest exhibit's creature has no preloaded sound.
    NotLoaded {
        /// Creature of the nearest exhibit.
        creature: CreatureId,
    },
    /// The nearest exhibit's sound was started.
    Played {
        /// Creature of the nearest exhibit.
        creature: CreatureId,
        /// Ticket of the new playback.
        ticket: PlaybackTicket,
    },
}

/// Preconditions checked before a trigger turns into playback.
#[derive(Debug, Clone)]
pub struct InputGate {
    trigger_key: String,
    inside_museum: bool,
    rig_entity: String,
}

impl InputGate {
    /// Gate on `trigger_key`, reading the visitor position from `rig_entity`.
    pub fn new(trigger_key: &str, rig_entity: impl Into<String>) -> Self {
        Self {
            trigger_key: normalize_key_code(trigger_key),
            inside_museum: true,
            rig_entity: rig_entity.into(),
        }
    }

    /// Whether `code` is the trigger key.
    pub fn is_trigger(&self, code: &str) -> bool {
        normalize_key_code(code) == self.trigger_key
    }

    /// Trigger key in `KeyboardEvent.code` form.
    pub fn trigger_key(&self) -> &str {
        &self.trigger_key
    }

    /// Whether triggers are currently accepted.
    pub fn inside_museum(&self) -> bool {
        self.inside_museum
    }

    /// Set from outside as the visitor enters or leaves.
    pub fn set_inside_museum(&mut self, inside: bool) {
        self.inside_museum = inside;
    }

    /// Entity whose position is the visitor's position.
    pub fn rig_entity(&self) -> &str {
        &self.rig_entity
    }

    /// Override the rig entity.
    pub fn set_rig_entity(&mut self, entity: impl Into<String>) {
        self.rig_entity = entity.into();
    }
}

/// Accept both `KeyboardEvent.code` names and bare letters/digits.
fn normalize_key_code(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        (Some(c), None) if c.is_ascii_digit() => format!("Digit{c}"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_matches_code_and_letter() {
        let gate = InputGate::new("KeyX", "rig");
        assert!(gate.is_trigger("KeyX"));
        assert!(gate.is_trigger("x"));
        assert!(gate.is_trigger("X"));
        assert!(!gate.is_trigger("KeyZ"));
        assert!(!gate.is_trigger("Space"));
    }

    #[test]
    fn letter_config_is_normalized() {
        let gate = InputGate::new("e", "rig");
        assert_eq!(gate.trigger_key(), "KeyE");
        assert_eq!(InputGate::new("5", "rig").trigger_key(), "Digit5");
    }

    #[test]
    fn defaults_to_inside() {
        let mut gate = InputGate::new("KeyX", "rig");
        assert!(gate.inside_museum());
        gate.set_inside_museum(false);
        assert!(!gate.inside_museum());
        gate.set_rig_entity("camera");
        assert_eq!(gate.rig_entity(), "camera");
    }
}
