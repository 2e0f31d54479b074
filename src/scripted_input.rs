//! Scripted sessions: a virtual scene plus a sequence of visitor actions.

use exhibit_sound_core::SceneLookup;
use glam::Vec3;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
pub struct ScriptedSession {
    /// Entity positions of the virtual scene.
    #[serde(default)]
    pub entities: HashMap<String, [f32; 3]>,
    pub steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedStep {
    /// Press a key by its `KeyboardEvent.code`.
    Key { code: String },
    /// Move the current rig entity.
    MoveRig { to: [f32; 3] },
    MoveEntity { entity: String, to: [f32; 3] },
    RemoveEntity { entity: String },
    /// Toggle the inside-museum flag.
    Inside { inside: bool },
    SetRig { entity: String },
    Play { creature: String },
    Stop,
    ReloadSounds,
    ResnapshotExhibits,
    /// Let time pass so clips can finish.
    WaitMs { ms: u64 },
}

impl ScriptedStep {
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptedStep::Key { .. } => "key",
            ScriptedStep::MoveRig { .. } => "move_rig",
            ScriptedStep::MoveEntity { .. } => "move_entity",
            ScriptedStep::RemoveEntity { .. } => "remove_entity",
            ScriptedStep::Inside { .. } => "inside",
            ScriptedStep::SetRig { .. } => "set_rig",
            ScriptedStep::Play { .. } => "play",
            ScriptedStep::Stop => "stop",
            ScriptedStep::ReloadSounds => "reload_sounds",
            ScriptedStep::ResnapshotExhibits => "resnapshot_exhibits",
            ScriptedStep::WaitMs { .. } => "wait_ms",
        }
    }
}

impl ScriptedSession {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let session: ScriptedSession = serde_json::from_str(contents)?;
        if session.steps.is_empty() {
            anyhow::bail!("scripted session contains no steps");
        }
        Ok(session)
    }

    /// Scene populated with the session's entities.
    pub fn scene(&self) -> ScriptedScene {
        ScriptedScene {
            entities: self
                .entities
                .iter()
                .map(|(id, pos)| (id.clone(), Vec3::from_array(*pos)))
                .collect(),
        }
    }
}

/// Scene driven by a script; entities move only when a step says so.
#[derive(Debug, Clone, Default)]
pub struct ScriptedScene {
    entities: HashMap<String, Vec3>,
}

impl ScriptedScene {
    pub fn place(&mut self, entity: &str, position: Vec3) {
        self.entities.insert(entity.to_string(), position);
    }

    pub fn remove(&mut self, entity: &str) -> bool {
        self.entities.remove(entity).is_some()
    }
}

impl SceneLookup for ScriptedScene {
    fn entity_position(&self, entity: &str) -> Option<Vec3> {
        self.entities.get(entity).copied()
    }
}
