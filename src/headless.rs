use crate::config::GalleryConfig;
use crate::events::{EventRecord, JsonlSink};
use crate::gallery::GallerySound;
use crate::scripted_input::{ScriptedScene, ScriptedSession, ScriptedStep};
use anyhow::{Context, Result};
use chrono::Utc;
use exhibit_sound_audio::{AudioBackend, AudioManager, PlayOutcome, StubBackend};
use exhibit_sound_core::CreatureId;
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub struct HeadlessConfig {
    pub config: GalleryConfig,
    pub script: Option<PathBuf>,
    pub no_audio: bool,
    pub event_log: Option<PathBuf>,
    pub dump_state: bool,
}

/// Result of one scripted step, as written to the event log.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StepOutcome {
    Trigger(crate::TriggerOutcome),
    Play { creature: CreatureId, loaded: bool },
    Count { count: usize },
    Done,
}

pub async fn run(cfg: HeadlessConfig) -> Result<()> {
    let session = match &cfg.script {
        Some(path) => Some(
            ScriptedSession::from_path(path)
                .with_context(|| format!("failed to load script {}", path.display()))?,
        ),
        None => None,
    };
    let scene = session
        .as_ref()
        .map(ScriptedSession::scene)
        .unwrap_or_default();

    let audio = AudioManager::with_backend(
        select_backend(&cfg.config, cfg.no_audio),
        cfg.config.sound_prefix.clone(),
    );
    let mut gallery = GallerySound::new(scene, audio, &cfg.config);
    let sources = cfg.config.catalog_sources();
    info!(sources = ?sources.describe(), "Loading creature catalog");
    gallery.load_catalog(&sources).await;

    let mut sink = match &cfg.event_log {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };

    if let Some(session) = session {
        for (index, step) in session.steps.iter().enumerate() {
            let outcome = run_step(&mut gallery, step).await;
            gallery.update();
            info!(step = index, kind = step.kind(), ?outcome, "Step finished");
            if let Some(sink) = sink.as_mut() {
                sink.write(&EventRecord {
                    at: Utc::now(),
                    step: index,
                    kind: step.kind(),
                    payload: &outcome,
                })?;
            }
        }
    }

    if cfg.dump_state {
        println!("{}", gallery.debug_snapshot().to_json()?);
    }
    Ok(())
}

pub async fn run_step(gallery: &mut GallerySound<ScriptedScene>, step: &ScriptedStep) -> StepOutcome {
    match step {
        ScriptedStep::Key { code } => StepOutcome::Trigger(gallery.on_key(code)),
        ScriptedStep::MoveRig { to } => {
            let rig = gallery.gate().rig_entity().to_string();
            gallery.scene_mut().place(&rig, Vec3::from_array(*to));
            StepOutcome::Done
        }
        ScriptedStep::MoveEntity { entity, to } => {
            gallery.scene_mut().place(entity, Vec3::from_array(*to));
            StepOutcome::Done
        }
        ScriptedStep::RemoveEntity { entity } => {
            gallery.scene_mut().remove(entity);
            StepOutcome::Done
        }
        ScriptedStep::Inside { inside } => {
            gallery.set_inside_museum(*inside);
            StepOutcome::Done
        }
        ScriptedStep::SetRig { entity } => {
            gallery.set_player_rig(entity.clone());
            StepOutcome::Done
        }
        ScriptedStep::Play { creature } => {
            let creature = CreatureId::new(creature.clone());
            let loaded = matches!(gallery.play(&creature), PlayOutcome::Started(_));
            StepOutcome::Play { creature, loaded }
        }
        ScriptedStep::Stop => {
            gallery.stop();
            StepOutcome::Done
        }
        ScriptedStep::ReloadSounds => StepOutcome::Count {
            count: gallery.reload_sounds(),
        },
        ScriptedStep::ResnapshotExhibits => StepOutcome::Count {
            count: gallery.resnapshot_exhibits(),
        },
        ScriptedStep::WaitMs { ms } => {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
            StepOutcome::Done
        }
    }
}

fn select_backend(config: &GalleryConfig, no_audio: bool) -> Box<dyn AudioBackend> {
    let stub = || -> Box<dyn AudioBackend> {
        match config.stub_clip_ms {
            Some(ms) => Box::new(StubBackend::with_clip_length(Duration::from_millis(ms))),
            None => Box::new(StubBackend::new()),
        }
    };
    if no_audio {
        return stub();
    }

    #[cfg(feature = "rodio_backend")]
    {
        match exhibit_sound_audio::RodioBackend::new(
            config.sound_dir.clone(),
            config.sound_prefix.clone(),
        ) {
            Ok(backend) => return Box::new(backend),
            Err(e) => tracing::warn!("Failed to initialize audio: {}. Using stub.", e),
        }
    }
    stub()
}
