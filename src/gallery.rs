//! The coordinating context: catalog, exhibits, audio and the input gate.

use crate::config::GalleryConfig;
use crate::debug::DebugSnapshot;
use crate::input::{InputGate, TriggerOutcome};
use exhibit_sound_audio::{AudioManager, PlayOutcome};
use exhibit_sound_catalog::{load_catalog, CatalogLoad, CatalogSources};
use exhibit_sound_core::{
    find_nearest, snapshot_exhibits, CreatureId, CreatureRecord, Exhibit, ExhibitBinding,
    SceneLookup,
};
use glam::Vec3;
use tracing::{debug, info, warn};

/// Owns every piece of mutable state; nothing lives in globals.
///
/// Lifecycle: [`new`](Self::new) takes a provisional exhibit snapshot with
/// an empty catalog. The first [`load_catalog`](Self::load_catalog) (or
/// [`apply_catalog`](Self::apply_catalog)) fills in the sounds and then
/// snapshots the exhibits again; those positions stay fixed from then on.
/// Key events are fed to [`on_key`](Self::on_key). Triggers that arrive
/// before the catalog is loaded are handled like any other lookup miss.
pub struct GallerySound<S: SceneLookup> {
    scene: S,
    bindings: Vec<ExhibitBinding>,
    exhibits: Vec<Exhibit>,
    catalog: Vec<CreatureRecord>,
    catalog_source: Option<String>,
    audio: AudioManager,
    gate: InputGate,
    max_distance: f32,
    started: bool,
}

impl<S: SceneLookup> GallerySound<S> {
    /// Build the context and snapshot exhibit positions from `scene`.
    pub fn new(scene: S, mut audio: AudioManager, config: &GalleryConfig) -> Self {
        audio.update_settings(config.audio.clone());
        let mut gate = InputGate::new(&config.trigger_key, config.rig_entity.clone());
        gate.set_inside_museum(config.inside_museum);
        let exhibits = snapshot_exhibits(&scene, &config.exhibits);
        debug!(
            exhibits = exhibits.len(),
            bindings = config.exhibits.len(),
            "Exhibits snapshotted"
        );
        Self {
            scene,
            bindings: config.exhibits.clone(),
            exhibits,
            catalog: Vec::new(),
            catalog_source: None,
            audio,
            gate,
            max_distance: config.max_distance,
            started: false,
        }
    }

    /// Fetch the catalog through `sources` and preload its sounds.
    ///
    /// Never fails; an unavailable catalog leaves the gallery without sounds.
    pub async fn load_catalog(&mut self, sources: &CatalogSources) -> usize {
        let load = load_catalog(sources).await;
        self.apply_catalog(load)
    }

    /// Install the result of a catalog load fetched elsewhere.
    ///
    /// A failed load keeps the current catalog. The first call, failed or
    /// not, also takes the startup exhibit snapshot. Returns the number of
    /// sounds loaded.
    pub fn apply_catalog(&mut self, load: CatalogLoad) -> usize {
        let loaded = if load.succeeded() {
            self.catalog_source = load.source;
            self.set_catalog(load.records)
        } else {
            self.audio.bank().len()
        };
        if !self.started {
            self.started = true;
            self.resnapshot_exhibits();
        }
        loaded
    }

    /// Replace the catalog wholesale and rebuild the sound bank.
    pub fn set_catalog(&mut self, records: Vec<CreatureRecord>) -> usize {
        self.catalog = records;
        self.reload_sounds()
    }

    /// Rebuild the sound bank from the current catalog.
    pub fn reload_sounds(&mut self) -> usize {
        let loaded = self.audio.preload(&self.catalog);
        info!(
            creatures = self.catalog.len(),
            sounds = loaded,
            "Creature sounds loaded"
        );
        loaded
    }

    /// Take a fresh snapshot of exhibit positions.
    ///
    /// Exhibits are otherwise frozen at construction time.
    pub fn resnapshot_exhibits(&mut self) -> usize {
        self.exhibits = snapshot_exhibits(&self.scene, &self.bindings);
        self.exhibits.len()
    }

    /// Handle a key press by its `KeyboardEvent.code`.
    pub fn on_key(&mut self, code: &str) -> TriggerOutcome {
        if !self.gate.is_trigger(code) {
            return TriggerOutcome::Ignored;
        }
        self.handle_trigger()
    }

    /// Play the sound of the nearest exhibit, if the visitor may and can.
    pub fn handle_trigger(&mut self) -> TriggerOutcome {
        if !self.gate.inside_museum() {
            return TriggerOutcome::OutsideMuseum;
        }
        let Some(position) = self.player_position() else {
            warn!(rig = self.gate.rig_entity(), "Player rig not found");
            return TriggerOutcome::NoPlayerPosition;
        };
        let Some(creature) = self.find_nearest(position).map(|e| e.id.clone()) else {
            warn!("No exhibit within range");
            return TriggerOutcome::NoExhibitInRange;
        };
        match self.play(&creature) {
            PlayOutcome::Started(ticket) => TriggerOutcome::Played { creature, ticket },
            PlayOutcome::NotLoaded => TriggerOutcome::NotLoaded { creature },
        }
    }

    /// Nearest exhibit within the trigger radius of `position`.
    pub fn find_nearest(&self, position: Vec3) -> Option<&Exhibit> {
        find_nearest(position, &self.exhibits, self.max_distance)
    }

    /// Play a creature's sound, replacing the current one.
    pub fn play(&mut self, id: &CreatureId) -> PlayOutcome {
        self.audio.play(id)
    }

    /// Stop the current creature sound.
    pub fn stop(&mut self) {
        self.audio.stop();
    }

    /// Per-frame housekeeping: completion tracking for the current sound.
    pub fn update(&mut self) {
        self.audio.update();
    }

    /// Current visitor position, read live from the rig entity.
    pub fn player_position(&self) -> Option<Vec3> {
        self.scene.entity_position(self.gate.rig_entity())
    }

    /// Set as the visitor enters (true) or leaves (false) the museum.
    pub fn set_inside_museum(&mut self, inside: bool) {
        debug!(inside, "Inside-museum flag changed");
        self.gate.set_inside_museum(inside);
    }

    /// Read the visitor position from a different entity.
    pub fn set_player_rig(&mut self, entity: impl Into<String>) {
        self.gate.set_rig_entity(entity);
    }

    /// Serializable view of the internal state.
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            catalog_size: self.catalog.len(),
            catalog_source: self.catalog_source.clone(),
            exhibits: self.exhibits.clone(),
            loaded_sounds: self.audio.bank().ids(),
            sound_prefix: self.audio.bank().prefix().to_string(),
            playback: self.audio.state().clone(),
            inside_museum: self.gate.inside_museum(),
            rig_entity: self.gate.rig_entity().to_string(),
            trigger_key: self.gate.trigger_key().to_string(),
            max_distance: self.max_distance,
            backend: self.audio.backend_name(),
        }
    }

    /// Loaded catalog records.
    pub fn catalog(&self) -> &[CreatureRecord] {
        &self.catalog
    }

    /// Snapshotted exhibits.
    pub fn exhibits(&self) -> &[Exhibit] {
        &self.exhibits
    }

    /// The input gate.
    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    /// The playback controller.
    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Mutable playback controller, e.g. for volume changes.
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// The scene capability.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable scene capability.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
