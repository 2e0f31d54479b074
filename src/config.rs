use anyhow::Result;
use exhibit_sound_audio::{AudioSettings, DEFAULT_SOUND_PREFIX};
use exhibit_sound_catalog::{CatalogSources, DEFAULT_FETCH_TIMEOUT};
use exhibit_sound_core::{
    default_bindings, ExhibitBinding, DEFAULT_MAX_DISTANCE, DEFAULT_RIG_ENTITY, DEFAULT_TRIGGER_KEY,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/gallery.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Origin the catalog API and static data are served from
    /// (e.g. `http://localhost:8080`). Without one only the local file is tried.
    pub origin: Option<String>,
    /// Directory holding `data/creatures.json` for flat hosting.
    pub data_root: PathBuf,
    /// Timeout for each HTTP catalog request, in milliseconds.
    pub fetch_timeout_ms: u64,
    /// URL prefix sound files are requested under.
    pub sound_prefix: String,
    /// Local directory sound files are read from by the native backend.
    pub sound_dir: PathBuf,
    /// `KeyboardEvent.code` of the trigger key.
    pub trigger_key: String,
    /// Trigger radius in scene units.
    pub max_distance: f32,
    /// Scene entity carrying the visitor position.
    pub rig_entity: String,
    /// Initial value of the inside-museum flag.
    pub inside_museum: bool,
    /// Length of silent clips when no real audio output is used.
    pub stub_clip_ms: Option<u64>,
    pub exhibits: Vec<ExhibitBinding>,
    pub audio: AudioSettings,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            origin: None,
            data_root: PathBuf::from("."),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT.as_millis() as u64,
            sound_prefix: DEFAULT_SOUND_PREFIX.to_string(),
            sound_dir: PathBuf::from("sound"),
            trigger_key: DEFAULT_TRIGGER_KEY.to_string(),
            max_distance: DEFAULT_MAX_DISTANCE,
            rig_entity: DEFAULT_RIG_ENTITY.to_string(),
            inside_museum: true,
            stub_clip_ms: None,
            exhibits: default_bindings(),
            audio: AudioSettings::default(),
        }
    }
}

impl GalleryConfig {
    /// Load gallery configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GalleryConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GalleryConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Gallery config not found at {}. Using defaults",
                        path.display()
                    );
                }
                GalleryConfig::default()
            }
        }
    }

    /// Save gallery configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// The catalog fallback chain for this configuration.
    pub fn catalog_sources(&self) -> CatalogSources {
        CatalogSources::standard_with_timeout(
            self.origin.as_deref(),
            &self.data_root,
            Duration::from_millis(self.fetch_timeout_ms),
        )
    }

    fn sanitized(mut self) -> Self {
        if !(self.max_distance.is_finite() && self.max_distance >= 0.0) {
            warn!(
                max_distance = self.max_distance,
                "Invalid trigger radius. Using {DEFAULT_MAX_DISTANCE}"
            );
            self.max_distance = DEFAULT_MAX_DISTANCE;
        }
        if self.fetch_timeout_ms == 0 {
            warn!("Zero catalog fetch timeout. Using the default");
            self.fetch_timeout_ms = DEFAULT_FETCH_TIMEOUT.as_millis() as u64;
        }
        if self.trigger_key.trim().is_empty() {
            warn!("Empty trigger key. Using {DEFAULT_TRIGGER_KEY}");
            self.trigger_key = DEFAULT_TRIGGER_KEY.to_string();
        }
        self.audio = self.audio.sanitized();
        self
    }
}
