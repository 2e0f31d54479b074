#![warn(missing_docs)]
//! Test doubles for the scene, audio output, and catalog sources.

mod audio;
mod catalog;
mod scene;

pub use audio::{ClipEvent, ClipLog, RecordingBackend};
pub use catalog::ScriptedSource;
pub use scene::MemoryScene;

/// One-record catalog used across integration tests.
pub const LION_CATALOG: &str = r#"[{"id":"artwork1","sound":"lion.mp3","name":"Lion"}]"#;
