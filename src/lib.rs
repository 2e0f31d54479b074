//! exhibit-sound - proximity-triggered creature sounds for virtual exhibits
//!
//! A visitor walks through a 3D gallery; pressing the trigger key near an
//! exhibit plays that creature's sound on a single exclusive channel.
//! [`GallerySound`] owns all state and is the only entry point.

pub mod config;
pub mod debug;
pub mod events;
pub mod gallery;
pub mod headless;
pub mod input;
pub mod scripted_input;

pub use config::GalleryConfig;
pub use debug::DebugSnapshot;
pub use gallery::GallerySound;
pub use input::{InputGate, TriggerOutcome};
