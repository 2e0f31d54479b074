//! Creature sound playback for exhibit-sound.
//!
//! Preloads one clip per catalog creature and plays them on a single
//! exclusive channel: starting a sound always stops the previous one first.
//! Background music is owned by the host page and never touched here.
//!
//! # Architecture
//!
//! - [`AudioManager`] - Playback controller: play, stop, completion tracking
//! - [`SoundBank`] - Preloaded clips keyed by creature id
//! - [`AudioBackend`] / [`AudioClip`] - Seams to the actual audio output
//! - [`AudioSettings`] - Volume controls for the creature channel
//!
//! # Example
//!
//! ```ignore
//! let mut audio = AudioManager::stub();
//! audio.preload(&records);
//! audio.play(&CreatureId::new("artwork1"));
//! audio.update();
//! ```

mod backend;
mod bank;
mod clip;
mod manager;
mod settings;

pub use backend::{StubBackend, StubClip};
#[cfg(feature = "rodio_backend")]
pub use backend::{RodioBackend, RodioClip};
pub use bank::{sound_url, SoundBank, DEFAULT_SOUND_PREFIX};
pub use clip::{
    completion_channel, AudioBackend, AudioClip, CompletionMint, CompletionSignal, PlaybackError,
    PlaybackTicket, Preload,
};
pub use manager::{AudioManager, PlayOutcome, PlaybackState};
pub use settings::AudioSettings;
