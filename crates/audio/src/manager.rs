//! Audio manager: the single creature sound channel.

use crate::clip::CompletionMint;
use crate::{
    completion_channel, AudioBackend, AudioSettings, PlaybackTicket, SoundBank, StubBackend,
};
use exhibit_sound_core::{CreatureId, CreatureRecord};
use serde::Serialize;
use std::sync::mpsc::Receiver;
use tracing::{debug, error, warn};

/// What the creature channel is doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing is playing.
    Idle,
    /// A creature sound was started and has not finished or been stopped.
    Playing {
        /// Creature whose clip is playing.
        creature: CreatureId,
        /// Ticket of the `play` call that started it.
        ticket: PlaybackTicket,
    },
}

impl PlaybackState {
    fn ticket(&self) -> Option<PlaybackTicket> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing { ticket, .. } => Some(*ticket),
        }
    }
}

/// Result of [`AudioManager::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The clip was started (or its start failure was logged).
    Started(PlaybackTicket),
    /// No clip is loaded for that creature.
    NotLoaded,
}

/// Playback controller for creature sounds.
///
/// At most one creature sound is current at any time. Starting a sound
/// always stops and rewinds the previous one first.
pub struct AudioManager {
    /// Backend used to create clips
    backend: Box<dyn AudioBackend>,
    /// Preloaded clips
    bank: SoundBank,
    /// Current audio settings
    settings: AudioSettings,
    /// What is playing right now
    state: PlaybackState,
    /// Mints completion signals handed to clips
    mint: CompletionMint,
    /// Receives tickets of clips that finished
    completions: Receiver<PlaybackTicket>,
    next_ticket: u64,
}

impl AudioManager {
    /// Create a manager on top of `backend`, resolving sounds under `prefix`.
    pub fn new(backend: impl AudioBackend + 'static, prefix: impl Into<String>) -> Self {
        Self::with_backend(Box::new(backend), prefix)
    }

    /// Like [`new`](Self::new), for a backend chosen at runtime.
    pub fn with_backend(backend: Box<dyn AudioBackend>, prefix: impl Into<String>) -> Self {
        let (mint, completions) = completion_channel();
        debug!(backend = backend.name(), "Audio manager initialized");
        Self {
            backend,
            bank: SoundBank::new(prefix),
            settings: AudioSettings::default(),
            state: PlaybackState::Idle,
            mint,
            completions,
            next_ticket: 0,
        }
    }

    /// Create a stub audio manager that doesn't actually play audio.
    ///
    /// Useful for testing or headless operation.
    pub fn stub() -> Self {
        Self::new(StubBackend::new(), crate::DEFAULT_SOUND_PREFIX)
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Get the current audio settings.
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Get mutable access to audio settings.
    ///
    /// Changes apply to the next sound started.
    pub fn settings_mut(&mut self) -> &mut AudioSettings {
        &mut self.settings
    }

    /// Update audio settings.
    pub fn update_settings(&mut self, settings: AudioSettings) {
        self.settings = settings;
    }

    /// Rebuild the sound bank from catalog records.
    ///
    /// The current sound is stopped first, since its clip is about to be
    /// dropped. Returns the number of clips loaded.
    pub fn preload(&mut self, records: &[CreatureRecord]) -> usize {
        self.stop();
        self.bank.rebuild(self.backend.as_mut(), records)
    }

    /// Preloaded clips.
    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Play the sound of a creature, replacing whatever is playing.
    pub fn play(&mut self, id: &CreatureId) -> PlayOutcome {
        self.stop();

        let Some(clip) = self.bank.get_mut(id) else {
            warn!("No audio found for creature id: {id}");
            return PlayOutcome::NotLoaded;
        };

        self.next_ticket += 1;
        let ticket = PlaybackTicket(self.next_ticket);
        clip.set_volume(self.settings.effective_creature_volume());
        let started = clip
            .rewind()
            .and_then(|()| clip.play(self.mint.signal(ticket)));
        if let Err(e) = started {
            error!("Failed to play creature sound {id}: {e}");
        } else {
            debug!(creature = %id, %ticket, source = clip.source(), "Creature sound started");
        }

        self.state = PlaybackState::Playing {
            creature: id.clone(),
            ticket,
        };
        PlayOutcome::Started(ticket)
    }

    /// Stop and rewind the current sound, if any.
    pub fn stop(&mut self) {
        let PlaybackState::Playing { creature, ticket } =
            std::mem::replace(&mut self.state, PlaybackState::Idle)
        else {
            return;
        };
        let Some(clip) = self.bank.get_mut(&creature) else {
            return;
        };
        match clip.pause().and_then(|()| clip.rewind()) {
            Ok(()) => debug!(%creature, %ticket, "Creature sound stopped"),
            Err(e) => warn!("Error stopping current creature sound {creature}: {e}"),
        }
    }

    /// Drain completion notifications.
    ///
    /// A completion only clears the channel when it belongs to the sound that
    /// is current; completions of replaced sounds are ignored. Returns true
    /// if the current sound finished.
    pub fn pump_completions(&mut self) -> bool {
        let mut finished = false;
        while let Ok(ticket) = self.completions.try_recv() {
            if self.state.ticket() == Some(ticket) {
                debug!(%ticket, "Creature sound finished");
                self.state = PlaybackState::Idle;
                finished = true;
            } else {
                debug!(%ticket, "Ignoring completion of a replaced sound");
            }
        }
        finished
    }

    /// Update audio state (call once per frame).
    ///
    /// Lets the current clip detect its end, then handles completions.
    pub fn update(&mut self) -> bool {
        if let PlaybackState::Playing { creature, .. } = &self.state {
            if let Some(clip) = self.bank.get_mut(creature) {
                clip.poll();
            }
        }
        self.pump_completions()
    }

    /// Playback state of the creature channel.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Creature whose sound is current.
    pub fn current(&self) -> Option<&CreatureId> {
        match &self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing { creature, .. } => Some(creature),
        }
    }

    /// Whether a creature sound is current.
    pub fn is_playing(&self) -> bool {
        self.current().is_some()
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::stub()
    }
}
