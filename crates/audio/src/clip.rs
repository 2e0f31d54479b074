//! Playable clip abstraction and completion notifications.

use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

/// Errors raised by an audio backend.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output device or stream is unusable.
    #[error("audio backend error: {0}")]
    Backend(String),
    /// The sound data could not be decoded.
    #[error("failed to decode audio: {0}")]
    Decode(String),
    /// The sound file could not be read.
    #[error("failed to read sound: {0}")]
    Io(#[from] std::io::Error),
}

/// How eagerly a clip should buffer its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preload {
    /// Fetch nothing until playback starts.
    None,
    /// Buffer the whole sound up front.
    #[default]
    Auto,
}

/// Identifies one `play` call, so completions can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlaybackTicket(pub u64);

impl fmt::Display for PlaybackTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handed to a clip when it starts; fired once playback reaches the end.
#[derive(Debug, Clone)]
pub struct CompletionSignal {
    ticket: PlaybackTicket,
    tx: Sender<PlaybackTicket>,
}

impl CompletionSignal {
    /// Ticket of the playback this signal belongs to.
    pub fn ticket(&self) -> PlaybackTicket {
        self.ticket
    }

    /// Report that playback finished.
    ///
    /// Safe to call after the controller is gone.
    pub fn notify(&self) {
        let _ = self.tx.send(self.ticket);
    }
}

/// Sender half used to mint signals, receiver half drained by the controller.
pub fn completion_channel() -> (CompletionMint, Receiver<PlaybackTicket>) {
    let (tx, rx) = mpsc::channel();
    (CompletionMint { tx }, rx)
}

/// Creates [`CompletionSignal`]s that feed a single receiver.
#[derive(Debug, Clone)]
pub struct CompletionMint {
    tx: Sender<PlaybackTicket>,
}

impl CompletionMint {
    /// Signal for `ticket`.
    pub fn signal(&self, ticket: PlaybackTicket) -> CompletionSignal {
        CompletionSignal {
            ticket,
            tx: self.tx.clone(),
        }
    }
}

/// A loaded sound bound to one source file.
pub trait AudioClip {
    /// Location the clip was loaded from.
    fn source(&self) -> &str;

    /// Set playback volume (0.0 to 1.0).
    fn set_volume(&mut self, volume: f32);

    /// Move the playback position back to the start.
    fn rewind(&mut self) -> Result<(), PlaybackError>;

    /// Start playback. Returns immediately; `on_end` fires when the clip
    /// reaches its end.
    fn play(&mut self, on_end: CompletionSignal) -> Result<(), PlaybackError>;

    /// Pause playback, keeping the position.
    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Give the clip a chance to detect that it finished.
    fn poll(&mut self) {}
}

/// Factory for clips.
pub trait AudioBackend {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Create a clip for the sound at `url`.
    fn load(&mut self, url: &str, preload: Preload) -> Result<Box<dyn AudioClip>, PlaybackError>;
}
