//! Audio backends: a silent stub and, with `rodio_backend`, real output.

use crate::{AudioBackend, AudioClip, CompletionSignal, PlaybackError, Preload};
use std::time::{Duration, Instant};
use tracing::debug;

#[cfg(feature = "rodio_backend")]
pub use self::rodio_output::{RodioBackend, RodioClip};

/// Backend that produces silent clips.
///
/// Clips track play/pause state like real ones. With a clip length set they
/// also report completion once that much time has passed since `play`.
#[derive(Debug, Default)]
pub struct StubBackend {
    clip_length: Option<Duration>,
}

impl StubBackend {
    /// Clips that never finish on their own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clips that finish `length` after they start.
    pub fn with_clip_length(length: Duration) -> Self {
        Self {
            clip_length: Some(length),
        }
    }
}

impl AudioBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn load(&mut self, url: &str, _preload: Preload) -> Result<Box<dyn AudioClip>, PlaybackError> {
        Ok(Box::new(StubClip {
            source: url.to_string(),
            length: self.clip_length,
            started: None,
            pending: None,
        }))
    }
}

/// Silent clip produced by [`StubBackend`].
#[derive(Debug)]
pub struct StubClip {
    source: String,
    length: Option<Duration>,
    started: Option<Instant>,
    pending: Option<CompletionSignal>,
}

impl AudioClip for StubClip {
    fn source(&self) -> &str {
        &self.source
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn rewind(&mut self) -> Result<(), PlaybackError> {
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn play(&mut self, on_end: CompletionSignal) -> Result<(), PlaybackError> {
        debug!(source = %self.source, ticket = %on_end.ticket(), "Stub playback started");
        self.started = Some(Instant::now());
        self.pending = Some(on_end);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.started = None;
        self.pending = None;
        Ok(())
    }

    fn poll(&mut self) {
        let (Some(started), Some(length)) = (self.started, self.length) else {
            return;
        };
        if started.elapsed() >= length {
            self.started = None;
            if let Some(signal) = self.pending.take() {
                signal.notify();
            }
        }
    }
}

#[cfg(feature = "rodio_backend")]
mod rodio_output {
    use super::*;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tracing::warn;

    /// Backend that plays clips through the default output device.
    pub struct RodioBackend {
        /// Output stream (must be kept alive)
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sound_dir: PathBuf,
        prefix: String,
    }

    impl RodioBackend {
        /// Open the default output device.
        ///
        /// Clip URLs of the form `{prefix}{encoded name}` are resolved to
        /// `{sound_dir}/{name}`.
        pub fn new(sound_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, PlaybackError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| PlaybackError::Backend(format!("failed to open output stream: {e}")))?;
            debug!("Audio backend: rodio");
            Ok(Self {
                _stream: stream,
                handle,
                sound_dir: sound_dir.into(),
                prefix: prefix.into(),
            })
        }

        fn resolve(&self, url: &str) -> PathBuf {
            let name = url.strip_prefix(self.prefix.as_str()).unwrap_or(url);
            let name = urlencoding::decode(name)
                .map(|n| n.into_owned())
                .unwrap_or_else(|_| name.to_string());
            self.sound_dir.join(name)
        }
    }

    impl AudioBackend for RodioBackend {
        fn name(&self) -> &'static str {
            "rodio"
        }

        fn load(&mut self, url: &str, preload: Preload) -> Result<Box<dyn AudioClip>, PlaybackError> {
            let path = self.resolve(url);
            let data = match preload {
                Preload::Auto => match read_sound(&path) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        // Reported again when playback is attempted.
                        warn!(path = %path.display(), "Failed to buffer sound: {e}");
                        None
                    }
                },
                Preload::None => None,
            };
            Ok(Box::new(RodioClip {
                source: url.to_string(),
                path,
                data,
                handle: self.handle.clone(),
                sink: None,
                volume: 1.0,
                pending: None,
            }))
        }
    }

    fn read_sound(path: &Path) -> Result<Arc<[u8]>, PlaybackError> {
        Ok(std::fs::read(path)?.into())
    }

    /// Clip backed by a rodio sink.
    pub struct RodioClip {
        source: String,
        path: PathBuf,
        data: Option<Arc<[u8]>>,
        handle: OutputStreamHandle,
        sink: Option<Sink>,
        volume: f32,
        pending: Option<CompletionSignal>,
    }

    impl AudioClip for RodioClip {
        fn source(&self) -> &str {
            &self.source
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
            if let Some(sink) = &self.sink {
                sink.set_volume(volume);
            }
        }

        fn rewind(&mut self) -> Result<(), PlaybackError> {
            // A fresh sink is created on the next play.
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
            self.pending = None;
            Ok(())
        }

        fn play(&mut self, on_end: CompletionSignal) -> Result<(), PlaybackError> {
            if let Some(sink) = &self.sink {
                if !sink.empty() {
                    sink.play();
                    self.pending = Some(on_end);
                    return Ok(());
                }
            }

            let data = match &self.data {
                Some(data) => data.clone(),
                None => {
                    let data = read_sound(&self.path)?;
                    self.data = Some(data.clone());
                    data
                }
            };
            let source = Decoder::new(Cursor::new(data))
                .map_err(|e| PlaybackError::Decode(e.to_string()))?;
            let sink = Sink::try_new(&self.handle)
                .map_err(|e| PlaybackError::Backend(format!("failed to create audio sink: {e}")))?;
            sink.set_volume(self.volume);
            sink.append(source);
            self.sink = Some(sink);
            self.pending = Some(on_end);
            Ok(())
        }

        fn pause(&mut self) -> Result<(), PlaybackError> {
            if let Some(sink) = &self.sink {
                sink.pause();
            }
            Ok(())
        }

        fn poll(&mut self) {
            let finished = self
                .sink
                .as_ref()
                .map(|s| s.empty() && !s.is_paused())
                .unwrap_or(false);
            if finished {
                self.sink = None;
                if let Some(signal) = self.pending.take() {
                    signal.notify();
                }
            }
        }
    }
}
