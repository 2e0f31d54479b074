use exhibit_sound_audio::{AudioBackend, AudioClip, CompletionSignal, PlaybackError, Preload};
use std::cell::RefCell;
use std::rc::Rc;

/// Something a recorded clip was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipEvent {
    /// Clip created by the backend.
    Loaded {
        /// Clip URL.
        url: String,
        /// Requested buffering.
        preload: Preload,
    },
    /// Volume applied.
    Volume(String, f32),
    /// Position reset.
    Rewind(String),
    /// Playback started.
    Play(String),
    /// Playback paused.
    Pause(String),
}

#[derive(Debug, Default)]
struct LogInner {
    events: Vec<ClipEvent>,
    signals: Vec<(String, CompletionSignal)>,
}

/// Shared record of every clip operation and the completion signals handed out.
#[derive(Debug, Clone, Default)]
pub struct ClipLog {
    inner: Rc<RefCell<LogInner>>,
}

impl ClipLog {
    fn push(&self, event: ClipEvent) {
        self.inner.borrow_mut().events.push(event);
    }

    /// Every recorded event, in order.
    pub fn events(&self) -> Vec<ClipEvent> {
        self.inner.borrow().events.clone()
    }

    /// Events other than loads and volume changes.
    pub fn transport(&self) -> Vec<ClipEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ClipEvent::Rewind(_) | ClipEvent::Play(_) | ClipEvent::Pause(_)))
            .collect()
    }

    /// URLs of clips that were started, in order.
    pub fn played(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ClipEvent::Play(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded events (signals are kept).
    pub fn clear(&self) {
        self.inner.borrow_mut().events.clear();
    }

    /// Fire the completion signal handed out by the `n`th play call.
    ///
    /// Returns false if there was no such call.
    pub fn finish(&self, n: usize) -> bool {
        match self.inner.borrow().signals.get(n) {
            Some((_, signal)) => {
                signal.notify();
                true
            }
            None => false,
        }
    }

    /// Fire the completion signal of the most recent play call.
    pub fn finish_last(&self) -> bool {
        let count = self.inner.borrow().signals.len();
        count > 0 && self.finish(count - 1)
    }
}

/// Backend whose clips record every call into a [`ClipLog`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: ClipLog,
    fail_play: bool,
}

impl RecordingBackend {
    /// Backend sharing `log`.
    pub fn new(log: ClipLog) -> Self {
        Self {
            log,
            fail_play: false,
        }
    }

    /// Make every `play` call fail after recording it.
    pub fn failing_play(mut self) -> Self {
        self.fail_play = true;
        self
    }

    /// Shared log handle.
    pub fn log(&self) -> ClipLog {
        self.log.clone()
    }
}

impl AudioBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn load(&mut self, url: &str, preload: Preload) -> Result<Box<dyn AudioClip>, PlaybackError> {
        self.log.push(ClipEvent::Loaded {
            url: url.to_string(),
            preload,
        });
        Ok(Box::new(RecordedClip {
            url: url.to_string(),
            log: self.log.clone(),
            fail_play: self.fail_play,
        }))
    }
}

struct RecordedClip {
    url: String,
    log: ClipLog,
    fail_play: bool,
}

impl AudioClip for RecordedClip {
    fn source(&self) -> &str {
        &self.url
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.push(ClipEvent::Volume(self.url.clone(), volume));
    }

    fn rewind(&mut self) -> Result<(), PlaybackError> {
        self.log.push(ClipEvent::Rewind(self.url.clone()));
        Ok(())
    }

    fn play(&mut self, on_end: CompletionSignal) -> Result<(), PlaybackError> {
        self.log.push(ClipEvent::Play(self.url.clone()));
        self.log
            .inner
            .borrow_mut()
            .signals
            .push((self.url.clone(), on_end));
        if self.fail_play {
            return Err(PlaybackError::Backend("playback refused".into()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.log.push(ClipEvent::Pause(self.url.clone()));
        Ok(())
    }
}
