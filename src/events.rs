//! Newline-delimited JSON log of scripted session outcomes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// One logged step of a session.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, T: Serialize> {
    /// Wall-clock time the step completed.
    pub at: DateTime<Utc>,
    /// Index of the step in the script.
    pub step: usize,
    /// Step kind label.
    pub kind: &'a str,
    /// What happened.
    pub payload: &'a T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, event: &EventRecord<'_, T>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let mut sink = JsonlSink::create(&path).expect("can create log");
        for step in 0..2 {
            sink.write(&EventRecord {
                at: Utc::now(),
                step,
                kind: "key",
                payload: &"ok",
            })
            .expect("can write event");
        }
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"step\":1"));
        assert!(lines[0].contains("\"kind\":\"key\""));
    }
}
