use async_trait::async_trait;
use exhibit_sound_catalog::{CatalogError, CatalogSource};
use std::cell::Cell;
use std::rc::Rc;

enum Script {
    Payload(Vec<u8>),
    Status(u16),
}

/// Catalog source with a fixed answer that counts how often it was asked.
pub struct ScriptedSource {
    label: String,
    script: Script,
    calls: Rc<Cell<usize>>,
}

impl ScriptedSource {
    /// Answer with `payload`.
    pub fn payload(label: &str, payload: impl Into<Vec<u8>>) -> Self {
        Self::build(label, Script::Payload(payload.into()))
    }

    /// Answer with an HTTP error status.
    pub fn status(label: &str, status: u16) -> Self {
        Self::build(label, Script::Status(status))
    }

    fn build(label: &str, script: Script) -> Self {
        Self {
            label: label.to_string(),
            script,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Shared call counter; stays valid after the source is moved into a chain.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }
}

#[async_trait(?Send)]
impl CatalogSource for ScriptedSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        self.calls.set(self.calls.get() + 1);
        match &self.script {
            Script::Payload(bytes) => Ok(bytes.clone()),
            Script::Status(status) => Err(CatalogError::Status {
                url: self.label.clone(),
                status: *status,
            }),
        }
    }
}
