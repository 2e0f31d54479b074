//! Fallback chain over catalog sources.

use crate::{CatalogError, CatalogSources};
use exhibit_sound_core::CreatureRecord;
use serde_json::Value;
use tracing::{debug, error, warn};

/// A source that was tried and failed.
#[derive(Debug)]
pub struct SourceFailure {
    /// Source label.
    pub source: String,
    /// Why it failed.
    pub error: CatalogError,
}

/// Result of walking the fallback chain.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    /// Parsed records; empty when every source failed.
    pub records: Vec<CreatureRecord>,
    /// Label of the source that succeeded, if any.
    pub source: Option<String>,
    /// Sources that failed before the winner (or all of them).
    pub failures: Vec<SourceFailure>,
}

impl CatalogLoad {
    /// Whether some source answered successfully.
    pub fn succeeded(&self) -> bool {
        self.source.is_some()
    }
}

/// Parse a catalog payload.
///
/// Invalid JSON is an error. Valid JSON that is not a list is treated as an
/// empty catalog.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CreatureRecord>, CatalogError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(CreatureRecord::from_json).collect(),
        other => {
            debug!(kind = json_kind(&other), "Catalog payload is not a list");
            Vec::new()
        }
    })
}

/// Try each source in order until one yields a parseable catalog.
///
/// Later sources are never fetched once one succeeds. Never fails: if
/// every source is unavailable the returned catalog is empty.
pub async fn load_catalog(sources: &CatalogSources) -> CatalogLoad {
    let mut failures = Vec::new();
    for source in sources.iter() {
        let label = source.describe();
        let attempt = match source.fetch().await {
            Ok(bytes) => parse_catalog(&bytes),
            Err(err) => Err(err),
        };
        match attempt {
            Ok(records) => {
                debug!(source = %label, count = records.len(), "Loaded creature catalog");
                return CatalogLoad {
                    records,
                    source: Some(label),
                    failures,
                };
            }
            Err(err) => {
                warn!("Fetch failed for {label}: {err}");
                failures.push(SourceFailure {
                    source: label,
                    error: err,
                });
            }
        }
    }
    error!("Unable to load creatures from any source");
    CatalogLoad {
        records: Vec::new(),
        source: None,
        failures,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
