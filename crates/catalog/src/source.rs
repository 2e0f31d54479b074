//! Catalog sources: HTTP endpoints, local files, and in-memory payloads.

use crate::CatalogError;
use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Same-origin API path serving the live catalog.
pub const API_PATH: &str = "/api/creatures";
/// Same-origin static copy of the catalog.
pub const STATIC_PATH: &str = "/data/creatures.json";
/// Static copy relative to the data root, for flat hosting.
pub const RELATIVE_PATH: &str = "data/creatures.json";

/// Request timeout used unless a source is configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A place the catalog can be fetched from.
///
/// Sources only deliver raw bytes; parsing happens in the loader so every
/// source gets the same normalization.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Fetch the raw catalog payload.
    async fn fetch(&self) -> Result<Vec<u8>, CatalogError>;
}

/// Catalog served over HTTP.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    /// Fetch from `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait(?Send)]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        let url = self.url.clone();
        let timeout = self.timeout;
        // ureq is blocking; keep it off the event loop.
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, CatalogError> {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            let response = agent.get(&url).call().map_err(|err| match err {
                ureq::Error::Status(status, _) => CatalogError::Status {
                    url: url.clone(),
                    status,
                },
                other => CatalogError::Http(Box::new(other)),
            })?;
            let mut body = Vec::new();
            response.into_reader().read_to_end(&mut body)?;
            debug!(url = %url, bytes = body.len(), "Fetched catalog");
            Ok(body)
        })
        .await?
    }
}

/// Catalog stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Catalog embedded in memory.
pub struct StaticSource {
    label: String,
    payload: Vec<u8>,
}

impl StaticSource {
    /// Serve `payload` under the given log label.
    pub fn new(label: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        Ok(self.payload.clone())
    }
}

/// Ordered list of candidate sources.
#[derive(Default)]
pub struct CatalogSources {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogSources {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard fallback chain.
    ///
    /// With an origin: `{origin}/api/creatures`, `{origin}/data/creatures.json`,
    /// then `{data_root}/data/creatures.json`. Without one (or with the
    /// opaque `"null"` origin of `file://` pages) only the local file is tried.
    pub fn standard(origin: Option<&str>, data_root: &Path) -> Self {
        Self::standard_with_timeout(origin, data_root, DEFAULT_TIMEOUT)
    }

    /// [`standard`](Self::standard) with a custom timeout for the HTTP candidates.
    pub fn standard_with_timeout(origin: Option<&str>, data_root: &Path, timeout: Duration) -> Self {
        let mut chain = Self::new();
        if let Some(origin) = normalize_origin(origin) {
            for path in [API_PATH, STATIC_PATH] {
                chain.push(HttpSource::new(format!("{origin}{path}")).with_timeout(timeout));
            }
        }
        chain.push(FileSource::new(data_root.join(RELATIVE_PATH)));
        chain
    }

    /// Append a source to the end of the chain.
    pub fn push(&mut self, source: impl CatalogSource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, source: impl CatalogSource + 'static) -> Self {
        self.push(source);
        self
    }

    /// Sources in the order they will be tried.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CatalogSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no candidates.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Log labels of every candidate, in order.
    pub fn describe(&self) -> Vec<String> {
        self.iter().map(|s| s.describe()).collect()
    }
}

fn normalize_origin(origin: Option<&str>) -> Option<&str> {
    let origin = origin?.trim().trim_end_matches('/');
    if origin.is_empty() || origin == "null" {
        None
    } else {
        Some(origin)
    }
}
