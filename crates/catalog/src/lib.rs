#![warn(missing_docs)]
//! Creature catalog loading.
//!
//! The catalog is fetched from an ordered list of [`CatalogSource`]s. The
//! first source that answers with parseable JSON wins; failures are logged
//! and the next source is tried. Loading never fails outright: when every
//! source is unavailable the catalog is simply empty.
//!
//! # Example
//!
//! ```ignore
//! let sources = CatalogSources::standard(Some("http://localhost:8080"), Path::new("."));
//! let load = load_catalog(&sources).await;
//! println!("{} creatures from {:?}", load.records.len(), load.source);
//! ```

mod loader;
mod source;

pub use loader::{load_catalog, parse_catalog, CatalogLoad, SourceFailure};
pub use source::{
    CatalogSource, CatalogSources, FileSource, HttpSource, StaticSource,
    DEFAULT_TIMEOUT as DEFAULT_FETCH_TIMEOUT,
};

use thiserror::Error;

/// Reasons a single catalog source can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a local file failed.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    /// The server answered with a non-success status.
    #[error("status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The payload was not valid JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The background fetch task was cancelled or panicked.
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
