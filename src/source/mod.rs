//! Where exposition text comes from.
//!
//! A source hands back one complete exposition payload per call. The
//! extraction pipeline never performs I/O itself.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;
use std::io;
use std::path::PathBuf;

use dcgm_adapters::AdapterError;
use thiserror::Error;

/// Failure to obtain exposition text. Always fatal for the snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] AdapterError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Trait for obtaining one exposition payload.
///
/// # Example
///
/// ```no_run
/// use dcgm_doctor::{ExpositionSource, FileSource};
///
/// let mut source = FileSource::new("scrape.txt");
/// let text = source.fetch().unwrap();
/// println!("{} bytes from {}", text.len(), source.description());
/// ```
pub trait ExpositionSource: Debug {
    /// Fetch the full exposition text. Blocks until it is available.
    fn fetch(&mut self) -> Result<String, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
