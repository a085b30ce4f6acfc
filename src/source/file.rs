//! File-based data source.
//!
//! Reads a saved scrape, e.g. the output of
//! `curl -s localhost:9400/metrics > scrape.txt`, or standard input when
//! the path is `-`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use super::{ExpositionSource, FetchError};

/// A data source that reads exposition text from a file or stdin.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path. `-` means stdin.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = if path.as_os_str() == "-" {
            "stdin".to_string()
        } else {
            format!("file: {}", path.display())
        };
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl ExpositionSource for FileSource {
    fn fetch(&mut self) -> Result<String, FetchError> {
        info!(source = %self.description, "reading snapshot");

        let result = if self.is_stdin() {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text).map(|_| text)
        } else {
            fs::read_to_string(&self.path)
        };

        result.map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}
