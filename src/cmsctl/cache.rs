//! Cache-file staging for edit sessions.
//!
//! A cache entry is `<config-dir>/cache/<id>.json`, lives for one edit
//! session, and maps 1:1 to a resource id. There is no locking: concurrent
//! sessions on the same id race on the same file.

use crate::error::{CmsError, Result};
use crate::fsutil::{self, Encoding, FileContent, ReadValue};
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIRNAME: &str = "cache";

pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            dir: config_dir.join(CACHE_DIRNAME),
        }
    }

    /// The cache-file path for a resource id.
    pub fn path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Stages content for a resource, creating the cache directory first,
    /// and returns the file path.
    pub fn write(&self, id: &str, content: &str) -> Result<PathBuf> {
        fsutil::make_directory(&self.dir)?;

        let path = self.path(id);
        fsutil::write(content, &path)?;

        Ok(path)
    }

    /// Reads a staged file back as text.
    pub fn read(&self, id: &str) -> Result<String> {
        match fsutil::read(self.path(id), Some(Encoding::Utf8))? {
            ReadValue::Scalar(FileContent::Text(text)) => Ok(text),
            _ => Err(CmsError::Filesystem(io::Error::other(format!(
                "Expected a single cache file for {}",
                id
            )))),
        }
    }

    /// Removes a staged file.
    pub fn remove(&self, id: &str) -> Result<()> {
        fsutil::remove(self.path(id))
    }
}
