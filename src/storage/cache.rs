use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::utils::paths::get_list_cache_path;

/// File-backed slot for the last fetched task list, stored as an opaque
/// string blob under the fixed "todos" name in the cache directory.
///
/// This is a cold-start hint, never a source of truth: it is written after
/// every successful full fetch and read once at startup. The blob is not
/// validated here; the screen controller parses it and treats anything
/// unreadable as a cache miss.
#[derive(Debug, Clone)]
pub struct ListCache {
    path: PathBuf,
}

impl ListCache {
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: get_list_cache_path()?,
        })
    }

    /// Cache slot at an explicit location instead of the default path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The last saved blob, or `None` if nothing was ever saved or the file
    /// cannot be read.
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    pub fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }
}
