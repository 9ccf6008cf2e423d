//! Key-value persistence for tracker state.
//!
//! State lives as one JSON file per key inside the data directory. Writes
//! are atomic (temp file, fsync, rename) under an exclusive lock; reads
//! take a shared lock. Missing or unreadable data degrades to `None` so
//! callers fall back to defaults instead of surfacing an error.

use crate::Result;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key under which the profile is stored
pub const PROFILE_KEY: &str = "profile";

/// Key under which the full drink log is stored
pub const DRINK_LOG_KEY: &str = "allDrinks";

/// Storage seam for tracker state
pub trait KeyValueStore {
    /// Load the raw value for a key, or None if absent or unreadable
    fn load(&self, key: &str) -> Option<String>;

    /// Persist the raw value for a key
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` per key
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!("No stored value for key '{}'", key);
            return None;
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open {:?}: {}. Using defaults.", path, e);
                return None;
            }
        };

        // Shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock {:?}: {}. Using defaults.", path, e);
            return None;
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        let _ = file.unlock();

        match read {
            Ok(_) => {
                tracing::debug!("Loaded key '{}' from {:?}", key, path);
                Some(contents)
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}. Using defaults.", path, e);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old file
        temp.persist(self.path_for(key))
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Saved key '{}' to {:?}", key, self.path_for(key));
        Ok(())
    }
}
