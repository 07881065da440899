use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use yakugo_core::{Error, Result};

/// JSON file holding a store's rows
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `T::default()` when the file does not exist yet
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no snapshot at {}, starting empty", self.path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(self.error("failed to open", e)),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| self.error("failed to parse", e))
    }

    /// Pretty JSON for [`JsonSnapshot::write`]
    pub fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_vec_pretty(value).map_err(|e| self.error("failed to serialize", e))
    }

    /// Replace the snapshot with `contents` on the blocking pool
    pub async fn write(&self, contents: Vec<u8>) -> Result<()> {
        let snapshot = self.clone();
        tokio::task::spawn_blocking(move || snapshot.replace(&contents))
            .await
            .map_err(|e| self.error("failed to finish writing", e))?
    }

    /// Write a sibling temp file, then rename it over the snapshot
    fn replace(&self, contents: &[u8]) -> Result<()> {
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| self.error("failed to create directory for", e))?;

        let temp_file =
            NamedTempFile::new_in(parent_dir).map_err(|e| self.error("failed to stage", e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer
                .write_all(contents)
                .and_then(|()| writer.flush())
                .map_err(|e| self.error("failed to write", e))?;
        }

        temp_file
            .persist(&self.path)
            .map_err(|e| self.error("failed to replace", e.error))?;
        Ok(())
    }

    fn error(&self, what: &str, source: impl Into<yakugo_core::BoxError>) -> Error {
        Error::storage(format!("{what} snapshot {}", self.path.display()), source)
    }
}
