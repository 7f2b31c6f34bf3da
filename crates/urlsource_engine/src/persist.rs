use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use source_logging::{source_debug, source_info, source_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::codec::{deserialize_request, serialize_request};
use crate::RequestConfig;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("settings path has no file name: {0}")]
    InvalidPath(String),
    #[error("settings directory missing or not writable: {0}")]
    SettingsDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::SettingsDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::SettingsDir("path is not a directory".into()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::SettingsDir(e.to_string()))
}

/// Serializes `config` and replaces the file at `path` with it.
pub fn save_request_config(path: &Path, config: &RequestConfig) -> Result<(), PersistError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::InvalidPath(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let written = AtomicFileWriter::new(dir).write(filename, &serialize_request(config))?;
    source_info!("Saved request settings to {:?}", written);
    Ok(())
}

/// Loads a config saved with [`save_request_config`]. A missing, unreadable
/// or malformed file yields [`RequestConfig::default`].
pub fn load_request_config(path: &Path) -> RequestConfig {
    match fs::read_to_string(path) {
        Ok(text) => deserialize_request(&text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            source_debug!("No request settings at {:?}", path);
            RequestConfig::default()
        }
        Err(err) => {
            source_warn!("Failed to read request settings from {:?}: {}", path, err);
            RequestConfig::default()
        }
    }
}
