// src/store.rs
//! Last retrieved table, kept on disk so the next run can tell what is new.
use std::{fs, io, path::{Path, PathBuf}};

use thiserror::Error;

use crate::config::consts::SNAPSHOT_FILE;
use crate::grades::GradesTable;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

pub fn snapshot_path(dir: &Path) -> PathBuf {
    dir.join(SNAPSHOT_FILE)
}

pub fn save_snapshot(dir: &Path, table: &GradesTable) -> Result<PathBuf, StoreError> {
    let path = snapshot_path(dir);
    let io_err = |source| StoreError::Io { path: path.clone(), source };

    fs::create_dir_all(dir).map_err(io_err)?;
    let json = serde_json::to_string_pretty(table)
        .map_err(|source| StoreError::Json { path: path.clone(), source })?;
    fs::write(&path, json).map_err(io_err)?;

    logd!("snapshot saved to {}", path.display());
    Ok(path)
}

/// `Ok(None)` when no snapshot has been saved yet.
pub fn load_snapshot(dir: &Path) -> Result<Option<GradesTable>, StoreError> {
    let path = snapshot_path(dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path, source }),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Json { path, source })
}
