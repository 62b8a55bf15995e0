//! The output file: a pretty-printed `ResultSet` replaced atomically on every run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::NormalizedModel;

/// Errors reading or writing the output file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to serialize models: {0}")]
    Serialize(serde_json::Error),
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Invalid model file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The persisted envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub updated_at: String,
    pub total_count: usize,
    pub models: Vec<NormalizedModel>,
}

impl ResultSet {
    /// Wrap `models` with the current UTC time; `total_count` always matches `models.len()`.
    pub fn new(models: Vec<NormalizedModel>) -> Self {
        Self {
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_count: models.len(),
            models,
        }
    }
}

/// Write `models` to `path`, creating the parent directory if needed.
/// The file is written next to the target and renamed into place, so readers see
/// either the previous file or the new one, never a partial write.
pub fn save_result_set(
    path: &Path,
    models: Vec<NormalizedModel>,
) -> Result<ResultSet, PersistError> {
    let result_set = ResultSet::new(models);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut json = serde_json::to_string_pretty(&result_set).map_err(PersistError::Serialize)?;
    json.push('\n');

    let tmp = tmp_path(path);
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Err(e) = fs::write(&tmp, json) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(result_set)
}

/// Read a previously written output file.
pub fn load_result_set(path: &Path) -> Result<ResultSet, PersistError> {
    let data = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `free_models.json` -> `free_models.json.tmp`, in the same directory.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
