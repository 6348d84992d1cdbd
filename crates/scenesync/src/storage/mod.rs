//! Collision-avoiding persistence for the merged project document.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::StorageError;

/// Writes merged project documents, moving an existing output file out of
/// the way unless overwriting is enabled.
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    output_path: PathBuf,
    overwrite: bool,
}

impl ProjectWriter {
    pub fn new<P: AsRef<Path>>(output_path: P, overwrite: bool) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            overwrite,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Serializes and writes `document` to the configured output path.
    ///
    /// With overwrite disabled, an existing output file is first renamed
    /// to `{stem}_{YYYYMMDDHHMMSS}{.ext}` (local capture time); the fresh
    /// content always lands at the configured path. Returns the path the
    /// previous file was moved to, if a move happened.
    pub fn write(&self, document: &Value) -> Result<Option<PathBuf>, StorageError> {
        let backup = if !self.overwrite && self.output_path.exists() {
            let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
            let backup_path = timestamped_path(&self.output_path, &timestamp);
            std::fs::rename(&self.output_path, &backup_path).map_err(|e| {
                StorageError::Backup {
                    from: self.output_path.clone(),
                    to: backup_path.clone(),
                    source: e,
                }
            })?;
            debug!("Existing output moved to '{}'", backup_path.display());
            Some(backup_path)
        } else {
            None
        };

        let content = serde_yaml::to_string(document)?;
        std::fs::write(&self.output_path, content).map_err(|e| StorageError::WriteFile {
            path: self.output_path.clone(),
            source: e,
        })?;
        info!("Project file written to '{}'", self.output_path.display());

        Ok(backup)
    }
}

/// `name.ext` becomes `name_{timestamp}.ext`; a file without an extension
/// gets the suffix appended to its whole name.
fn timestamped_path(path: &Path, timestamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_file_name(format!("{}_{}.{}", stem, timestamp, ext)),
        None => path.with_file_name(format!("{}_{}", stem, timestamp)),
    }
}
