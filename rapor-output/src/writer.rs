//! Filesystem placement of export files

use crate::errors::ExportError;
use chrono::{DateTime, Utc};
use rapor_config::domains::export::ExportConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// `rapor-<epoch-ms>.<extension>`
pub fn export_file_name(extension: &str, at: DateTime<Utc>) -> String {
    format!("rapor-{}.{}", at.timestamp_millis(), extension)
}

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Order rows written, headers excluded
    pub orders: usize,
}

/// Writes rendered exports into the configured directory
#[derive(Debug, Clone)]
pub struct ExportWriter {
    config: ExportConfig,
}

impl ExportWriter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    pub fn utf8_bom(&self) -> bool {
        self.config.utf8_bom
    }

    /// Write `data` as `file_name` inside the export directory
    pub async fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, ExportError> {
        let path = self.config.directory.join(file_name);
        let shown = path.to_string_lossy().to_string();

        if file_name.contains('\0') || file_name.contains(std::path::MAIN_SEPARATOR) {
            return Err(ExportError::Filesystem {
                path: shown,
                operation: "validate".to_string(),
                error: "file name must be a single path component".to_string(),
            });
        }

        if self.config.create_dirs {
            fs::create_dir_all(&self.config.directory)
                .await
                .map_err(|e| ExportError::Filesystem {
                    path: self.config.directory.to_string_lossy().to_string(),
                    operation: "create_dirs".to_string(),
                    error: e.to_string(),
                })?;
        }

        let write_error = |e: std::io::Error| ExportError::Filesystem {
            path: shown.clone(),
            operation: "write".to_string(),
            error: e.to_string(),
        };

        if self.config.overwrite {
            fs::write(&path, data).await.map_err(write_error)?;
        } else {
            // create_new makes the existence check and the create one step
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => ExportError::FileExists {
                        path: shown.clone(),
                    },
                    _ => write_error(e),
                })?;
            file.write_all(data).await.map_err(write_error)?;
            file.flush().await.map_err(write_error)?;
        }

        info!(path = %shown, bytes = data.len(), "Export written");
        Ok(path)
    }
}
