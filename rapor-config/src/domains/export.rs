//! Export destination configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how report exports are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving `rapor-<epoch-ms>.*` files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Prefix CSV files with a UTF-8 byte order mark
    #[serde(default = "crate::domains::utils::default_false")]
    pub utf8_bom: bool,

    /// Replace an existing file with the same name
    #[serde(default = "crate::domains::utils::default_false")]
    pub overwrite: bool,

    /// Create the export directory when it does not exist
    #[serde(default = "crate::domains::utils::default_true")]
    pub create_dirs: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            utf8_bom: false,
            overwrite: false,
            create_dirs: true,
        }
    }
}

impl Validatable for ExportConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(self.validation_error("directory cannot be empty"));
        }

        if self.directory.to_string_lossy().contains('\0') {
            return Err(self.validation_error("directory contains null bytes"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "export"
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("exports")
}
