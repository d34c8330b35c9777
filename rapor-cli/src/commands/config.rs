//! `rapor config`

use crate::formatter::OutputFormatter;
use anyhow::{anyhow, Context, Result};
use rapor_config::{ConfigLoader, RaporConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Load configuration from file or use defaults
pub fn load_config(config_path: Option<&PathBuf>) -> Result<RaporConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            // A named file must exist; defaults would point at the wrong backend
            if !path.exists() {
                return Err(anyhow!("Configuration file not found: {:?}", path));
            }
            info!("Loading configuration from: {:?}", path);
            loader
                .from_file(path)
                .context(format!("Failed to load configuration from {:?}", path))
        }
        None => {
            debug!("No configuration file specified. Loading from environment or defaults.");
            loader
                .from_env()
                .context("Failed to load configuration from environment")
        }
    }
}

/// Handle configuration validation
pub fn handle_config_validate(config_file: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);
    let out = OutputFormatter::new();

    if !config_file.exists() {
        return Err(anyhow!("Configuration file not found: {:?}", config_file));
    }

    match ConfigLoader::new().from_file(config_file) {
        Ok(_config) => {
            out.print_success("Configuration file is valid");
            info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            out.print_error(&format!("Configuration validation failed: {}", e));
            error!("Configuration validation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handle configuration generation
pub fn handle_config_generate(output: &Path, force: bool) -> Result<()> {
    info!("Generating sample configuration at: {:?}", output);

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    fs::write(output, RaporConfig::generate_sample())
        .context("Failed to write configuration file")?;

    let out = OutputFormatter::new();
    out.print_success(&format!("Sample configuration generated at: {:?}", output));
    println!(
        "  Validate with: rapor config validate --config-file {:?}",
        output
    );

    Ok(())
}

/// Render the effective configuration as yaml or json
pub fn render_config(config: &RaporConfig, format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::to_string(config).context("Failed to serialize to YAML"),
        "json" => serde_json::to_string_pretty(config).context("Failed to serialize to JSON"),
        _ => Err(anyhow!(
            "Unknown output format: {}. Valid formats: yaml, json",
            format
        )),
    }
}

/// Handle configuration display
pub fn handle_config_show(config_file: Option<&PathBuf>, format: &str) -> Result<()> {
    info!("Showing configuration (format: {})", format);
    let config = load_config(config_file)?;
    println!("{}", render_config(&config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_sample_validates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf").join("rapor.yaml");

        handle_config_generate(&path, false).unwrap();
        handle_config_validate(&path).unwrap();

        assert!(handle_config_generate(&path, false).is_err());
        handle_config_generate(&path, true).unwrap();
    }

    #[test]
    fn test_missing_named_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("rapr.yaml");

        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_named_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rapor.yaml");
        fs::write(&path, "api:\n  base_url: \"https://shop.example.com/api\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
    }

    #[test]
    fn test_render_formats() {
        let config = RaporConfig::default();
        let json = render_config(&config, "json").unwrap();
        assert!(json.contains("\"loadtest\""));
        assert!(render_config(&config, "YAML").unwrap().contains("export:"));
        assert!(render_config(&config, "toml").is_err());
    }
}
