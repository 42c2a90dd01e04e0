//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "xgen.toml";

/// Loads and validates an `xgen.toml` configuration from a project directory.
///
/// Reads `<project_dir>/xgen.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `xgen.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    let required = [
        ("compiler.path", &config.compiler.path),
        ("target.framework", &config.target.framework),
        ("target.rid", &config.target.rid),
        ("input.graph", &config.input.graph),
        ("input.app_dir", &config.input.app_dir),
        ("output.dir", &config.output.dir),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
    }
    Ok(())
}
