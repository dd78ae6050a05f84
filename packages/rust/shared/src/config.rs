//! Application configuration for promptpack.
//!
//! User config lives at `~/.promptpack/promptpack.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PromptPackError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "promptpack.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".promptpack";

/// Output file name used when none is supplied.
pub const DEFAULT_OUTPUT_NAME: &str = "merged_scripts_prompt.txt";

/// Suffix every output file name ends with.
pub const OUTPUT_SUFFIX: &str = ".txt";

// ---------------------------------------------------------------------------
// Config structs (matching promptpack.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output file name offered at the prompt.
    #[serde(default = "default_output_name")]
    pub output_name: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_name: default_output_name(),
        }
    }
}

fn default_output_name() -> String {
    DEFAULT_OUTPUT_NAME.into()
}

impl AppConfig {
    /// The configured default output name, with the `.txt` rule applied.
    pub fn default_output_name(&self) -> String {
        normalize_output_name(&self.defaults.output_name, DEFAULT_OUTPUT_NAME)
    }
}

// ---------------------------------------------------------------------------
// Output name
// ---------------------------------------------------------------------------

/// Resolve a user-supplied output name.
///
/// Surrounding whitespace is ignored. Blank input yields `default`; a name
/// that does not already end in [`OUTPUT_SUFFIX`] gets it appended once.
pub fn normalize_output_name(input: &str, default: &str) -> String {
    let name = input.trim();
    if name.is_empty() {
        return default.to_string();
    }
    if name.ends_with(OUTPUT_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{OUTPUT_SUFFIX}")
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.promptpack/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PromptPackError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.promptpack/promptpack.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PromptPackError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PromptPackError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PromptPackError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PromptPackError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PromptPackError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
