//! Shared types, error model, and configuration for promptpack.
//!
//! This crate is the foundation depended on by all other promptpack crates.
//! It provides:
//! - [`PromptPackError`] — the unified error type
//! - Domain types ([`FileExtensionSet`], [`DiscoveredFile`])
//! - Configuration ([`AppConfig`], output-name normalization, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_OUTPUT_NAME, DefaultsConfig, OUTPUT_SUFFIX, config_dir, config_file_path,
    init_config, load_config, load_config_from, normalize_output_name,
};
pub use error::{PromptPackError, Result};
pub use types::{DiscoveredFile, ExtensionPattern, FileExtensionSet, SCRIPT_EXTENSIONS};
