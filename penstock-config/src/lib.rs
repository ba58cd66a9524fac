//! Shared configuration loader for the penstock toolchain.
//!
//! `defaults/penstock.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer
//! workspace-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`PenstockConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/penstock.default.toml");

/// File name a workspace uses to override the defaults.
pub const WORKSPACE_CONFIG_FILE: &str = ".penstock.toml";

/// Top-level configuration consumed by penstock applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PenstockConfig {
    pub scan: ScanConfig,
    pub completion: CompletionConfig,
}

/// Controls the initial workspace scan.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub enabled: bool,
}

/// Controls completion suggestions.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub enabled: bool,
    pub dataset_suggestions: bool,
}

// Fallback used when a workspace ships a broken override file; mirrors the
// embedded TOML.
impl Default for PenstockConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig { enabled: true },
            completion: CompletionConfig {
                enabled: true,
                dataset_suggestions: true,
            },
        }
    }
}

/// Helper for layering workspace overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PenstockConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
