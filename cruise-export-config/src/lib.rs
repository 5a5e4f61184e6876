//! Shared configuration loader for the cruise-export toolchain.
//!
//! `defaults/cruise-export.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ExportConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use cruise_export::Locale;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub use config::{ConfigError, ValueKind};

const DEFAULT_TOML: &str = include_str!("../defaults/cruise-export.default.toml");

/// Top-level configuration consumed by cruise-export applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub export: ExportSettings,
    pub logging: LoggingConfig,
}

/// Exporter selection and output knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    pub format: String,
    pub locale: String,
    pub pretty: bool,
}

impl ExportSettings {
    /// Exporter parameters implied by these settings.
    pub fn options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if self.pretty {
            options.insert("pretty".to_string(), "true".to_string());
        }
        options
    }
}

impl From<&ExportSettings> for Locale {
    fn from(settings: &ExportSettings) -> Self {
        Locale::new(settings.locale.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ExportConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
