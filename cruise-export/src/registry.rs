//! Exporter registry for discovery and selection
//!
//! This module provides a centralized registry for all available exporters.
//! Exporters are registered and retrieved by their format name.

use crate::error::ExportError;
use crate::exporter::{ExportDataProvider, Exporter};
use std::collections::HashMap;
use std::io::Write;

/// Registry of exporters
///
/// # Examples
///
/// ```ignore
/// let registry = ExporterRegistry::default();
/// let exporter = registry.get("cruise_json")?;
/// exporter.export_dataset(&dataset, &mut std::io::stdout())?;
/// ```
pub struct ExporterRegistry {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ExporterRegistry {
            exporters: HashMap::new(),
        }
    }

    /// Register an exporter
    ///
    /// If an exporter with the same format name already exists, it will be replaced.
    pub fn register<E: Exporter + 'static>(&mut self, exporter: E) {
        self.exporters
            .insert(exporter.format_name().to_string(), Box::new(exporter));
    }

    /// Get an exporter by format name
    pub fn get(&self, name: &str) -> Result<&dyn Exporter, ExportError> {
        self.exporters
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| ExportError::ExporterNotFound(name.to_string()))
    }

    /// Check if an exporter exists
    pub fn has(&self, name: &str) -> bool {
        self.exporters.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.exporters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Export a dataset using the specified exporter
    pub fn export(
        &self,
        provider: &dyn ExportDataProvider,
        format: &str,
        sink: &mut dyn Write,
    ) -> Result<(), ExportError> {
        self.get(format)?.export_dataset(provider, sink)
    }

    /// Export a dataset using the specified exporter and options
    pub fn export_with_options(
        &self,
        provider: &dyn ExportDataProvider,
        format: &str,
        sink: &mut dyn Write,
        options: &HashMap<String, String>,
    ) -> Result<(), ExportError> {
        self.get(format)?
            .export_with_options(provider, sink, options)
    }

    /// Create a registry with default exporters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::cruise::CruiseExporter::new());
        registry
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
