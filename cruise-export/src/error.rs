//! Error types for export operations

use thiserror::Error;

/// Errors that can occur during export operations
///
/// A running transform only ever fails with [`ExportError::Export`]. The remaining
/// variants belong to the host-facing surface (registry lookup and option handling).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Exporter not found in registry
    #[error("Exporter '{0}' not found")]
    ExporterNotFound(String),
    /// The exporter does not accept the requested operation or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Any failure while reading the dataset, mapping it, or writing the result
    #[error("Export failed: {0}")]
    Export(String),
}

impl ExportError {
    pub fn export(msg: impl Into<String>) -> Self {
        ExportError::Export(msg.into())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Export(e.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Export(e.to_string())
    }
}
