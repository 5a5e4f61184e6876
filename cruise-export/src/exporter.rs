//! Exporter trait definition
//!
//! This module defines the [`Exporter`] trait that every export format implements, along with
//! the host-facing pieces it depends on: the static [`Capabilities`] descriptor, the
//! [`ExportDataProvider`] that hands over the dataset, and the [`Locale`] used for display names.

use crate::error::ExportError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Static description of an exporter, as advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Stable identifier the host uses to select the exporter
    pub format_name: &'static str,
    /// Human-readable label; the host appends the locale's language
    pub display_name: &'static str,
    /// Whether the output may be offered through metadata harvesting
    pub harvestable: bool,
    /// Whether end users may download the output
    pub available_to_users: bool,
    /// MIME type of the produced bytes
    pub media_type: &'static str,
}

/// Source of the dataset being exported.
pub trait ExportDataProvider {
    /// The dataset record in its JSON form.
    fn dataset_json(&self) -> &Value;
}

impl ExportDataProvider for Value {
    fn dataset_json(&self) -> &Value {
        self
    }
}

/// A language tag such as `en`, `en-US` or `pt_BR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Locale { tag: tag.into() }
    }

    /// The lower-cased language subtag (`"en"` for `en-US`).
    pub fn language(&self) -> String {
        self.tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Trait for export formats
///
/// Implementors transform one dataset into one output document and write it to a sink.
/// Descriptor accessors are derived from [`Exporter::capabilities`], so a format only has to
/// provide its descriptor and the transform itself.
///
/// # Examples
///
/// ```ignore
/// struct MyExporter;
///
/// impl Exporter for MyExporter {
///     fn capabilities(&self) -> &Capabilities {
///         &MY_CAPABILITIES
///     }
///
///     fn export_dataset(
///         &self,
///         provider: &dyn ExportDataProvider,
///         sink: &mut dyn Write,
///     ) -> Result<(), ExportError> {
///         sink.write_all(provider.dataset_json().to_string().as_bytes())?;
///         Ok(())
///     }
/// }
/// ```
pub trait Exporter: Send + Sync {
    /// The static descriptor of this exporter
    fn capabilities(&self) -> &Capabilities;

    /// The format identifier (e.g., "cruise_json")
    fn format_name(&self) -> &str {
        self.capabilities().format_name
    }

    /// Display name for the given locale
    fn display_name(&self, locale: &Locale) -> String {
        format!(
            "{} in {}",
            self.capabilities().display_name,
            locale.language()
        )
    }

    fn is_harvestable(&self) -> bool {
        self.capabilities().harvestable
    }

    fn is_available_to_users(&self) -> bool {
        self.capabilities().available_to_users
    }

    fn media_type(&self) -> &str {
        self.capabilities().media_type
    }

    /// Export the provider's dataset into `sink`
    ///
    /// Either the complete document is written and flushed, or an error is returned and
    /// nothing is written.
    fn export_dataset(
        &self,
        provider: &dyn ExportDataProvider,
        sink: &mut dyn Write,
    ) -> Result<(), ExportError>;

    /// Export with extra parameters.
    ///
    /// The default implementation delegates to [`Exporter::export_dataset`] when no options are
    /// given and rejects any option otherwise.
    fn export_with_options(
        &self,
        provider: &dyn ExportDataProvider,
        sink: &mut dyn Write,
        options: &HashMap<String, String>,
    ) -> Result<(), ExportError> {
        if options.is_empty() {
            self.export_dataset(provider, sink)
        } else {
            Err(ExportError::NotSupported(format!(
                "Exporter '{}' does not support extra parameters",
                self.format_name()
            )))
        }
    }
}
