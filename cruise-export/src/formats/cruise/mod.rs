//! Cruise JSON export
//!
//!     Projects a dataset record onto the flat cruise schema:
//!
//!     {"cruise": {"id", "schedule_records", "name", "vessel_id", "depart_date",
//!                 "depart_port_id", "arrive_date", "arrive_port_id", "persons",
//!                 "awards", "embargoes"}}
//!
//!     The export is a single pass. The mapped blocks are read into the typed model, mapped
//!     (see [`mapper`]), serialized into memory, and only then written to the sink, so a failing
//!     export never leaves partial output behind.
//!
//!     Parameters (via [`Exporter::export_with_options`]):
//!         - pretty: "true" to indent the output (defaults to compact)

pub mod document;
pub mod mapper;

use crate::dataset::Dataset;
use crate::error::ExportError;
use crate::exporter::{Capabilities, ExportDataProvider, Exporter};
use document::CruiseDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use tracing::{error, info};

pub use mapper::{map_cruise, CruiseSource};

pub const CAPABILITIES: Capabilities = Capabilities {
    format_name: "cruise_json",
    display_name: "Cruise JSON",
    harvestable: false,
    available_to_users: true,
    media_type: "application/json",
};

/// Exporter producing the cruise JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct CruiseExporter {
    pretty: bool,
}

impl CruiseExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An exporter that indents its output.
    pub fn pretty() -> Self {
        CruiseExporter { pretty: true }
    }
}

impl Exporter for CruiseExporter {
    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn export_dataset(
        &self,
        provider: &dyn ExportDataProvider,
        sink: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let result = render(provider.dataset_json(), self.pretty)
            .and_then(|bytes| write_document(sink, &bytes).map(|()| bytes.len()));

        match result {
            Ok(bytes) => {
                info!(format = CAPABILITIES.format_name, bytes, "exported dataset");
                Ok(())
            }
            Err(err) => {
                error!(format = CAPABILITIES.format_name, error = %err, "export failed");
                Err(err)
            }
        }
    }

    fn export_with_options(
        &self,
        provider: &dyn ExportDataProvider,
        sink: &mut dyn Write,
        options: &HashMap<String, String>,
    ) -> Result<(), ExportError> {
        let mut exporter = *self;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => exporter.pretty = parse_bool_option(key, value)?,
                other => {
                    return Err(ExportError::NotSupported(format!(
                        "Exporter '{}' does not support parameter '{other}'",
                        CAPABILITIES.format_name
                    )))
                }
            }
        }
        exporter.export_dataset(provider, sink)
    }
}

/// Map a dataset and encode the resulting document as UTF-8 JSON.
pub fn render(dataset: &Value, pretty: bool) -> Result<Vec<u8>, ExportError> {
    let dataset = Dataset::from_json(dataset)?;
    let source = CruiseSource::read(&dataset.dataset_version)?;
    let document = CruiseDocument {
        cruise: map_cruise(&source),
    };

    let bytes = if pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    Ok(bytes)
}

fn write_document(sink: &mut dyn Write, bytes: &[u8]) -> Result<(), ExportError> {
    sink.write_all(bytes)?;
    sink.flush()?;
    Ok(())
}

fn parse_bool_option(key: &str, raw: &str) -> Result<bool, ExportError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(ExportError::NotSupported(format!(
            "Invalid boolean value '{other}' for parameter '{key}'"
        ))),
    }
}
