//! Metadata export for dataset records
//!
//!     This crate turns a dataset record (a version holding named metadata blocks, each a list
//!     of typed fields) into a flat, domain-specific output document. It is a pure library: the
//!     host hands over the dataset and a sink, the exporter writes one complete document or
//!     reports one failure. No code here touches the filesystem, the network or the environment.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── exporter.rs             # Exporter trait, capabilities, data provider, locale
//!     ├── registry.rs             # ExporterRegistry for discovery and selection
//!     ├── dataset                 # Input model
//!     │   ├── index.rs            # Typed-field lookup and scalar accessors
//!     │   └── compound.rs         # Compound-array expansion
//!     ├── formats
//!     │   └── cruise
//!     │       ├── document.rs     # Output schema
//!     │       ├── mapper.rs       # Dataset → output mapping
//!     │       └── mod.rs          # Exporter, rendering and writing
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!             └── <docname>.json
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Extraction
//!
//!     Absence is never an error. A missing block, a block without fields, a missing field or a
//!     field holding an unexpected payload shape all resolve to the attribute's default (the empty
//!     string, an empty list, or "none" for embargoes). Only structural breakage (no
//!     `datasetVersion`, no `metadataBlocks`, fields without `typeName` in a block the exporter
//!     reads) fails the export. Blocks an exporter does not read are never parsed.
//!
//!     Lookups are by field type name, and only the first field carrying a type name is
//!     consulted.
//!
//! Exporters
//!
//!     Format specific capabilities are implemented with the Exporter trait. An exporter
//!     exposes a static capabilities descriptor (format name, display name, harvestable and
//!     user-visible flags, media type) and an export method. See [./exporter.rs]
//!     - Exporter trait: Uniform interface for all export formats
//!     - ExporterRegistry: Centralized discovery and selection of exporters
//!     - Exporter implementations: Concrete implementations for each supported format
pub mod dataset;
pub mod error;
pub mod exporter;
pub mod formats;
pub mod registry;

pub use error::ExportError;
pub use exporter::{Capabilities, ExportDataProvider, Exporter, Locale};
pub use registry::ExporterRegistry;

/// Exports a dataset with the default cruise exporter.
///
/// Convenience for hosts that only need the one format; equivalent to
/// `ExporterRegistry::default().export(dataset, "cruise_json", sink)`.
pub fn export_cruise(
    dataset: &serde_json::Value,
    sink: &mut dyn std::io::Write,
) -> Result<(), ExportError> {
    formats::CruiseExporter::new().export_dataset(dataset, sink)
}
