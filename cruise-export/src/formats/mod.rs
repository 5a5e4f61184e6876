//! Exporter implementations
//!
//! This module contains the export formats that project a dataset record
//! onto a fixed output schema.

pub mod cruise;

pub use cruise::CruiseExporter;
