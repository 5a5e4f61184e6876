//! Dataset input model
//!
//!     A dataset record as handed over by the host: a root holding one `datasetVersion`, which
//!     maps block names to metadata blocks. A [`Block`] is an ordered list of typed [`Field`]s
//!     whose payload is one of the [`FieldValue`] shapes.
//!
//!     Blocks are kept as raw JSON until a caller asks for one by name, so blocks nobody reads
//!     are never validated. A block that is read is loose about payload shapes and strict about
//!     structure: a field whose value has an unexpected shape still parses (as
//!     [`FieldValue::Other`]) and is later read as absent, while a field without `typeName`
//!     fails the read. A missing `datasetVersion` or `metadataBlocks` fails up front.
//!
//!     Lookups live in [`index`] (single fields, scalar accessors) and [`compound`]
//!     (compound-array expansion).

pub mod compound;
pub mod index;

use crate::error::ExportError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub use compound::{compound_entries, expand, CompoundEntries, CompoundView};
pub use index::{find_field, first_of_array, scalar};

const BLOCKS_PATH: &str = "datasetVersion.metadataBlocks";

/// Root of the input document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub dataset_version: DatasetVersion,
}

impl Dataset {
    /// Read a dataset from its JSON form.
    ///
    /// Only the envelope is checked here; blocks are read on demand through
    /// [`DatasetVersion::block`].
    pub fn from_json(value: &Value) -> Result<Dataset, ExportError> {
        parse_at(value, "")
    }
}

/// Deserialize `value`, reporting a structural mismatch with its path below `origin`
/// (e.g. `datasetVersion.metadataBlocks.cruise.fields[0]`).
pub fn parse_at<T: DeserializeOwned>(value: &Value, origin: &str) -> Result<T, ExportError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let inner = err.path().to_string();
        let source = err.into_inner();
        let inner = if inner == "." { "" } else { inner.as_str() };
        let path = match (origin.is_empty(), inner.is_empty()) {
            (true, true) => "<root>".to_string(),
            (true, false) => inner.to_string(),
            (false, true) => origin.to_string(),
            (false, false) if inner.starts_with('[') => format!("{origin}{inner}"),
            (false, false) => format!("{origin}.{inner}"),
        };
        ExportError::export(format!("dataset structure mismatch at {path}: {source}"))
    })
}

/// One version of the dataset: its metadata blocks plus version-level attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetVersion {
    #[serde(default)]
    terms_of_access: Option<Value>,
    metadata_blocks: BTreeMap<String, Value>,
}

impl DatasetVersion {
    /// The version's terms of access, if present as a string.
    pub fn terms_of_access(&self) -> Option<&str> {
        self.terms_of_access.as_ref().and_then(Value::as_str)
    }

    /// Read the metadata block `name` into the typed model.
    ///
    /// An absent or `null` block is `Ok(None)`.
    pub fn block(&self, name: &str) -> Result<Option<Block>, ExportError> {
        self.block_as(name)
    }

    /// Read the metadata block `name` into a caller-chosen shape.
    pub fn block_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ExportError> {
        self.metadata_blocks
            .get(name)
            .filter(|raw| !raw.is_null())
            .map(|raw| parse_at(raw, &format!("{BLOCKS_PATH}.{name}")))
            .transpose()
    }
}

/// A named group of typed fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
}

impl Block {
    /// Fields in input order; empty when the block has no field list.
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }
}

/// One typed entry of a block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub type_name: String,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

/// Payload of a [`Field`].
///
/// Variant order matters for deserialization: an empty array reads as an empty
/// [`FieldValue::ScalarArray`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    ScalarArray(Vec<String>),
    CompoundArray(Vec<CompoundEntry>),
    /// A non-repeatable compound field carries a single entry instead of an array.
    Compound(CompoundEntry),
    /// Any other JSON shape (numbers, booleans, mixed arrays).
    Other(Value),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::ScalarArray(_) => "scalar array",
            FieldValue::CompoundArray(_) => "compound array",
            FieldValue::Compound(_) => "compound",
            FieldValue::Other(_) => "unrecognized",
        }
    }
}

/// One object-shaped element of a compound field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CompoundEntry(BTreeMap<String, SubValue>);

impl CompoundEntry {
    /// The string value of a sub-attribute, if present with a string payload.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(SubValue::as_str)
    }
}

/// Value of a compound sub-attribute.
///
/// Sub-attributes are either plain strings or, in full dataset exports, nested
/// primitive fields of the form `{"typeName": ..., "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubValue {
    Text(String),
    Primitive(PrimitiveValue),
    Other(Value),
}

impl SubValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SubValue::Text(text) => Some(text),
            SubValue::Primitive(primitive) => Some(&primitive.value),
            SubValue::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrimitiveValue {
    pub value: String,
}
