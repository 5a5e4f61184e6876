//! Typed-field lookup and scalar accessors
//!
//! Every lookup tolerates a missing block, a block without a field list and a
//! missing field: those are ordinary outcomes that resolve to `None` or to the
//! caller's default. Only the first field carrying a given type name is ever
//! consulted.

use super::{Block, FieldValue};
use tracing::warn;

/// Find the payload of the first field with `type_name` in `block`.
///
/// Returns `None` when the block is absent, has no fields, holds no field with that
/// type name, or the matching field has no value.
pub fn find_field<'a>(block: Option<&'a Block>, type_name: &str) -> Option<&'a FieldValue> {
    block?
        .fields()
        .iter()
        .find(|field| field.type_name == type_name)?
        .value
        .as_ref()
}

/// The string value of a scalar field, or `default`.
///
/// A field holding any other payload shape reads as absent.
pub fn scalar<'a>(block: Option<&'a Block>, type_name: &str, default: &'a str) -> &'a str {
    match find_field(block, type_name) {
        Some(FieldValue::Scalar(value)) => value,
        Some(other) => {
            warn!(
                type_name,
                found = other.kind(),
                "expected a scalar field, using default"
            );
            default
        }
        None => default,
    }
}

/// The first element of a scalar-array field, or `default`.
///
/// An empty array, an absent field and a field of any other payload shape all yield `default`.
pub fn first_of_array<'a>(block: Option<&'a Block>, type_name: &str, default: &'a str) -> &'a str {
    match find_field(block, type_name) {
        Some(FieldValue::ScalarArray(values)) => values.first().map_or(default, String::as_str),
        Some(other) => {
            warn!(
                type_name,
                found = other.kind(),
                "expected a scalar array field, using default"
            );
            default
        }
        None => default,
    }
}
