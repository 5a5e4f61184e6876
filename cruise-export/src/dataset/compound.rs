//! Compound-array expansion
//!
//! A compound field holds a list of object-shaped entries. [`compound_entries`] walks the
//! entries of the first field carrying the trigger type name, exposing each one as a
//! [`CompoundView`] whose sub-attributes default to the empty string.
//!
//! The returned iterator borrows the source array, so cloning it restarts the walk.

use super::{find_field, Block, CompoundEntry, FieldValue};
use std::slice;
use tracing::warn;

/// Expand the compound field `type_name` of `block`.
///
/// Absent blocks and fields yield an empty sequence.
pub fn compound_entries<'a>(block: Option<&'a Block>, type_name: &str) -> CompoundEntries<'a> {
    expand(find_field(block, type_name))
}

/// Expand an already resolved payload.
pub fn expand(value: Option<&FieldValue>) -> CompoundEntries<'_> {
    CompoundEntries {
        inner: entries_of(value).iter(),
    }
}

fn entries_of(value: Option<&FieldValue>) -> &[CompoundEntry] {
    match value {
        Some(FieldValue::CompoundArray(entries)) => entries,
        Some(FieldValue::Compound(entry)) => slice::from_ref(entry),
        // `[]` deserializes as an empty scalar array
        Some(FieldValue::ScalarArray(values)) if values.is_empty() => &[],
        Some(other) => {
            warn!(
                found = other.kind(),
                "expected a compound field, treating as empty"
            );
            &[]
        }
        None => &[],
    }
}

/// Lazy sequence of compound entries.
#[derive(Debug, Clone)]
pub struct CompoundEntries<'a> {
    inner: slice::Iter<'a, CompoundEntry>,
}

impl<'a> Iterator for CompoundEntries<'a> {
    type Item = CompoundView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(CompoundView::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CompoundEntries<'_> {}

/// Read-only view over one compound entry.
#[derive(Debug, Clone, Copy)]
pub struct CompoundView<'a> {
    entry: &'a CompoundEntry,
}

impl<'a> CompoundView<'a> {
    pub fn new(entry: &'a CompoundEntry) -> Self {
        CompoundView { entry }
    }

    /// The sub-attribute `name`, or `""` when missing or not a string.
    pub fn get(&self, name: &str) -> &'a str {
        self.entry.get(name).unwrap_or_default()
    }
}
