//! Dataset → cruise record mapping
//!
//! Each output attribute is read from a fixed (block, type name) pair of the dataset version.
//! Missing blocks and fields resolve to empty strings and empty lists.
//!
//! Only the five blocks below are ever read from the dataset; [`CruiseSource::read`] parses
//! them up front so that mapping itself cannot fail.

use super::document::{Award, Cruise, Person, ScheduleRecord};
use crate::dataset::{
    compound_entries, expand, first_of_array, parse_at, scalar, Block, CompoundEntry,
    CompoundView, DatasetVersion, FieldValue,
};
use crate::error::ExportError;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const CRUISE_BLOCK: &str = "cruise";
const CITATION_BLOCK: &str = "citation";
const PERSONS_BLOCK: &str = "persons";
const AWARDS_BLOCK: &str = "awards";
const SCHEDULE_BLOCK: &str = "scheduler_records";

// The source metadata schema spells these two keys this way.
const ARRIVE_PORT_FIELD: &str = "arrive_poer_id";
const INSTITUTION_ATTR: &str = "instituion_id";

const PERSON_TRIGGER: &str = "person_n";
const SCHEDULER_ID_FIELD: &str = "scheduler_id";
const SCHEDULER_FIELD: &str = "scheduler";

/// `embargoes` value when the version carries no terms of access.
pub const DEFAULT_EMBARGO: &str = "none";

/// The parts of a dataset version the cruise mapping reads.
#[derive(Debug, Clone)]
pub struct CruiseSource<'a> {
    terms_of_access: Option<&'a str>,
    cruise: Option<Block>,
    citation: Option<Block>,
    persons: Option<Block>,
    schedule: Option<Block>,
    award: Option<AwardFieldSet>,
}

impl<'a> CruiseSource<'a> {
    /// Parse the mapped blocks of `version`. Other blocks are left untouched.
    pub fn read(version: &'a DatasetVersion) -> Result<Self, ExportError> {
        Ok(CruiseSource {
            terms_of_access: version.terms_of_access(),
            cruise: version.block(CRUISE_BLOCK)?,
            citation: version.block(CITATION_BLOCK)?,
            persons: version.block(PERSONS_BLOCK)?,
            schedule: version.block(SCHEDULE_BLOCK)?,
            award: first_award_field_set(version)?,
        })
    }
}

/// Fields of the awards block, kept raw: only the first one is read.
#[derive(Debug, Deserialize)]
struct AwardsBlock {
    #[serde(default)]
    fields: Option<Vec<Value>>,
}

/// The first field object of the awards block.
///
/// Award keys are either carried by a compound `value` or set directly on the field object.
#[derive(Debug, Clone, Deserialize)]
struct AwardFieldSet {
    #[serde(default)]
    value: Option<FieldValue>,
    #[serde(flatten)]
    keys: CompoundEntry,
}

fn first_award_field_set(version: &DatasetVersion) -> Result<Option<AwardFieldSet>, ExportError> {
    let Some(block) = version.block_as::<AwardsBlock>(AWARDS_BLOCK)? else {
        return Ok(None);
    };
    block
        .fields
        .as_deref()
        .and_then(<[Value]>::first)
        .map(|first| parse_at(first, "datasetVersion.metadataBlocks.awards.fields[0]"))
        .transpose()
}

/// Project the source blocks onto the cruise schema.
pub fn map_cruise<'a>(source: &'a CruiseSource<'_>) -> Cruise<'a> {
    let cruise = source.cruise.as_ref();
    let citation = source.citation.as_ref();

    let record = Cruise {
        id: first_of_array(cruise, "cnumber", ""),
        schedule_records: schedule_records(source.schedule.as_ref()),
        name: scalar(citation, "title", ""),
        vessel_id: scalar(cruise, "vessel_id", ""),
        depart_date: scalar(cruise, "depart_date", ""),
        depart_port_id: scalar(cruise, "depart_port_id", ""),
        arrive_date: scalar(cruise, "arrive_date", ""),
        arrive_port_id: scalar(cruise, ARRIVE_PORT_FIELD, ""),
        persons: persons(source.persons.as_ref()),
        awards: awards(source.award.as_ref()),
        embargoes: source.terms_of_access.unwrap_or(DEFAULT_EMBARGO),
    };

    debug!(
        id = record.id,
        schedule_records = record.schedule_records.len(),
        persons = record.persons.len(),
        awards = record.awards.len(),
        "mapped cruise record"
    );
    record
}

/// At most one schedule record.
///
/// The record is emitted when the block holds a scalar `scheduler_id` field. Its
/// `scheduler_id` comes from the `scheduler` field and its `scheduler_cruise_id` from
/// `scheduler_id`, each through an independent first-match lookup.
fn schedule_records(block: Option<&Block>) -> Vec<ScheduleRecord<'_>> {
    let detected = block.map(Block::fields).unwrap_or_default().iter().any(|field| {
        field.type_name == SCHEDULER_ID_FIELD && matches!(field.value, Some(FieldValue::Scalar(_)))
    });
    if !detected {
        return Vec::new();
    }

    vec![ScheduleRecord {
        scheduler_id: scalar(block, SCHEDULER_FIELD, ""),
        scheduler_cruise_id: scalar(block, SCHEDULER_ID_FIELD, ""),
    }]
}

fn persons(block: Option<&Block>) -> Vec<Person<'_>> {
    compound_entries(block, PERSON_TRIGGER)
        .map(|entry| {
            let name = entry.get("person_name");
            Person {
                id: name,
                name,
                institution_id: entry.get(INSTITUTION_ATTR),
                role: entry.get("role"),
            }
        })
        .collect()
}

/// One award from the first field-set, whatever its type name.
///
/// The first entry of a compound payload wins; without one the keys are read off the
/// field object itself.
fn awards(field_set: Option<&AwardFieldSet>) -> Vec<Award<'_>> {
    let Some(field_set) = field_set else {
        return Vec::new();
    };
    let entry = expand(field_set.value.as_ref())
        .next()
        .unwrap_or_else(|| CompoundView::new(&field_set.keys));

    vec![Award {
        project_number: entry.get("project_number"),
        name: entry.get("project_name"),
        agency_id: entry.get("agency_id"),
        agency_department: entry.get("agency_department"),
    }]
}
