//! Output schema of the cruise exporter
//!
//! Field order in these structs is the field order on the wire.

use serde::Serialize;

/// Top-level envelope: `{"cruise": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CruiseDocument<'a> {
    pub cruise: Cruise<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cruise<'a> {
    pub id: &'a str,
    pub schedule_records: Vec<ScheduleRecord<'a>>,
    pub name: &'a str,
    pub vessel_id: &'a str,
    pub depart_date: &'a str,
    pub depart_port_id: &'a str,
    pub arrive_date: &'a str,
    pub arrive_port_id: &'a str,
    pub persons: Vec<Person<'a>>,
    pub awards: Vec<Award<'a>>,
    pub embargoes: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord<'a> {
    pub scheduler_id: &'a str,
    pub scheduler_cruise_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub institution_id: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award<'a> {
    pub project_number: &'a str,
    pub name: &'a str,
    pub agency_id: &'a str,
    pub agency_department: &'a str,
}
