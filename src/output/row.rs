//! Flattened record written to the export file

use crate::error::Result;
use crate::types::{Status, StatusRecord};
use serde::Serialize;

/// One exported check-in. Field order is the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub id: u64,
    pub body: Option<String>,
    pub created_at: String,
    pub category: String,
    pub line: String,
    pub number: String,
    pub distance: u64,
    pub duration: u64,
    pub origin: String,
    pub departure_planned: Option<String>,
    pub departure_real: Option<String>,
    pub destination: String,
    pub arrival_planned: Option<String>,
    pub arrival_real: Option<String>,
    pub event: Option<String>,
}

impl ExportRow {
    /// Column names, in serialization order
    pub const FIELDS: [&'static str; 15] = [
        "id",
        "body",
        "createdAt",
        "category",
        "line",
        "number",
        "distance",
        "duration",
        "origin",
        "departurePlanned",
        "departureReal",
        "destination",
        "arrivalPlanned",
        "arrivalReal",
        "event",
    ];

    /// Cell values as text, in column order
    ///
    /// `None` becomes an empty cell, not the literal text `None`. Quoting
    /// and escaping happen in the CSV writer.
    pub fn values(&self) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.id.to_string(),
            text(&self.body),
            self.created_at.clone(),
            self.category.clone(),
            self.line.clone(),
            self.number.clone(),
            self.distance.to_string(),
            self.duration.to_string(),
            self.origin.clone(),
            text(&self.departure_planned),
            text(&self.departure_real),
            self.destination.clone(),
            text(&self.arrival_planned),
            text(&self.arrival_real),
            text(&self.event),
        ]
    }
}

impl From<Status> for ExportRow {
    fn from(status: Status) -> Self {
        let train = status.train;
        Self {
            id: status.id,
            body: status.body,
            created_at: status.created_at,
            category: train.category,
            line: train.line_name,
            number: train.number,
            distance: train.distance,
            duration: train.duration,
            origin: train.origin.name,
            departure_planned: train.origin.departure_planned,
            departure_real: train.origin.departure_real,
            destination: train.destination.name,
            arrival_planned: train.destination.arrival_planned,
            arrival_real: train.destination.arrival_real,
            event: status.event.map(|e| e.name),
        }
    }
}

/// Convert raw records into export rows, failing on the first malformed record
pub fn to_rows(records: &[StatusRecord]) -> Result<Vec<ExportRow>> {
    records
        .iter()
        .map(|record| record.to_status().map(ExportRow::from))
        .collect()
}
