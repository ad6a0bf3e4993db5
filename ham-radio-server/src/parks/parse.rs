//! CSV parsing for the park dataset.
//!
//! Columns are located by header name, so column order and extra columns
//! in the upstream file don't matter. Only `reference` and `name` are
//! required; any other missing column leaves its field at the zero value.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, trace};

use super::error::ParkError;
use super::table::ParkReference;

/// Column indices for each field we read, resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    reference: usize,
    name: usize,
    active: Option<usize>,
    entity_id: Option<usize>,
    location_desc: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    grid: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParkError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| ParkError::Parse {
                message: format!("missing column {name:?}"),
            })
        };

        Ok(Self {
            reference: require("reference")?,
            name: require("name")?,
            active: find("active"),
            entity_id: find("entityId"),
            location_desc: find("locationDesc"),
            latitude: find("latitude"),
            longitude: find("longitude"),
            grid: find("grid"),
        })
    }

    /// Build a park from one record, or `None` if it has no reference or name.
    fn park(&self, record: &StringRecord) -> Option<ParkReference> {
        let text = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let reference = text(Some(self.reference)).trim();
        let name = text(Some(self.name)).trim();
        if reference.is_empty() || name.is_empty() {
            return None;
        }

        Some(ParkReference {
            reference: reference.to_string(),
            name: name.to_string(),
            active: parse_flag(text(self.active)),
            entity_id: text(self.entity_id).trim().parse().unwrap_or(0),
            location_desc: text(self.location_desc).trim().to_string(),
            latitude: text(self.latitude).trim().parse().unwrap_or(0.0),
            longitude: text(self.longitude).trim().parse().unwrap_or(0.0),
            grid: text(self.grid).trim().to_string(),
        })
    }
}

/// Parse a boolean-ish dataset cell.
///
/// - `1`, `true`, `yes`, `y` (any case) are true
/// - empty, `no` and `false` are false
/// - any other integer is true when nonzero
/// - `t` / `f` are accepted as strict booleans
/// - anything else is true, so a drifted upstream value keeps the park usable
pub fn parse_flag(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();

    match value.as_str() {
        "1" | "true" | "yes" | "y" => return true,
        "" | "no" => return false,
        _ => {}
    }

    if let Ok(n) = value.parse::<i64>() {
        return n != 0;
    }

    !matches!(value.as_str(), "f" | "false")
}

/// Parse the whole dataset into a map keyed by reference code.
///
/// Records may have any number of fields. Rows without a reference or a
/// name, and rows that are not valid UTF-8, are skipped. A missing header
/// row, a missing `reference`/`name` column or an I/O error fails the
/// whole parse. When a reference appears twice the later row wins.
pub fn parse_dataset(payload: &[u8]) -> Result<HashMap<String, ParkReference>, ParkError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(payload);

    let headers = reader
        .headers()
        .map_err(|e| ParkError::Parse {
            message: format!("failed to read header row: {e}"),
        })?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut parks = HashMap::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(ParkError::Parse {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                trace!(error = %e, "skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        match columns.park(&record) {
            Some(park) => {
                parks.insert(park.reference.clone(), park);
            }
            None => {
                trace!(line = ?record.position().map(|p| p.line()), "skipping row without reference or name");
                skipped += 1;
            }
        }
    }

    debug!(parks = parks.len(), skipped, "parsed park dataset");
    Ok(parks)
}
