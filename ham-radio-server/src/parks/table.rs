//! Park records and the immutable lookup table built from them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::Coordinate;

/// One row of the park dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkReference {
    /// Unique key, e.g. `US-2312`
    pub reference: String,
    pub name: String,
    pub active: bool,
    /// Administrative entity (DXCC entity) identifier
    pub entity_id: i64,
    /// Location code(s), e.g. `US-CT`
    pub location_desc: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Maidenhead grid locator
    pub grid: String,
}

impl ParkReference {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A published snapshot of the park dataset.
///
/// Never mutated after construction; a refresh builds a new table.
#[derive(Debug)]
pub struct ReferenceTable {
    parks: HashMap<String, ParkReference>,
    built_at: DateTime<Utc>,
}

impl ReferenceTable {
    pub fn new(parks: HashMap<String, ParkReference>, built_at: DateTime<Utc>) -> Self {
        Self { parks, built_at }
    }

    /// Look up a park by exact reference code.
    pub fn get(&self, reference: &str) -> Option<&ParkReference> {
        self.parks.get(reference)
    }

    pub fn parks(&self) -> &HashMap<String, ParkReference> {
        &self.parks
    }

    /// When the table was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn park(reference: &str, name: &str) -> ParkReference {
        ParkReference {
            reference: reference.to_string(),
            name: name.to_string(),
            active: true,
            entity_id: 291,
            location_desc: "US-CT".to_string(),
            latitude: 41.5,
            longitude: -72.5,
            grid: "FN31".to_string(),
        }
    }

    #[test]
    fn get_by_reference() {
        let parks = HashMap::from([
            ("US-0001".to_string(), park("US-0001", "Acadia")),
            ("US-0002".to_string(), park("US-0002", "Arches")),
        ]);
        let built_at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let table = ReferenceTable::new(parks, built_at);

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.get("US-0002").unwrap().name, "Arches");
        assert!(table.get("US-9999").is_none());
        assert_eq!(table.built_at(), built_at);
    }

    #[test]
    fn coordinate() {
        let p = park("US-0001", "Acadia");
        assert_eq!(p.coordinate(), Coordinate::new(41.5, -72.5));
    }
}
