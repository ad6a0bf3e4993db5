//! Decimal-degree coordinates.

use std::fmt;

use super::error::ValidationError;

/// A latitude/longitude pair in decimal degrees.
///
/// Values are not range-checked: anything that parses as a finite real
/// number is accepted and handed to the geodesic formulas as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a coordinate from decimal-degree strings.
    ///
    /// Surrounding whitespace is ignored. Non-numeric, NaN and infinite
    /// values are rejected.
    ///
    /// ```
    /// use ham_radio_server::domain::Coordinate;
    ///
    /// let c = Coordinate::parse("41.714775", "-72.727260").unwrap();
    /// assert_eq!(c.latitude, 41.714775);
    ///
    /// assert!(Coordinate::parse("north", "0").is_err());
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            parse_degrees("latitude", latitude)?,
            parse_degrees("longitude", longitude)?,
        ))
    }

    /// Like [`Coordinate::parse`], but reports errors against named fields
    /// (e.g. `origin-latitude`) so the caller can tell which input was bad.
    pub fn parse_named(
        latitude: (&'static str, &str),
        longitude: (&'static str, &str),
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(
            parse_degrees(latitude.0, latitude.1)?,
            parse_degrees(longitude.0, longitude.1)?,
        ))
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
