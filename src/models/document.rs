use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeoSearchError, Result};

/// Unique document identifier
pub type DocumentId = String;

/// Geographic record as read from the source data
///
/// Latitude and longitude are kept verbatim; they are parsed into a
/// [`Coordinate`] when the document is indexed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub latitude: String,
    pub longitude: String,
    pub region: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        place_type: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            place_type: place_type.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            region: region.into(),
        }
    }

    /// Parse the raw latitude/longitude pair
    pub fn coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::from_parts(
            parse_latitude(&self.latitude)?,
            parse_longitude(&self.longitude)?,
        ))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document{{id: {} name: {} type: {} latitude: {} longitude: {} region: {}}}",
            self.id, self.name, self.place_type, self.latitude, self.longitude, self.region
        )
    }
}

/// A validated latitude/longitude pair, ordered by latitude then longitude
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    // Field order drives the derived lexicographic ordering.
    latitude: OrderedFloat<f64>,
    longitude: OrderedFloat<f64>,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self::from_parts(
            check_latitude(latitude)?,
            check_longitude(longitude)?,
        ))
    }

    fn from_parts(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.into_inner()
    }

    /// Axis-aligned bounds of two corners: `(min, max)` per axis
    pub fn bounding_box(a: &Coordinate, b: &Coordinate) -> (Coordinate, Coordinate) {
        let lower = Self {
            latitude: a.latitude.min(b.latitude),
            longitude: a.longitude.min(b.longitude),
        };
        let upper = Self {
            latitude: a.latitude.max(b.latitude),
            longitude: a.longitude.max(b.longitude),
        };
        (lower, upper)
    }
}

impl FromStr for Coordinate {
    type Err = GeoSearchError;

    /// Parse `"lat,lon"`, each side in suffixed (`45.5N`) or signed form
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(GeoSearchError::InvalidCoordinate(s.to_string()));
        }
        Ok(Self::from_parts(
            parse_latitude(parts[0])?,
            parse_longitude(parts[1])?,
        ))
    }
}

/// Parse a latitude; a trailing `N` keeps the sign, `S` negates it
pub fn parse_latitude(raw: &str) -> Result<f64> {
    let value = parse_suffixed(raw, 'n', 's')?;
    check_latitude(value)
}

/// Parse a longitude; a trailing `E` keeps the sign, `W` negates it
pub fn parse_longitude(raw: &str) -> Result<f64> {
    let value = parse_suffixed(raw, 'e', 'w')?;
    check_longitude(value)
}

fn parse_suffixed(raw: &str, positive: char, negative: char) -> Result<f64> {
    let lowered = raw.trim().to_lowercase();
    let (number, sign) = if let Some(rest) = lowered.strip_suffix(positive) {
        (rest, 1.0)
    } else if let Some(rest) = lowered.strip_suffix(negative) {
        (rest, -1.0)
    } else {
        (lowered.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| GeoSearchError::InvalidCoordinate(raw.trim().to_string()))?;
    if !value.is_finite() {
        return Err(GeoSearchError::InvalidCoordinate(raw.trim().to_string()));
    }
    Ok(sign * value)
}

fn check_latitude(value: f64) -> Result<f64> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(GeoSearchError::LatitudeOutOfRange(value));
    }
    Ok(value)
}

fn check_longitude(value: f64) -> Result<f64> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(GeoSearchError::LongitudeOutOfRange(value));
    }
    Ok(value)
}
