//! Query string of the accident map page (`?id=...&lat=...&lng=...`).

use crate::core::geo::LatLng;
use crate::{MapError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ACCIDENT_ID: &str = "Unknown";

/// Everything but the RFC 3986 unreserved characters is escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapQuery {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

impl MapQuery {
    pub fn new(id: impl Into<String>, location: LatLng) -> Self {
        Self {
            id: id.into(),
            lat: location.lat,
            lng: location.lng,
        }
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// A missing id reads as "Unknown" and missing or empty coordinates read
    /// as 0. Coordinates must be whole numbers: trailing text such as
    /// `lat=30.5abc` is rejected with [`MapError::InvalidCoordinates`] rather
    /// than read as its numeric prefix.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut id = None;
        let mut lat = None;
        let mut lng = None;

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            match decode_component(key)?.as_str() {
                // first occurrence wins
                "id" if id.is_none() => id = Some(value),
                "lat" if lat.is_none() => lat = Some(value),
                "lng" if lng.is_none() => lng = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            id: id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| UNKNOWN_ACCIDENT_ID.to_string()),
            lat: parse_coordinate("lat", lat.as_deref())?,
            lng: parse_coordinate("lng", lng.as_deref())?,
        })
    }

    pub fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "id={}&lat={}&lng={}",
            encode_component(&self.id),
            self.lat,
            self.lng
        )
    }

    /// "Coordinates" line shown above the map
    pub fn coordinates_label(&self) -> String {
        format!("Coordinates: {}", self.location())
    }
}

fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse::<f64>().map_err(|_| {
            MapError::InvalidCoordinates(format!("{name} is not a number: {value:?}"))
        }),
    }
}

fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| MapError::ParseError(format!("invalid UTF-8 in {raw:?}")))
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}
