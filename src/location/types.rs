//! Core types for the address resolution subsystem.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use super::states::CanonicalState;

/// Which user action produced a resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    Text,
    Gps,
    Map,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "Suggestion"),
            Self::Gps => write!(f, "GPS"),
            Self::Map => write!(f, "Map"),
        }
    }
}

/// A latitude/longitude pair. Both halves always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting NaN/infinite components.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Whether the pair lies inside the WGS84 range.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", self.lat.abs(), ns, self.lng.abs(), ew)
    }
}

/// One lookup request. Created per request, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoQuery {
    Text(String),
    Point(Coordinates),
}

impl GeoQuery {
    /// Whether the query is worth sending to the geocoder.
    pub fn is_dispatchable(&self, min_chars: usize) -> bool {
        match self {
            Self::Text(text) => text.trim().chars().count() >= min_chars,
            Self::Point(c) => c.in_range(),
        }
    }
}

/// A single geocoder hit, as delivered over the wire.
///
/// Everything except `displayName` and the coordinates may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeocodeResult {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(deserialize_with = "de_coordinate")]
    pub lat: f64,
    #[serde(alias = "lon", deserialize_with = "de_coordinate")]
    pub lng: f64,
}

impl RawGeocodeResult {
    pub fn address(&self) -> Option<&str> {
        non_empty(&self.address)
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        non_empty(&self.state)
    }

    /// The provider's own suburb, falling back to its neighbourhood field.
    pub fn suburb(&self) -> Option<&str> {
        non_empty(&self.suburb).or_else(|| non_empty(&self.neighbourhood))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.lat, self.lng)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Providers disagree on whether coordinates are numbers or strings.
fn de_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(f64),
        Str(String),
    }

    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// The canonical record handed to the hosting form after a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLocation {
    pub address: String,
    pub city: String,
    pub state: CanonicalState,
    /// Empty when no suburb could be determined.
    pub suburb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl NormalizedLocation {
    pub fn display_line(&self) -> String {
        let area = match (self.suburb.is_empty(), self.city.is_empty()) {
            (false, false) => format!("{}, {}", self.suburb, self.city),
            (false, true) => self.suburb.clone(),
            (true, false) => self.city.clone(),
            (true, true) => String::from("(unknown area)"),
        };
        let coords = self
            .coordinates
            .map(|c| format!("\n  \u{1F4D0} {}", c))
            .unwrap_or_default();
        format!(
            "\u{1F4CD} {}\n  \u{1F3D8}  {}, {} State{}",
            self.address, area, self.state, coords
        )
    }
}

/// Result of a reverse lookup. Provider failure collapses into `NotFound`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReverseOutcome {
    Found(RawGeocodeResult),
    NotFound,
}

/// Location subsystem errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Configuration error: {0}")]
    Config(String),
}
