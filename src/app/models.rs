//! Data models for ISF catalogue processing
//!
//! This module contains the core data structures representing an earthquake
//! catalogue reconstructed from ISF text: magnitudes, locations, origins,
//! events and the catalogue itself. Origins and magnitudes are exclusively
//! owned by their event, events by their catalogue; the origin identifier
//! carried by a magnitude is a lookup key, never ownership.

use crate::constants::{
    DEFAULT_MAGNITUDE_SCALE, MAGNITUDE_VALUE_TOLERANCE, REJECTED_ID_SUFFIX, REJECTED_NAME_SUFFIX,
    calendar,
};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

// =============================================================================
// Magnitude
// =============================================================================

/// A single magnitude solution reported by an agency
///
/// The `(origin_id, author, scale)` triple identifies a magnitude for
/// deduplication purposes; two magnitudes sharing the triple must agree in
/// value within [`MAGNITUDE_VALUE_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    /// Identifier of the event this magnitude belongs to
    pub event_id: String,

    /// Identifier of the origin this magnitude refers to (lookup key)
    pub origin_id: String,

    /// Magnitude value
    pub value: f64,

    /// Reporting author/agency
    pub author: String,

    /// Magnitude scale (e.g. "Mw", "mb"); "UK" when the source left it blank
    pub scale: String,

    /// Magnitude uncertainty (1 s.d.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,

    /// Number of contributing stations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<i32>,
}

impl Magnitude {
    /// Create a new magnitude, defaulting a blank scale to "UK"
    pub fn new(
        event_id: impl Into<String>,
        origin_id: impl Into<String>,
        value: f64,
        author: impl Into<String>,
        scale: Option<String>,
        sigma: Option<f64>,
        stations: Option<i32>,
    ) -> Self {
        let scale = match scale {
            Some(s) if !s.trim().is_empty() => s,
            _ => DEFAULT_MAGNITUDE_SCALE.to_string(),
        };
        Self {
            event_id: event_id.into(),
            origin_id: origin_id.into(),
            value,
            author: author.into(),
            scale,
            sigma,
            stations,
        }
    }

    /// Composite identifier used as the deduplication key
    ///
    /// Concatenates origin id, author, value at fixed precision and scale.
    pub fn composite_id(&self) -> String {
        format!(
            "{}|{}|{:.2}|{}",
            self.origin_id, self.author, self.value, self.scale
        )
    }

    /// Check whether another magnitude shares this one's identity triple
    pub fn same_key(&self, other: &Magnitude) -> bool {
        self.origin_id == other.origin_id
            && self.author == other.author
            && self.scale == other.scale
    }

    /// Compare against another magnitude for merge deduplication
    ///
    /// Returns `Ok(true)` when the identity triples match and the values
    /// agree within tolerance, `Ok(false)` when the triples differ, and a
    /// fatal [`Error::MagnitudeConflict`] when the triples match but the
    /// values disagree beyond tolerance.
    pub fn compare(&self, other: &Magnitude) -> Result<bool> {
        if !self.same_key(other) {
            return Ok(false);
        }
        if (self.value - other.value).abs() > MAGNITUDE_VALUE_TOLERANCE {
            return Err(Error::magnitude_conflict(
                self.composite_id(),
                other.composite_id(),
            ));
        }
        Ok(true)
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.composite_id())
    }
}

// =============================================================================
// Location
// =============================================================================

/// Hypocentral location of an origin solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Identifier of the owning origin
    pub identifier: String,

    /// Longitude (decimal degrees)
    pub longitude: f64,

    /// Latitude (decimal degrees)
    pub latitude: f64,

    /// Depth (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,

    /// Depth-solution flag (`f` fixed depth, `d` depth phases)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_solution: Option<char>,

    /// Semimajor axis of the 90% error ellipse (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semimajor90: Option<f64>,

    /// Semiminor axis of the 90% error ellipse (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semiminor90: Option<f64>,

    /// Strike of the error-ellipse semimajor axis (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_strike: Option<f64>,

    /// 1 s.d. error on the depth value (km)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_error: Option<f64>,
}

impl Location {
    /// Create a location with only the mandatory coordinates set
    pub fn new(identifier: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            identifier: identifier.into(),
            longitude,
            latitude,
            depth: None,
            depth_solution: None,
            semimajor90: None,
            semiminor90: None,
            error_strike: None,
            depth_error: None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depth_str = match self.depth {
            Some(depth) => depth.to_string(),
            None => String::new(),
        };
        write!(f, "{}|{}|{}", self.longitude, self.latitude, depth_str)
    }
}

// =============================================================================
// Origin Metadata
// =============================================================================

/// Secondary solution metadata carried on an origin row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginMetadata {
    /// Number of defining phases
    pub nphases: Option<i32>,
    /// Number of recording stations
    pub nstations: Option<i32>,
    /// Azimuthal gap of recording stations (degrees)
    pub azimuth_gap: Option<f64>,
    /// Distance to the closest station (degrees)
    pub min_dist: Option<f64>,
    /// Distance to the furthest station (degrees)
    pub max_dist: Option<f64>,
    /// Fixed-time solution flag
    pub fixed_time: Option<char>,
    /// Analysis type code
    pub analysis_type: Option<char>,
    /// Location method code
    pub location_method: Option<char>,
    /// Event type code
    pub event_type: Option<String>,
}

// =============================================================================
// Origin
// =============================================================================

/// One agency's solution for where and when an earthquake occurred
///
/// Created when a fixed-width origin row is parsed; the prime/centroid flags
/// are set afterwards when the corresponding marker line follows the row,
/// and magnitudes are associated once the whole event block is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Origin identifier (unique within a catalogue, not globally)
    pub id: String,

    /// Solution date
    pub date: NaiveDate,

    /// Solution time-of-day (microsecond resolution)
    pub time: NaiveTime,

    /// Hypocentral location
    pub location: Location,

    /// Reporting author/agency
    pub author: String,

    /// This origin is the preferred solution for the event
    pub is_prime: bool,

    /// This origin is a moment-tensor centroid solution
    pub is_centroid: bool,

    /// Time error (s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_error: Option<f64>,

    /// Time root-mean-square residual (s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_rms: Option<f64>,

    /// Solution metadata block
    pub metadata: OriginMetadata,

    /// Magnitudes associated to this origin specifically
    pub magnitudes: Vec<Magnitude>,
}

impl Origin {
    /// Create an origin with no flags set and no magnitudes attached
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        location: Location,
        author: impl Into<String>,
        time_error: Option<f64>,
        time_rms: Option<f64>,
        metadata: OriginMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            time,
            location,
            author: author.into(),
            is_prime: false,
            is_centroid: false,
            time_error,
            time_rms,
            metadata,
            magnitudes: Vec::new(),
        }
    }

    /// Number of magnitudes associated to the origin
    pub fn number_magnitudes(&self) -> usize {
        self.magnitudes.len()
    }

    /// Magnitude scales associated with the origin, if any
    pub fn magnitude_scales(&self) -> Option<Vec<&str>> {
        if self.magnitudes.is_empty() {
            None
        } else {
            Some(self.magnitudes.iter().map(|m| m.scale.as_str()).collect())
        }
    }

    /// Magnitude values associated with the origin, if any
    pub fn magnitude_values(&self) -> Option<Vec<f64>> {
        if self.magnitudes.is_empty() {
            None
        } else {
            Some(self.magnitudes.iter().map(|m| m.value).collect())
        }
    }

    /// (value, scale) pairs for all magnitudes associated with the origin
    pub fn magnitude_tuples(&self) -> Option<Vec<(f64, &str)>> {
        if self.magnitudes.is_empty() {
            None
        } else {
            Some(
                self.magnitudes
                    .iter()
                    .map(|m| (m.value, m.scale.as_str()))
                    .collect(),
            )
        }
    }

    /// Seconds-of-minute including the fractional microsecond part
    pub fn seconds(&self) -> f64 {
        f64::from(self.time.second()) + f64::from(self.time.nanosecond()) / 1.0e9
    }

    /// Solution time as a fractional year
    pub fn decimal_time(&self) -> f64 {
        decimal_time(
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.time.hour(),
            self.time.minute(),
            self.seconds(),
        )
    }

    /// Date and time joined with `|` separators
    pub fn date_time_string(&self) -> String {
        let date_part = self.date.format("%Y|%m|%d").to_string();
        let time_part = if self.time.nanosecond() == 0 {
            self.time.format("%H|%M|%S").to_string()
        } else {
            self.time.format("%H|%M|%S%.6f").to_string()
        };
        format!("{}|{}", date_part, time_part)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.id,
            self.date_time_string(),
            self.location
        )
    }
}

// =============================================================================
// Event
// =============================================================================

/// A catalogued earthquake with all reported origin and magnitude solutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier (unique catalogue-wide)
    pub id: String,

    /// Free-text description from the header row
    pub description: String,

    /// Origin solutions in file order
    pub origins: Vec<Origin>,

    /// All magnitude solutions, before per-origin assignment
    pub magnitudes: Vec<Magnitude>,

    /// Accumulated parenthesized annotations, newline-joined
    pub comment: String,
}

impl Event {
    /// Create an event shell with empty origin and magnitude lists
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            origins: Vec::new(),
            magnitudes: Vec::new(),
            comment: String::new(),
        }
    }

    /// Number of origins associated to the event
    pub fn number_origins(&self) -> usize {
        self.origins.len()
    }

    /// Number of magnitudes associated to the event
    pub fn number_magnitudes(&self) -> usize {
        self.magnitudes.len()
    }

    /// Identifiers of all origins in file order
    pub fn origin_id_list(&self) -> Vec<&str> {
        self.origins.iter().map(|o| o.id.as_str()).collect()
    }

    /// Authors of all origins in file order
    pub fn author_list(&self) -> Vec<&str> {
        self.origins.iter().map(|o| o.author.as_str()).collect()
    }

    /// The prime origin if one was flagged, otherwise the first origin
    pub fn preferred_origin(&self) -> Option<&Origin> {
        self.origins
            .iter()
            .find(|o| o.is_prime)
            .or_else(|| self.origins.first())
    }

    /// All magnitudes rendered as a delimited list of
    /// value, sigma, scale, author quadruples
    pub fn magnitude_string(&self, delimiter: &str) -> String {
        let mut fields = Vec::with_capacity(self.magnitudes.len() * 4);
        for magnitude in &self.magnitudes {
            fields.push(magnitude.value.to_string());
            fields.push(
                magnitude
                    .sigma
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            );
            fields.push(magnitude.scale.clone());
            fields.push(magnitude.author.clone());
        }
        fields.join(delimiter)
    }

    /// Cross-assign each magnitude into the origin its identifier names
    ///
    /// Assignment is many-to-one (magnitude to origin); a magnitude whose
    /// origin identifier matches no origin stays only in the event list.
    pub fn assign_magnitudes_to_origins(&mut self) {
        for origin in &mut self.origins {
            for magnitude in &self.magnitudes {
                if origin.id == magnitude.origin_id {
                    origin.magnitudes.push(magnitude.clone());
                }
            }
        }
    }

    /// (author, scale, value, sigma) rows for every per-origin magnitude
    pub fn origin_magnitude_rows(&self) -> Vec<(&str, &str, f64, Option<f64>)> {
        let mut rows = Vec::new();
        for origin in &self.origins {
            for magnitude in &origin.magnitudes {
                rows.push((
                    magnitude.author.as_str(),
                    magnitude.scale.as_str(),
                    magnitude.value,
                    magnitude.sigma,
                ));
            }
        }
        rows
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|'{}'", self.id, self.description)
    }
}

// =============================================================================
// Catalogue
// =============================================================================

/// An earthquake catalogue: an ordered sequence of events in file order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Catalogue identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Events in file order (not required to be sorted by time)
    pub events: Vec<Event>,

    /// Events rejected by the keyword filter, if any occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<Box<Catalogue>>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            events: Vec::new(),
            rejected: None,
        }
    }

    /// Create the rejected-events companion of this catalogue
    pub fn rejected_companion(&self) -> Catalogue {
        Catalogue::new(
            format!("{}{}", self.id, REJECTED_ID_SUFFIX),
            format!("{}{}", self.name, REJECTED_NAME_SUFFIX),
        )
    }

    /// Number of events in the catalogue
    pub fn number_events(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalogue holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Identifiers of all events in file order
    pub fn event_id_list(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.id.as_str()).collect()
    }

    /// Look up an event by identifier
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Fractional-year dates of all events, preferring the prime origin and
    /// falling back to the first origin
    pub fn decimal_dates(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|event| event.preferred_origin())
            .map(Origin::decimal_time)
            .collect()
    }
}

// =============================================================================
// Decimal Time
// =============================================================================

/// Check whether a year is a leap year
pub fn leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Convert a calendar date-time to a fractional-year value
///
/// Accounts for leap years both in the day count and in the year length.
pub fn decimal_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let markers = if leap_year(year) {
        &calendar::CUMULATIVE_DAYS_LEAP
    } else {
        &calendar::CUMULATIVE_DAYS_NORMAL
    };
    let day_count = markers[(month - 1) as usize] + day - 1;
    let year_seconds = f64::from(day_count) * calendar::SECONDS_PER_DAY
        + second
        + 60.0 * f64::from(minute)
        + 3600.0 * f64::from(hour);
    let days_in_year = if leap_year(year) { 366.0 } else { 365.0 };
    f64::from(year) + year_seconds / (days_in_year * calendar::SECONDS_PER_DAY)
}
