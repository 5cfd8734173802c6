//! Application constants for the ISF processor
//!
//! This module contains the fixed-width column layout of the ISF wire format,
//! the literal section markers recognized by the block reader, and default
//! values used throughout the application. The column offsets are a
//! compatibility contract with external agency data feeds and must not drift.

use std::ops::Range;

// =============================================================================
// Record Geometry
// =============================================================================

/// Exact length of an origin data row after trimming the trailing newline
pub const ORIGIN_ROW_LENGTH: usize = 136;

/// Exact length of a magnitude data row after trimming the trailing newline
pub const MAGNITUDE_ROW_LENGTH: usize = 38;

// =============================================================================
// Section Markers and Literals
// =============================================================================

/// Column header introducing the origin table of an event block
pub const ORIGIN_SECTION_HEADER: &str = "   Date       Time        Err   RMS Latitude Longitude  \
Smaj  Smin  Az Depth   Err Ndef Nsta Gap  mdist  Mdist Qual   Author      OrigID";

/// Column header introducing the magnitude table of an event block
pub const MAGNITUDE_SECTION_HEADER: &str = "Magnitude  Err Nsta Author      OrigID";

/// First token of an event header row
pub const EVENT_TOKEN: &str = "Event";

/// Marker flagging the previously appended origin as the prime solution
pub const PRIME_MARKER: &str = "(#PRIME)";

/// Marker flagging the previously appended origin as a moment-tensor centroid
pub const CENTROID_MARKER: &str = "(#CENTROID)";

/// File terminator line
pub const STOP_MARKER: &str = "STOP";

/// Prefix of the file-type banner line (e.g. `DATA_TYPE BULLETIN IMS1.0`)
pub const DATA_TYPE_PREFIX: &str = "DATA_TYPE";

/// Bulletin title line emitted by the ISC web exports
pub const BULLETIN_TITLE: &str = "ISC Bulletin";

// =============================================================================
// Origin Row Columns (byte offsets, end-exclusive)
// =============================================================================

/// Fixed column ranges of a 136-character origin data row
pub mod origin_columns {
    use super::Range;

    /// Date `yyyy/mm/dd`
    pub const DATE: Range<usize> = 0..10;
    /// Time `hh:mm:ss.ss`
    pub const TIME: Range<usize> = 11..22;
    /// Fixed-time solution flag (single character)
    pub const FIXED_TIME_FLAG: Range<usize> = 22..23;
    /// Time error (s)
    pub const TIME_ERROR: Range<usize> = 24..29;
    /// Time root-mean-square residual (s)
    pub const TIME_RMS: Range<usize> = 30..35;
    /// Latitude (decimal degrees)
    pub const LATITUDE: Range<usize> = 36..44;
    /// Longitude (decimal degrees)
    pub const LONGITUDE: Range<usize> = 45..54;
    /// Semimajor axis of the 90% error ellipse (km)
    pub const SEMIMAJOR90: Range<usize> = 55..60;
    /// Semiminor axis of the 90% error ellipse (km)
    pub const SEMIMINOR90: Range<usize> = 61..66;
    /// Strike of the error-ellipse semimajor axis (degrees)
    pub const ERROR_STRIKE: Range<usize> = 67..70;
    /// Depth (km)
    pub const DEPTH: Range<usize> = 71..76;
    /// Depth-solution flag (`f` fixed, `d` depth phases, blank free)
    pub const DEPTH_SOLUTION: Range<usize> = 76..78;
    /// Depth error (km)
    pub const DEPTH_ERROR: Range<usize> = 78..82;
    /// Number of defining phases
    pub const NPHASES: Range<usize> = 83..87;
    /// Number of recording stations
    pub const NSTATIONS: Range<usize> = 88..92;
    /// Azimuthal gap of recording stations (degrees)
    pub const AZIMUTH_GAP: Range<usize> = 93..96;
    /// Distance to the closest station (degrees)
    pub const MIN_DIST: Range<usize> = 97..103;
    /// Distance to the furthest station (degrees)
    pub const MAX_DIST: Range<usize> = 104..110;
    /// Analysis type (single character)
    pub const ANALYSIS_TYPE: Range<usize> = 111..112;
    /// Location method (single character)
    pub const LOCATION_METHOD: Range<usize> = 113..114;
    /// Event type code
    pub const EVENT_TYPE: Range<usize> = 115..117;
    /// Reporting author/agency
    pub const AUTHOR: Range<usize> = 118..127;
    /// Origin identifier (runs to end of row)
    pub const ORIGIN_ID: Range<usize> = 128..136;
}

// =============================================================================
// Magnitude Row Columns (byte offsets, end-exclusive)
// =============================================================================

/// Fixed column ranges of a 38-character magnitude data row
pub mod magnitude_columns {
    use super::Range;

    /// Magnitude scale (e.g. `mb`, `Ms`, `Mw`)
    pub const SCALE: Range<usize> = 0..5;
    /// Magnitude value
    pub const VALUE: Range<usize> = 6..10;
    /// Magnitude uncertainty (1 s.d.)
    pub const SIGMA: Range<usize> = 11..14;
    /// Number of contributing stations
    pub const NSTATIONS: Range<usize> = 15..19;
    /// Reporting author/agency
    pub const AUTHOR: Range<usize> = 20..29;
    /// Origin identifier the magnitude refers to (runs to end of row)
    pub const ORIGIN_ID: Range<usize> = 30..38;
}

// =============================================================================
// Agencies and Defaults
// =============================================================================

/// Agencies conventionally selected when building a global catalogue
pub const GLOBAL_SELECTED_AGENCIES: &[&str] =
    &["ISC", "EHB", "GCMT", "HRVD", "GUTE", "PAS", "NIED"];

/// Scale recorded when the magnitude row leaves the scale columns blank
pub const DEFAULT_MAGNITUDE_SCALE: &str = "UK";

/// Two magnitudes sharing (origin, author, scale) must agree within this
pub const MAGNITUDE_VALUE_TOLERANCE: f64 = 1.0e-3;

/// Suffix appended to the identifier of the rejected-events sub-catalogue
pub const REJECTED_ID_SUFFIX: &str = "-R";

/// Suffix appended to the display name of the rejected-events sub-catalogue
pub const REJECTED_NAME_SUFFIX: &str = " - Rejected";

// =============================================================================
// Calendar Helpers for Decimal Time
// =============================================================================

/// Day-count markers used by the fractional-year conversion
pub mod calendar {
    /// Cumulative days at the start of each month, common year
    pub const CUMULATIVE_DAYS_NORMAL: [u32; 12] =
        [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    /// Cumulative days at the start of each month, leap year
    pub const CUMULATIVE_DAYS_LEAP: [u32; 12] =
        [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

    /// Seconds in a day
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}
