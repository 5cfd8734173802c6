//! Record builders for individual ISF data rows
//!
//! Each builder turns one fixed-width text row into a single domain record,
//! applying the configured agency allow-lists. A builder returns `Ok(None)`
//! when the row is well-formed but filtered out, and an error when a
//! mandatory field cannot be decoded; the block reader recovers from the
//! latter by dropping the row.

use chrono::{NaiveDate, NaiveTime};

use super::field_decoders::{decode_char, decode_float, decode_int, decode_string, slice_field};
use crate::app::models::{Event, Location, Magnitude, Origin, OriginMetadata};
use crate::config::ReaderConfig;
use crate::constants::{EVENT_TOKEN, magnitude_columns, origin_columns};
use crate::{Error, Result};

/// Parse the `hh:mm:ss.ss` time columns into a time-of-day with derived
/// microseconds
fn decode_time(row: &str) -> Result<NaiveTime> {
    let text = slice_field(row, origin_columns::TIME).trim().to_string();
    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::record_parsing(format!(
            "invalid time field '{}'",
            text
        )));
    };

    let hours: u32 = hours
        .trim()
        .parse()
        .map_err(|_| Error::record_parsing(format!("invalid hour in time field '{}'", text)))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| Error::record_parsing(format!("invalid minute in time field '{}'", text)))?;
    let seconds: f64 = seconds
        .trim()
        .parse()
        .map_err(|_| Error::record_parsing(format!("invalid second in time field '{}'", text)))?;

    let whole_seconds = seconds.floor();
    let microseconds = ((seconds - whole_seconds) * 1.0e6).round() as u32;

    NaiveTime::from_hms_micro_opt(hours, minutes, whole_seconds as u32, microseconds)
        .ok_or_else(|| Error::record_parsing(format!("time field '{}' out of range", text)))
}

/// Parse the `yyyy/mm/dd` date columns
fn decode_date(row: &str) -> Result<NaiveDate> {
    let text = slice_field(row, origin_columns::DATE).trim();
    NaiveDate::parse_from_str(text, "%Y/%m/%d")
        .map_err(|_| Error::record_parsing(format!("invalid date field '{}'", text)))
}

/// Decode the solution metadata block of an origin row
fn decode_origin_metadata(row: &str) -> OriginMetadata {
    OriginMetadata {
        nphases: decode_int(row, origin_columns::NPHASES),
        nstations: decode_int(row, origin_columns::NSTATIONS),
        azimuth_gap: decode_float(row, origin_columns::AZIMUTH_GAP),
        min_dist: decode_float(row, origin_columns::MIN_DIST),
        max_dist: decode_float(row, origin_columns::MAX_DIST),
        fixed_time: decode_char(row, origin_columns::FIXED_TIME_FLAG),
        analysis_type: decode_char(row, origin_columns::ANALYSIS_TYPE),
        location_method: decode_char(row, origin_columns::LOCATION_METHOD),
        event_type: decode_string(row, origin_columns::EVENT_TYPE),
    }
}

/// Build an [`Origin`] from a 136-character origin data row
///
/// Returns `Ok(None)` when an origin-agency allow-list is configured and the
/// parsed author is absent from it.
pub fn build_origin(row: &str, config: &ReaderConfig) -> Result<Option<Origin>> {
    let origin_id = decode_string(row, origin_columns::ORIGIN_ID)
        .ok_or_else(|| Error::record_parsing("origin row has no origin identifier"))?;
    let author = decode_string(row, origin_columns::AUTHOR)
        .ok_or_else(|| Error::record_parsing("origin row has no author"))?;

    if !config.accepts_origin_agency(&author) {
        return Ok(None);
    }

    let date = decode_date(row)?;
    let time = decode_time(row)?;
    let time_error = decode_float(row, origin_columns::TIME_ERROR);
    let time_rms = decode_float(row, origin_columns::TIME_RMS);

    let latitude = decode_float(row, origin_columns::LATITUDE)
        .ok_or_else(|| Error::record_parsing("origin row has no latitude"))?;
    let longitude = decode_float(row, origin_columns::LONGITUDE)
        .ok_or_else(|| Error::record_parsing("origin row has no longitude"))?;

    let location = Location {
        identifier: origin_id.clone(),
        longitude,
        latitude,
        depth: decode_float(row, origin_columns::DEPTH),
        depth_solution: decode_char(row, origin_columns::DEPTH_SOLUTION),
        semimajor90: decode_float(row, origin_columns::SEMIMAJOR90),
        semiminor90: decode_float(row, origin_columns::SEMIMINOR90),
        error_strike: decode_float(row, origin_columns::ERROR_STRIKE),
        depth_error: decode_float(row, origin_columns::DEPTH_ERROR),
    };

    Ok(Some(Origin::new(
        origin_id,
        date,
        time,
        location,
        author,
        time_error,
        time_rms,
        decode_origin_metadata(row),
    )))
}

/// Build a [`Magnitude`] from a 38-character magnitude data row
///
/// Returns `Ok(None)` when a magnitude-agency allow-list is configured and
/// the parsed author is absent from it.
pub fn build_magnitude(row: &str, event_id: &str, config: &ReaderConfig) -> Result<Option<Magnitude>> {
    let origin_id = decode_string(row, magnitude_columns::ORIGIN_ID)
        .ok_or_else(|| Error::record_parsing("magnitude row has no origin identifier"))?;
    let author = decode_string(row, magnitude_columns::AUTHOR)
        .ok_or_else(|| Error::record_parsing("magnitude row has no author"))?;

    if !config.accepts_magnitude_agency(&author) {
        return Ok(None);
    }

    let value = decode_float(row, magnitude_columns::VALUE)
        .ok_or_else(|| Error::record_parsing("magnitude row has no value"))?;
    let sigma = decode_float(row, magnitude_columns::SIGMA);
    let stations = decode_int(row, magnitude_columns::NSTATIONS);
    let scale = decode_string(row, magnitude_columns::SCALE);

    Ok(Some(Magnitude::new(
        event_id, origin_id, value, author, scale, sigma, stations,
    )))
}

/// Build an [`Event`] shell from an event header row
///
/// The first whitespace token must be the literal `Event`; the second token
/// is the identifier and the remainder the description. Returns `None` for
/// header rows with no identifier, which the reader then drops.
pub fn build_event_header(line: &str) -> Option<Event> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(EVENT_TOKEN) {
        return None;
    }
    let identifier = tokens.next()?;
    let description = tokens.collect::<Vec<_>>().join(" ");
    Some(Event::new(identifier, description))
}
