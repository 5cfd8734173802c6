//! Tests for the origin, magnitude and event-header record builders

use chrono::{Datelike, Timelike};

use super::{magnitude_row, origin_row};
use crate::app::services::isf_parser::record_builders::{
    build_event_header, build_magnitude, build_origin,
};
use crate::config::ReaderConfig;

#[test]
fn test_build_origin_full_row() {
    let row = origin_row(
        "1984/03/22",
        "11:07:13.50",
        "40.8100",
        "14.4300",
        "10.0",
        "ISC",
        "00101234",
    );
    let origin = build_origin(&row, &ReaderConfig::default())
        .unwrap()
        .expect("origin should not be filtered");

    assert_eq!(origin.id, "00101234");
    assert_eq!(origin.author, "ISC");
    assert_eq!(origin.date.year(), 1984);
    assert_eq!(origin.date.month(), 3);
    assert_eq!(origin.date.day(), 22);
    assert_eq!(origin.time.hour(), 11);
    assert_eq!(origin.time.minute(), 7);
    assert_eq!(origin.time.second(), 13);
    assert_eq!(origin.time.nanosecond(), 500_000_000);
    assert_eq!(origin.time_error, Some(0.20));
    assert_eq!(origin.time_rms, Some(1.10));
    assert_eq!(origin.location.latitude, 40.81);
    assert_eq!(origin.location.longitude, 14.43);
    assert_eq!(origin.location.depth, Some(10.0));
    assert_eq!(origin.location.depth_solution, Some('f'));
    assert_eq!(origin.location.semimajor90, Some(3.2));
    assert_eq!(origin.location.semiminor90, Some(2.1));
    assert_eq!(origin.location.error_strike, Some(45.0));
    assert_eq!(origin.location.depth_error, Some(1.5));
    assert!(!origin.is_prime);
    assert!(!origin.is_centroid);

    assert_eq!(origin.metadata.nphases, Some(120));
    assert_eq!(origin.metadata.nstations, Some(110));
    assert_eq!(origin.metadata.azimuth_gap, Some(35.0));
    assert_eq!(origin.metadata.min_dist, Some(0.50));
    assert_eq!(origin.metadata.max_dist, Some(98.10));
    assert_eq!(origin.metadata.fixed_time, Some('f'));
    assert_eq!(origin.metadata.analysis_type, Some('a'));
    assert_eq!(origin.metadata.location_method, Some('i'));
    assert_eq!(origin.metadata.event_type, Some("ke".to_string()));
}

#[test]
fn test_build_origin_agency_filter() {
    let row = origin_row(
        "1984/03/22",
        "11:07:13.50",
        "40.8100",
        "14.4300",
        "10.0",
        "NEIC",
        "00101234",
    );
    let config = ReaderConfig::default().with_origin_agencies(["ISC", "GCMT"]);
    assert!(build_origin(&row, &config).unwrap().is_none());

    let config = ReaderConfig::default().with_origin_agencies(["NEIC"]);
    assert!(build_origin(&row, &config).unwrap().is_some());
}

#[test]
fn test_build_origin_blank_optionals_decode_as_missing() {
    // Hand-built row with every optional column blank
    let row = format!(
        "{:<10} {:<11}{:1} {:>5} {:>5} {:>8} {:>9} {:>5} {:>5} {:>3} {:>5}{:<2}{:>4} {:>4} {:>4} {:>3} {:>6} {:>6} {:1} {:1} {:<2} {:<9} {:<8}",
        "1984/03/22", "11:07:13.50", " ", " ", " ", "40.8100", "14.4300", " ", " ", " ", " ",
        " ", " ", " ", " ", " ", " ", " ", " ", " ", " ", "ISC", "00101234"
    );
    assert_eq!(row.len(), 136);

    let origin = build_origin(&row, &ReaderConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(origin.time_error, None);
    assert_eq!(origin.time_rms, None);
    assert_eq!(origin.location.depth, None);
    assert_eq!(origin.location.depth_solution, None);
    assert_eq!(origin.location.semimajor90, None);
    assert_eq!(origin.location.depth_error, None);
    assert_eq!(origin.metadata.nphases, None);
    assert_eq!(origin.metadata.event_type, None);
}

#[test]
fn test_build_origin_malformed_date_is_an_error() {
    let row = origin_row(
        "1984-03-22",
        "11:07:13.50",
        "40.8100",
        "14.4300",
        "10.0",
        "ISC",
        "00101234",
    );
    assert!(build_origin(&row, &ReaderConfig::default()).is_err());
}

#[test]
fn test_build_origin_missing_coordinates_is_an_error() {
    let row = origin_row(
        "1984/03/22",
        "11:07:13.50",
        " ",
        "14.4300",
        "10.0",
        "ISC",
        "00101234",
    );
    assert!(build_origin(&row, &ReaderConfig::default()).is_err());
}

#[test]
fn test_build_magnitude_full_row() {
    let row = magnitude_row("mb", "5.2", "0.1", "ISC", "00101234");
    let magnitude = build_magnitude(&row, "EV1", &ReaderConfig::default())
        .unwrap()
        .expect("magnitude should not be filtered");

    assert_eq!(magnitude.event_id, "EV1");
    assert_eq!(magnitude.origin_id, "00101234");
    assert_eq!(magnitude.scale, "mb");
    assert_eq!(magnitude.value, 5.2);
    assert_eq!(magnitude.sigma, Some(0.1));
    assert_eq!(magnitude.stations, Some(12));
    assert_eq!(magnitude.author, "ISC");
}

#[test]
fn test_build_magnitude_blank_scale_defaults() {
    let row = magnitude_row("", "5.2", "", "ISC", "00101234");
    let magnitude = build_magnitude(&row, "EV1", &ReaderConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(magnitude.scale, "UK");
    assert_eq!(magnitude.sigma, None);
}

#[test]
fn test_build_magnitude_agency_filter() {
    let row = magnitude_row("Mw", "6.1", "0.2", "HRVD", "00101234");
    let config = ReaderConfig::default().with_magnitude_agencies(["ISC"]);
    assert!(build_magnitude(&row, "EV1", &config).unwrap().is_none());
}

#[test]
fn test_build_magnitude_missing_value_is_an_error() {
    let row = magnitude_row("mb", "", "0.1", "ISC", "00101234");
    assert!(build_magnitude(&row, "EV1", &ReaderConfig::default()).is_err());
}

#[test]
fn test_build_event_header() {
    let event = build_event_header("Event 017091359 Mid-Atlantic Ridge").unwrap();
    assert_eq!(event.id, "017091359");
    assert_eq!(event.description, "Mid-Atlantic Ridge");
    assert!(event.origins.is_empty());
    assert!(event.magnitudes.is_empty());
    assert!(event.comment.is_empty());
}

#[test]
fn test_build_event_header_without_description() {
    let event = build_event_header("Event 017091359").unwrap();
    assert_eq!(event.id, "017091359");
    assert_eq!(event.description, "");
}

#[test]
fn test_build_event_header_rejects_non_headers() {
    assert!(build_event_header("Event").is_none());
    assert!(build_event_header("Some Event elsewhere").is_none());
    assert!(build_event_header("").is_none());
}
