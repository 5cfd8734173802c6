//! Tests for the catalogue exporters


use chrono::{NaiveDate, NaiveTime};

use crate::app::models::{Catalogue, Event, Location, Magnitude, Origin, OriginMetadata};

/// Build a two-event catalogue with magnitudes assigned to origins
pub fn sample_catalogue() -> Catalogue {
    let mut catalogue = Catalogue::new("TEST", "Test Catalogue");

    let mut location = Location::new("O1", 14.43, 40.81);
    location.depth = Some(10.0);
    location.semimajor90 = Some(3.2);
    location.semiminor90 = Some(2.1);
    location.error_strike = Some(45.0);
    location.depth_error = Some(1.5);
    location.depth_solution = Some('f');

    let mut origin = Origin::new(
        "O1",
        NaiveDate::from_ymd_opt(1984, 3, 22).unwrap(),
        NaiveTime::from_hms_micro_opt(11, 7, 13, 500_000).unwrap(),
        location,
        "ISC",
        Some(0.2),
        Some(1.1),
        OriginMetadata::default(),
    );
    origin.is_prime = true;
    origin.magnitudes.push(Magnitude::new(
        "EV1",
        "O1",
        5.2,
        "ISC",
        Some("mb".to_string()),
        Some(0.1),
        Some(12),
    ));

    let mut event = Event::new("EV1", "SOUTHERN ITALY");
    event.magnitudes = origin.magnitudes.clone();
    event.origins.push(origin);
    catalogue.events.push(event);

    // Second event: no prime flag, bare location, no sigma
    let origin = Origin::new(
        "O2",
        NaiveDate::from_ymd_opt(1990, 7, 16).unwrap(),
        NaiveTime::from_hms_opt(7, 26, 34).unwrap(),
        Location::new("O2", 121.17, 15.68),
        "NEIC",
        None,
        None,
        OriginMetadata::default(),
    );
    let mut event = Event::new("EV2", "LUZON");
    event.magnitudes.push(Magnitude::new(
        "EV2",
        "O2",
        7.7,
        "NEIC",
        Some("Ms".to_string()),
        None,
        None,
    ));
    event.origins.push(origin);
    event.assign_magnitudes_to_origins();
    catalogue.events.push(event);

    catalogue
}
