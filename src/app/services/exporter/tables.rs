//! Fixed-schema tabular rendering of a catalogue
//!
//! Flattens a catalogue into two tables: one row per origin and one row per
//! event-level magnitude. Optional solution-quality fields default to 0.0
//! and flag fields to the empty string, matching the layout downstream
//! tabular consumers expect. Depth stays nullable since a missing depth is
//! meaningful.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use polars::prelude::*;
use tracing::{debug, info};

use crate::app::models::Catalogue;
use crate::{Error, Result};

/// Render the catalogue's origins as a fixed-schema DataFrame
pub fn origins_dataframe(catalogue: &Catalogue) -> Result<DataFrame> {
    let row_count: usize = catalogue.events.iter().map(|e| e.origins.len()).sum();

    let mut event_ids = Vec::with_capacity(row_count);
    let mut origin_ids = Vec::with_capacity(row_count);
    let mut agencies = Vec::with_capacity(row_count);
    let mut years = Vec::with_capacity(row_count);
    let mut months = Vec::with_capacity(row_count);
    let mut days = Vec::with_capacity(row_count);
    let mut hours = Vec::with_capacity(row_count);
    let mut minutes = Vec::with_capacity(row_count);
    let mut seconds = Vec::with_capacity(row_count);
    let mut time_errors = Vec::with_capacity(row_count);
    let mut longitudes = Vec::with_capacity(row_count);
    let mut latitudes = Vec::with_capacity(row_count);
    let mut depths: Vec<Option<f64>> = Vec::with_capacity(row_count);
    let mut depth_solutions = Vec::with_capacity(row_count);
    let mut semimajors = Vec::with_capacity(row_count);
    let mut semiminors = Vec::with_capacity(row_count);
    let mut error_strikes = Vec::with_capacity(row_count);
    let mut depth_errors = Vec::with_capacity(row_count);
    let mut primes: Vec<i32> = Vec::with_capacity(row_count);

    for event in &catalogue.events {
        for origin in &event.origins {
            event_ids.push(event.id.clone());
            origin_ids.push(origin.id.clone());
            agencies.push(origin.author.clone());
            years.push(origin.date.year());
            months.push(origin.date.month() as i32);
            days.push(origin.date.day() as i32);
            hours.push(origin.time.hour() as i32);
            minutes.push(origin.time.minute() as i32);
            seconds.push(origin.seconds());
            time_errors.push(origin.time_error.unwrap_or(0.0));
            longitudes.push(origin.location.longitude);
            latitudes.push(origin.location.latitude);
            depths.push(origin.location.depth);
            depth_solutions.push(
                origin
                    .location
                    .depth_solution
                    .map(String::from)
                    .unwrap_or_default(),
            );
            semimajors.push(origin.location.semimajor90.unwrap_or(0.0));
            semiminors.push(origin.location.semiminor90.unwrap_or(0.0));
            error_strikes.push(origin.location.error_strike.unwrap_or(0.0));
            depth_errors.push(origin.location.depth_error.unwrap_or(0.0));
            primes.push(i32::from(origin.is_prime));
        }
    }

    debug!("Rendered {} origin rows from {}", row_count, catalogue.id);

    let frame = df!(
        "eventID" => event_ids,
        "originID" => origin_ids,
        "Agency" => agencies,
        "year" => years,
        "month" => months,
        "day" => days,
        "hour" => hours,
        "minute" => minutes,
        "second" => seconds,
        "time_error" => time_errors,
        "longitude" => longitudes,
        "latitude" => latitudes,
        "depth" => depths,
        "depthSolution" => depth_solutions,
        "semimajor90" => semimajors,
        "semiminor90" => semiminors,
        "error_strike" => error_strikes,
        "depth_error" => depth_errors,
        "prime" => primes,
    )?;
    Ok(frame)
}

/// Render the catalogue's event-level magnitudes as a fixed-schema DataFrame
pub fn magnitudes_dataframe(catalogue: &Catalogue) -> Result<DataFrame> {
    let row_count: usize = catalogue.events.iter().map(|e| e.magnitudes.len()).sum();

    let mut event_ids = Vec::with_capacity(row_count);
    let mut origin_ids = Vec::with_capacity(row_count);
    let mut magnitude_ids = Vec::with_capacity(row_count);
    let mut values = Vec::with_capacity(row_count);
    let mut sigmas = Vec::with_capacity(row_count);
    let mut scales = Vec::with_capacity(row_count);
    let mut agencies = Vec::with_capacity(row_count);

    for event in &catalogue.events {
        for magnitude in &event.magnitudes {
            event_ids.push(magnitude.event_id.clone());
            origin_ids.push(magnitude.origin_id.clone());
            magnitude_ids.push(magnitude.composite_id());
            values.push(magnitude.value);
            sigmas.push(magnitude.sigma.unwrap_or(0.0));
            scales.push(magnitude.scale.clone());
            agencies.push(magnitude.author.clone());
        }
    }

    debug!("Rendered {} magnitude rows from {}", row_count, catalogue.id);

    let frame = df!(
        "eventID" => event_ids,
        "originID" => origin_ids,
        "magnitudeID" => magnitude_ids,
        "value" => values,
        "sigma" => sigmas,
        "magType" => scales,
        "magAgency" => agencies,
    )?;
    Ok(frame)
}

/// Render one row per prime origin carrying magnitudes
///
/// Pairs each event's decimal date with its prime origin's location and the
/// first magnitude associated to that origin. Events without a flagged
/// prime origin, and prime origins without magnitudes, are skipped.
pub fn summary_dataframe(catalogue: &Catalogue) -> Result<DataFrame> {
    let mut event_ids = Vec::new();
    let mut origin_ids = Vec::new();
    let mut decimal_times = Vec::new();
    let mut latitudes = Vec::new();
    let mut longitudes = Vec::new();
    let mut depths: Vec<Option<f64>> = Vec::new();
    let mut magnitudes = Vec::new();

    for event in &catalogue.events {
        let Some(preferred) = event.preferred_origin() else {
            continue;
        };
        let decimal_date = preferred.decimal_time();
        for origin in &event.origins {
            if !origin.is_prime || origin.magnitudes.is_empty() {
                continue;
            }
            event_ids.push(event.id.clone());
            origin_ids.push(origin.id.clone());
            decimal_times.push(decimal_date);
            latitudes.push(origin.location.latitude);
            longitudes.push(origin.location.longitude);
            depths.push(origin.location.depth);
            magnitudes.push(origin.magnitudes[0].value);
        }
    }

    let frame = df!(
        "eventID" => event_ids,
        "originID" => origin_ids,
        "decimalTime" => decimal_times,
        "latitude" => latitudes,
        "longitude" => longitudes,
        "depth" => depths,
        "magnitude" => magnitudes,
    )?;
    Ok(frame)
}

/// Write the origin and magnitude tables as Parquet files
///
/// Produces `<catalogue id>_origins.parquet` and
/// `<catalogue id>_magnitudes.parquet` inside `output_dir`.
pub fn write_parquet_tables(catalogue: &Catalogue, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    let origins_path = output_dir.join(format!("{}_origins.parquet", catalogue.id));
    let magnitudes_path = output_dir.join(format!("{}_magnitudes.parquet", catalogue.id));

    let mut origins = origins_dataframe(catalogue)?;
    let file = File::create(&origins_path).map_err(|e| {
        Error::io(
            format!("Failed to create {}", origins_path.display()),
            e,
        )
    })?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut origins)?;

    let mut magnitudes = magnitudes_dataframe(catalogue)?;
    let file = File::create(&magnitudes_path).map_err(|e| {
        Error::io(
            format!("Failed to create {}", magnitudes_path.display()),
            e,
        )
    })?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut magnitudes)?;

    info!(
        "Wrote {} origins and {} magnitudes to {}",
        origins.height(),
        magnitudes.height(),
        output_dir.display()
    );
    Ok((origins_path, magnitudes_path))
}
