//! Quick delimited text exports
//!
//! Renders the catalogue to flat delimited text by joining the canonical
//! `id|fields` string renderings of events, origins and their per-origin
//! magnitudes, one row per origin. Also writes the compact
//! longitude/latitude/depth/magnitude table consumed by GMT.

use std::path::Path;

use tracing::info;

use crate::app::models::Catalogue;
use crate::{Error, Result};

/// Column header of the quick export
const QUICK_EXPORT_HEADER: &[&str] = &[
    "eventID",
    "Description",
    "originID",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "longitude",
    "latitude",
    "depth",
    "magOriginID",
    "magAgency",
    "magnitude",
    "magScale",
];

/// Rapidly export the catalogue to delimited text
///
/// One row per origin: the event rendering, the origin rendering, then each
/// magnitude associated to that origin flattened in place. Rows therefore
/// vary in length with the number of magnitudes.
pub fn quick_export(catalogue: &Catalogue, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(Error::from)?;

    writer.write_record(QUICK_EXPORT_HEADER)?;

    for event in &catalogue.events {
        // Event, origin and magnitude renderings share the `|` join contract
        let base = event.to_string();
        for origin in &event.origins {
            let mut fields: Vec<String> = base.split('|').map(String::from).collect();
            fields.extend(origin.to_string().split('|').map(String::from));
            for magnitude in &origin.magnitudes {
                fields.extend(magnitude.to_string().split('|').map(String::from));
            }
            writer.write_record(&fields)?;
        }
    }

    writer.flush().map_err(|e| Error::io("Failed to flush quick export", e))?;
    info!("Exported {} to {}", catalogue.id, path.display());
    Ok(())
}

/// Write the catalogue to a simple `long lat depth mag` text file for GMT
///
/// Takes one row per prime origin carrying magnitudes, at fixed `%.3f`
/// precision. A missing depth renders as NaN.
pub fn write_xyzm(catalogue: &Catalogue, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)
        .map_err(Error::from)?;

    let mut rows = 0usize;
    for event in &catalogue.events {
        for origin in &event.origins {
            if !origin.is_prime || origin.magnitudes.is_empty() {
                continue;
            }
            writer.write_record([
                format!("{:.3}", origin.location.longitude),
                format!("{:.3}", origin.location.latitude),
                format!("{:.3}", origin.location.depth.unwrap_or(f64::NAN)),
                format!("{:.3}", origin.magnitudes[0].value),
            ])?;
            rows += 1;
        }
    }

    writer.flush().map_err(|e| Error::io("Failed to flush xyzm export", e))?;
    info!("Wrote {} xyzm rows to {}", rows, path.display());
    Ok(())
}
