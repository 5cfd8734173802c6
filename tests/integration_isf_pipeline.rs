//! Integration tests for the full ISF pipeline
//!
//! Drives parse → merge → export end-to-end on synthetic ISF bulletins
//! written to a temporary directory, using only the public crate API.

use isf_processor::ReaderConfig;
use isf_processor::app::services::exporter::{quick_export, write_parquet_tables};
use isf_processor::app::services::isf_parser::IsfReader;
use isf_processor::app::services::merge::merge_catalogues;

const ORIGIN_SECTION_HEADER: &str = "   Date       Time        Err   RMS Latitude Longitude  \
Smaj  Smin  Az Depth   Err Ndef Nsta Gap  mdist  Mdist Qual   Author      OrigID";
const MAGNITUDE_SECTION_HEADER: &str = "Magnitude  Err Nsta Author      OrigID";

fn origin_row(date: &str, time: &str, latitude: &str, longitude: &str, author: &str, origin_id: &str) -> String {
    let row = format!(
        "{:<10} {:<11}{:1} {:>5} {:>5} {:>8} {:>9} {:>5} {:>5} {:>3} {:>5}{:<2}{:>4} {:>4} {:>4} {:>3} {:>6} {:>6} {:1} {:1} {:<2} {:<9} {:<8}",
        date, time, " ", "0.20", "1.10", latitude, longitude, "3.2", "2.1", "45", "33.0", " ",
        "1.5", "120", "110", "35", "0.50", "98.10", "a", "i", "ke", author, origin_id
    );
    assert_eq!(row.len(), 136);
    row
}

fn magnitude_row(scale: &str, value: &str, author: &str, origin_id: &str) -> String {
    let row = format!(
        "{:<5} {:>4} {:>3} {:>4} {:<9} {:<8}",
        scale, value, "0.1", "12", author, origin_id
    );
    assert_eq!(row.len(), 38);
    row
}

/// Primary bulletin: two events, the second with a flagged prime origin
fn primary_bulletin() -> String {
    [
        "DATA_TYPE BULLETIN IMS1.0",
        "ISC Bulletin",
        "",
        "Event 600001 AEGEAN SEA",
        ORIGIN_SECTION_HEADER,
        &origin_row("1995/05/13", "08:47:12.70", "40.1800", "21.7100", "ISC", "00600001"),
        MAGNITUDE_SECTION_HEADER,
        &magnitude_row("mb", "5.2", "ISC", "00600001"),
        "",
        "Event 600002 CRETE",
        " (Felt throughout the island)",
        ORIGIN_SECTION_HEADER,
        &origin_row("1995/06/01", "04:12:55.10", "35.3000", "24.9000", "ISC", "00600002"),
        " (#PRIME)",
        MAGNITUDE_SECTION_HEADER,
        &magnitude_row("mb", "4.9", "ISC", "00600002"),
        "STOP",
    ]
    .join("\n")
}

/// Secondary bulletin: enriches 600001, repeats a magnitude, and carries an
/// event absent from the primary
fn secondary_bulletin() -> String {
    [
        "DATA_TYPE BULLETIN IMS1.0",
        "Event 600001 AEGEAN SEA",
        ORIGIN_SECTION_HEADER,
        // Same origin id as the primary: reconciled at magnitude level
        &origin_row("1995/05/13", "08:47:12.70", "40.1800", "21.7100", "ISC", "00600001"),
        // New centroid solution: appended wholesale
        &origin_row("1995/05/13", "08:47:15.00", "40.2000", "21.7500", "GCMT", "00600101"),
        " (#CENTROID)",
        MAGNITUDE_SECTION_HEADER,
        // Duplicate of the primary's magnitude (within tolerance)
        &magnitude_row("mb", "5.2", "ISC", "00600001"),
        // New scale for the same origin
        &magnitude_row("Ms", "5.5", "ISC", "00600001"),
        &magnitude_row("Mw", "5.6", "GCMT", "00600101"),
        "",
        "Event 699999 NOWHERE",
        ORIGIN_SECTION_HEADER,
        &origin_row("1995/07/01", "00:00:01.00", "10.0000", "10.0000", "ISC", "00699999"),
        MAGNITUDE_SECTION_HEADER,
        &magnitude_row("mb", "4.0", "ISC", "00699999"),
        "STOP",
    ]
    .join("\n")
}

#[tokio::test]
async fn test_parse_merge_export_round_trip() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let primary_path = temp_dir.path().join("primary.isf");
    let secondary_path = temp_dir.path().join("secondary.isf");
    std::fs::write(&primary_path, primary_bulletin()).unwrap();
    std::fs::write(&secondary_path, secondary_bulletin()).unwrap();

    let reader = IsfReader::new(ReaderConfig::default()).unwrap();

    let mut primary = reader
        .parse_file(&primary_path, "PRIMARY", "Primary Catalogue")
        .await
        .unwrap();
    assert_eq!(primary.catalogue.number_events(), 2);
    assert_eq!(primary.stats.events_accepted, 2);

    // The prime marker applies to the Crete origin only
    let crete = primary.catalogue.event("600002").unwrap();
    assert!(crete.origins[0].is_prime);
    assert_eq!(crete.comment, "Felt throughout the island");

    let secondary = reader
        .parse_file(&secondary_path, "SECONDARY", "Secondary Catalogue")
        .await
        .unwrap();
    assert_eq!(secondary.catalogue.number_events(), 2);

    let stats = merge_catalogues(&mut primary.catalogue, secondary.catalogue, None).unwrap();
    assert_eq!(stats.events_matched, 1);
    assert_eq!(stats.events_unmatched, 1);
    assert_eq!(stats.origins_appended, 1);
    assert_eq!(stats.origins_merged, 1);
    // Only the reconciled origin's magnitudes go through the per-magnitude
    // merge; the wholesale-appended centroid keeps its own list
    assert_eq!(stats.magnitudes_appended, 1);
    assert_eq!(stats.magnitudes_deduplicated, 1);

    // The unmatched secondary event must not appear in the primary
    assert!(primary.catalogue.event("699999").is_none());

    // The Aegean event gained the centroid origin and the new magnitudes
    let aegean = primary.catalogue.event("600001").unwrap();
    assert_eq!(aegean.number_origins(), 2);
    let centroid = &aegean.origins[1];
    assert!(centroid.is_centroid);
    assert_eq!(centroid.author, "GCMT");
    assert_eq!(centroid.number_magnitudes(), 1);
    let reconciled = &aegean.origins[0];
    assert_eq!(reconciled.number_magnitudes(), 2);

    // Export both ways and confirm artifacts land on disk
    let output_dir = temp_dir.path().join("output");
    let (origins_path, magnitudes_path) =
        write_parquet_tables(&primary.catalogue, &output_dir).unwrap();
    assert!(origins_path.exists());
    assert!(magnitudes_path.exists());

    let csv_path = output_dir.join("primary.csv");
    quick_export(&primary.catalogue, &csv_path, b',').unwrap();
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("eventID,Description"));
    // One header row plus one row per origin (2 + 1 after the merge)
    assert_eq!(content.lines().count(), 4);
}

#[tokio::test]
async fn test_filters_apply_end_to_end() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let primary_path = temp_dir.path().join("primary.isf");
    std::fs::write(&primary_path, primary_bulletin()).unwrap();

    // The comment on the Crete event carries "felt"; reject it
    let config = ReaderConfig::default()
        .with_rejection_keywords(["felt"])
        .with_magnitude_bounds(5.0, 9.0);
    let reader = IsfReader::new(config).unwrap();

    let result = reader
        .parse_file(&primary_path, "PRIMARY", "Primary Catalogue")
        .await
        .unwrap();

    // Crete (4.9) fails the magnitude window before the keyword check runs,
    // so only the Aegean event survives and nothing is rejected
    assert_eq!(result.catalogue.number_events(), 1);
    assert_eq!(result.catalogue.events[0].id, "600001");
    assert!(result.catalogue.rejected.is_none());

    // Widen the window: now the keyword check rejects Crete
    let config = ReaderConfig::default().with_rejection_keywords(["felt"]);
    let reader = IsfReader::new(config).unwrap();
    let result = reader
        .parse_file(&primary_path, "PRIMARY", "Primary Catalogue")
        .await
        .unwrap();
    assert_eq!(result.catalogue.number_events(), 1);
    let rejected = result.catalogue.rejected.as_ref().unwrap();
    assert_eq!(rejected.id, "PRIMARY-R");
    assert_eq!(rejected.events[0].id, "600002");
}
