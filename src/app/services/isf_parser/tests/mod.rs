//! Tests for the ISF parser components

pub mod builder_tests;

/// Build an exactly 136-character origin data row
///
/// Fills the solution-quality columns with plausible fixed values so tests
/// only vary the fields they care about. Widths are asserted so a drifting
/// helper fails loudly rather than producing rows the reader skips.
pub fn origin_row(
    date: &str,
    time: &str,
    latitude: &str,
    longitude: &str,
    depth: &str,
    author: &str,
    origin_id: &str,
) -> String {
    let row = format!(
        "{:<10} {:<11}{:1} {:>5} {:>5} {:>8} {:>9} {:>5} {:>5} {:>3} {:>5}{:<2}{:>4} {:>4} {:>4} {:>3} {:>6} {:>6} {:1} {:1} {:<2} {:<9} {:<8}",
        date, time, "f", "0.20", "1.10", latitude, longitude, "3.2", "2.1", "45", depth, "f",
        "1.5", "120", "110", "35", "0.50", "98.10", "a", "i", "ke", author, origin_id
    );
    assert_eq!(row.len(), 136, "origin row helper produced wrong width");
    row
}

/// Build an exactly 38-character magnitude data row
pub fn magnitude_row(scale: &str, value: &str, sigma: &str, author: &str, origin_id: &str) -> String {
    let row = format!(
        "{:<5} {:>4} {:>3} {:>4} {:<9} {:<8}",
        scale, value, sigma, "12", author, origin_id
    );
    assert_eq!(row.len(), 38, "magnitude row helper produced wrong width");
    row
}
