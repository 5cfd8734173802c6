//! Field decoding utilities for fixed-width ISF records
//!
//! Decoders convert a column range of a record row into a typed value,
//! treating blank or non-numeric content as missing rather than an error.
//! Agency-submitted records routinely omit optional fields by leaving their
//! columns blank, so leniency here is part of the format contract.

use std::ops::Range;

/// Slice a column range out of a row, clamped to the row length
pub fn slice_field(row: &str, range: Range<usize>) -> &str {
    let start = range.start.min(row.len());
    let end = range.end.min(row.len());
    &row[start..end]
}

/// Decode an integer column, tolerating surrounding whitespace
pub fn decode_int(row: &str, range: Range<usize>) -> Option<i32> {
    slice_field(row, range).trim().parse::<i32>().ok()
}

/// Decode a float column, tolerating surrounding whitespace
pub fn decode_float(row: &str, range: Range<usize>) -> Option<f64> {
    slice_field(row, range).trim().parse::<f64>().ok()
}

/// Decode a string column, trimming surrounding whitespace but preserving
/// internal spacing
pub fn decode_string(row: &str, range: Range<usize>) -> Option<String> {
    let trimmed = slice_field(row, range).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode a single-character flag column
pub fn decode_char(row: &str, range: Range<usize>) -> Option<char> {
    slice_field(row, range).trim().chars().next()
}
