//! Parsing statistics and result structures for ISF processing
//!
//! This module provides types for tracking reader performance, acceptance
//! outcomes, and organizing parsed results for downstream processing.

use crate::app::models::Catalogue;

/// Parsing result: the assembled catalogue and reader statistics
///
/// Rejected events, if any, live in `catalogue.rejected`.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The assembled catalogue
    pub catalogue: Catalogue,

    /// Reader statistics
    pub stats: ParseStats,
}

/// Block-reader statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines read
    pub lines_read: usize,

    /// Number of event header rows encountered
    pub events_parsed: usize,

    /// Events accepted into the catalogue
    pub events_accepted: usize,

    /// Events excluded by the magnitude window or bounding box
    pub events_excluded: usize,

    /// Events diverted to the rejected sub-catalogue by keyword
    pub events_rejected: usize,

    /// Events discarded for having no origins or no magnitudes
    pub events_discarded_empty: usize,

    /// Origin rows successfully built
    pub origins_parsed: usize,

    /// Origin rows dropped by the agency allow-list
    pub origins_filtered: usize,

    /// Magnitude rows successfully built
    pub magnitudes_parsed: usize,

    /// Magnitude rows dropped by the agency allow-list
    pub magnitudes_filtered: usize,

    /// Correct-length rows that failed to build and were dropped
    pub records_skipped: usize,

    /// Messages from dropped rows, for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of encountered events that were accepted, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.events_parsed == 0 {
            0.0
        } else {
            (self.events_accepted as f64 / self.events_parsed as f64) * 100.0
        }
    }

    /// Whether the parse produced any events at all
    ///
    /// A zero-event outcome is the caller-detectable signal that the input
    /// was not an ISF bulletin or the filters removed everything.
    pub fn produced_events(&self) -> bool {
        self.events_accepted + self.events_rejected > 0
    }
}
