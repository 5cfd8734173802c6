//! Merge statistics

/// Counters describing the outcome of merging one catalogue into another
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeStats {
    /// Secondary events whose identifier matched a primary event
    pub events_matched: usize,

    /// Secondary events with no primary counterpart (not added)
    pub events_unmatched: usize,

    /// Secondary origins appended wholesale to a primary event
    pub origins_appended: usize,

    /// Secondary origins reconciled into an existing primary origin
    pub origins_merged: usize,

    /// Magnitudes appended into a primary origin
    pub magnitudes_appended: usize,

    /// Incoming magnitudes dropped as duplicates of existing ones
    pub magnitudes_deduplicated: usize,
}

impl MergeStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate another set of counters into this one
    pub fn absorb(&mut self, other: &MergeStats) {
        self.events_matched += other.events_matched;
        self.events_unmatched += other.events_unmatched;
        self.origins_appended += other.origins_appended;
        self.origins_merged += other.origins_merged;
        self.magnitudes_appended += other.magnitudes_appended;
        self.magnitudes_deduplicated += other.magnitudes_deduplicated;
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} events matched ({} unmatched), {} origins appended, {} merged, \
             {} magnitudes appended, {} duplicates dropped",
            self.events_matched,
            self.events_unmatched,
            self.origins_appended,
            self.origins_merged,
            self.magnitudes_appended,
            self.magnitudes_deduplicated
        )
    }
}
