//! Core ISF block-reader implementation
//!
//! The reader scans a catalogue file line by line, recognizing header
//! markers, section markers, comment annotations and block terminators, and
//! groups consecutive origin and magnitude rows into the current event.
//! Side effects are strictly ordered in file order: the prime and centroid
//! markers always refer to the most recently appended origin, so lines must
//! never be reordered.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use super::acceptance::{Acceptance, assess_event};
use super::record_builders::{build_event_header, build_magnitude, build_origin};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Catalogue, Event};
use crate::config::ReaderConfig;
use crate::constants::{
    BULLETIN_TITLE, CENTROID_MARKER, DATA_TYPE_PREFIX, EVENT_TOKEN, MAGNITUDE_ROW_LENGTH,
    MAGNITUDE_SECTION_HEADER, ORIGIN_ROW_LENGTH, ORIGIN_SECTION_HEADER, PRIME_MARKER, STOP_MARKER,
};
use crate::{Error, Result};

/// A line whose entire content is a parenthesized annotation
static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\((.*)\)\s*$").expect("comment pattern is valid"));

/// Section the reader is currently positioned in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Between an event header and the first section header
    ScanningForEvent,
    /// Inside the origin table of the current event block
    InOriginSection,
    /// Inside the magnitude table of the current event block
    InMagnitudeSection,
}

/// Explicit parser state threaded through the line-processing loop
///
/// The current event shell doubles as the accumulator for origins,
/// magnitudes and comment text; `finalize` runs both mid-stream on a new
/// event header and once more at end of input.
#[derive(Debug)]
struct ParserState {
    section: Section,
    current: Option<Event>,
    accepted: Vec<Event>,
    rejected: Vec<Event>,
    stats: ParseStats,
}

impl ParserState {
    fn new() -> Self {
        Self {
            section: Section::ScanningForEvent,
            current: None,
            accepted: Vec::new(),
            rejected: Vec::new(),
            stats: ParseStats::new(),
        }
    }
}

/// Reader for ISF formatted earthquake catalogues
///
/// Considers only the origin and magnitude agencies configured by the user
/// and applies the event acceptance filter as each block completes. The
/// configuration is validated eagerly at construction.
#[derive(Debug, Clone)]
pub struct IsfReader {
    config: ReaderConfig,
}

impl IsfReader {
    /// Create a reader, validating the configuration before any parsing
    pub fn new(config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the validated configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parse a catalogue file, assigning the identifier and display name
    pub async fn parse_file(
        &self,
        file_path: &Path,
        identifier: &str,
        name: &str,
    ) -> Result<ParseResult> {
        info!("Parsing ISF catalogue file: {}", file_path.display());

        let content = std::fs::read_to_string(file_path).map_err(|e| {
            Error::io(
                format!("Failed to read file {}: {}", file_path.display(), e),
                e,
            )
        })?;

        self.parse_str(&content, identifier, name)
    }

    /// Parse catalogue text held in memory
    pub fn parse_str(&self, content: &str, identifier: &str, name: &str) -> Result<ParseResult> {
        let mut state = ParserState::new();

        for raw_line in content.lines() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            state.stats.lines_read += 1;
            self.process_line(line, &mut state);
        }

        // The last pending event never sees a following header row, so it
        // must be finalized through the same acceptance path here.
        self.finalize_event(&mut state);

        let mut catalogue = Catalogue::new(identifier, name);
        if !state.rejected.is_empty() {
            let mut rejected = catalogue.rejected_companion();
            rejected.events = state.rejected;
            catalogue.rejected = Some(Box::new(rejected));
        }
        catalogue.events = state.accepted;

        info!(
            "Parsed {}: {} events accepted, {} rejected, {} excluded",
            identifier,
            state.stats.events_accepted,
            state.stats.events_rejected,
            state.stats.events_excluded
        );
        if !state.stats.produced_events() {
            warn!("Catalogue {} produced no events", identifier);
        }

        Ok(ParseResult {
            catalogue,
            stats: state.stats,
        })
    }

    /// Process a single line, in the fixed precedence order of the format
    fn process_line(&self, line: &str, state: &mut ParserState) {
        let trimmed = line.trim();

        // 1. Blank lines carry no information
        if trimmed.is_empty() {
            return;
        }

        // 2. Known boilerplate: file-type banner, bulletin title, terminator
        if trimmed.starts_with(DATA_TYPE_PREFIX)
            || trimmed == BULLETIN_TITLE
            || trimmed == STOP_MARKER
        {
            return;
        }

        // 3./4. Prime and centroid markers flag the most recent origin
        if line.contains(PRIME_MARKER) {
            if let Some(origin) = state.current.as_mut().and_then(|e| e.origins.last_mut()) {
                origin.is_prime = true;
            }
            return;
        }
        if line.contains(CENTROID_MARKER) {
            if let Some(origin) = state.current.as_mut().and_then(|e| e.origins.last_mut()) {
                origin.is_centroid = true;
            }
            return;
        }

        // 5. A fully parenthesized line is a comment annotation
        if let Some(captures) = COMMENT_PATTERN.captures(line) {
            if let Some(event) = state.current.as_mut() {
                let text = captures.get(1).map_or("", |m| m.as_str());
                if !event.comment.is_empty() {
                    event.comment.push('\n');
                }
                event.comment.push_str(text);
            }
            return;
        }

        // 6. An event header finalizes the previous block and opens a new one
        if line.split_whitespace().next() == Some(EVENT_TOKEN) {
            if let Some(event) = build_event_header(line) {
                self.finalize_event(state);
                debug!("Starting event block {}", event.id);
                state.current = Some(event);
                state.section = Section::ScanningForEvent;
                state.stats.events_parsed += 1;
                return;
            }
            // Header with no identifier: fall through and drop the line
        }

        // 7./8. Section column headers switch the active table
        if line == ORIGIN_SECTION_HEADER {
            state.section = Section::InOriginSection;
            return;
        }
        if line == MAGNITUDE_SECTION_HEADER {
            state.section = Section::InMagnitudeSection;
            return;
        }

        // 9./10. Data rows are recognized by exact length within the active
        // section; anything else is dropped silently.
        match state.section {
            Section::InMagnitudeSection if line.len() == MAGNITUDE_ROW_LENGTH => {
                self.process_magnitude_row(line, state);
            }
            Section::InOriginSection if line.len() == ORIGIN_ROW_LENGTH => {
                self.process_origin_row(line, state);
            }
            _ => {}
        }
    }

    fn process_origin_row(&self, line: &str, state: &mut ParserState) {
        let Some(event) = state.current.as_mut() else {
            return;
        };
        match build_origin(line, &self.config) {
            Ok(Some(origin)) => {
                event.origins.push(origin);
                state.stats.origins_parsed += 1;
            }
            Ok(None) => {
                state.stats.origins_filtered += 1;
            }
            Err(e) => {
                state.stats.records_skipped += 1;
                state
                    .stats
                    .errors
                    .push(format!("Line {}: {}", state.stats.lines_read, e));
                debug!("Skipped origin row at line {}: {}", state.stats.lines_read, e);
            }
        }
    }

    fn process_magnitude_row(&self, line: &str, state: &mut ParserState) {
        let Some(event) = state.current.as_mut() else {
            return;
        };
        let event_id = event.id.clone();
        match build_magnitude(line, &event_id, &self.config) {
            Ok(Some(magnitude)) => {
                event.magnitudes.push(magnitude);
                state.stats.magnitudes_parsed += 1;
            }
            Ok(None) => {
                state.stats.magnitudes_filtered += 1;
            }
            Err(e) => {
                state.stats.records_skipped += 1;
                state
                    .stats
                    .errors
                    .push(format!("Line {}: {}", state.stats.lines_read, e));
                debug!(
                    "Skipped magnitude row at line {}: {}",
                    state.stats.lines_read, e
                );
            }
        }
    }

    /// Close the current event block and route it through the acceptance
    /// filter
    fn finalize_event(&self, state: &mut ParserState) {
        let Some(mut event) = state.current.take() else {
            return;
        };

        // Events with no origins or no magnitudes never reach the filter
        if event.origins.is_empty() || event.magnitudes.is_empty() {
            debug!(
                "Discarding event {}: {} origins, {} magnitudes",
                event.id,
                event.number_origins(),
                event.number_magnitudes()
            );
            state.stats.events_discarded_empty += 1;
            return;
        }

        event.assign_magnitudes_to_origins();

        match assess_event(&event, &self.config) {
            Acceptance::Accepted => {
                if !self.config.store_comments {
                    event.comment.clear();
                }
                state.accepted.push(event);
                state.stats.events_accepted += 1;
            }
            Acceptance::Excluded(_) => {
                state.stats.events_excluded += 1;
            }
            Acceptance::Rejected => {
                state.rejected.push(event);
                state.stats.events_rejected += 1;
            }
        }
    }
}
