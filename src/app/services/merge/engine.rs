//! Merge logic for combining parsed catalogues
//!
//! Events are matched by exact identifier equality. For a matched event,
//! secondary origins either reconcile into an existing origin of the same
//! identifier (magnitude-level merge) or are appended wholesale with their
//! magnitudes attached. Magnitude deduplication uses the
//! (origin, author, scale) identity triple; key-equal magnitudes whose
//! values disagree beyond tolerance surface a fatal integrity error.

use std::collections::HashMap;

use indicatif::ProgressBar;
use tracing::{debug, info};

use super::stats::MergeStats;
use crate::Result;
use crate::app::models::{Catalogue, Event, Magnitude, Origin};

/// Merge a secondary catalogue into a primary one
///
/// Secondary events whose identifier exists in the primary are merged into
/// the corresponding primary event; all others are dropped. The merge
/// enriches existing events, it is not a union of catalogues.
///
/// # Arguments
///
/// * `primary` - Catalogue receiving the merge
/// * `secondary` - Catalogue consumed by the merge
/// * `progress_bar` - Optional progress bar, advanced per secondary event
///
/// # Returns
///
/// Merge statistics, or the fatal magnitude integrity error.
pub fn merge_catalogues(
    primary: &mut Catalogue,
    secondary: Catalogue,
    progress_bar: Option<&ProgressBar>,
) -> Result<MergeStats> {
    let mut stats = MergeStats::new();

    // Event identifiers are unique catalogue-wide, so an index by id is safe
    let positions: HashMap<String, usize> = primary
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| (event.id.clone(), index))
        .collect();

    let secondary_id = secondary.id;
    for event in secondary.events {
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        match positions.get(&event.id) {
            Some(&index) => {
                debug!("Merging event {} from {}", event.id, secondary_id);
                merge_event_origins(&mut primary.events[index], event.origins, &mut stats)?;
                stats.events_matched += 1;
            }
            None => {
                debug!(
                    "Event {} from {} has no counterpart in {}, dropped",
                    event.id, secondary_id, primary.id
                );
                stats.events_unmatched += 1;
            }
        }
    }

    info!(
        "Merged {} into {}: {}",
        secondary_id,
        primary.id,
        stats.summary()
    );
    Ok(stats)
}

/// Merge a set of secondary origins into a primary event
fn merge_event_origins(
    event: &mut Event,
    origins: Vec<Origin>,
    stats: &mut MergeStats,
) -> Result<()> {
    for origin in origins {
        match event.origins.iter_mut().find(|o| o.id == origin.id) {
            Some(existing) => {
                merge_origin_magnitudes(existing, origin.magnitudes, stats)?;
                stats.origins_merged += 1;
            }
            None => {
                // New solution for the event: adopt it with its magnitudes
                stats.origins_appended += 1;
                event.origins.push(origin);
            }
        }
    }
    Ok(())
}

/// Merge incoming magnitudes into an origin's magnitude list
///
/// An origin with no magnitudes adopts the incoming list wholesale.
/// Otherwise each incoming magnitude is compared against every existing one
/// so that a key-equal pair with conflicting values is always detected;
/// key-equal agreeing magnitudes are dropped as duplicates and the rest are
/// appended.
fn merge_origin_magnitudes(
    origin: &mut Origin,
    incoming: Vec<Magnitude>,
    stats: &mut MergeStats,
) -> Result<()> {
    if origin.magnitudes.is_empty() {
        stats.magnitudes_appended += incoming.len();
        origin.magnitudes = incoming;
        return Ok(());
    }

    for magnitude in incoming {
        let mut is_duplicate = false;
        for existing in &origin.magnitudes {
            if existing.compare(&magnitude)? {
                is_duplicate = true;
            }
        }
        if is_duplicate {
            stats.magnitudes_deduplicated += 1;
        } else {
            origin.magnitudes.push(magnitude);
            stats.magnitudes_appended += 1;
        }
    }
    Ok(())
}
