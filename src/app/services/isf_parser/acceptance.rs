//! Event acceptance filtering
//!
//! Once a full event block is assembled and its magnitudes are cross-assigned
//! to their origins, this filter decides whether the event enters the main
//! catalogue, is silently excluded, or is diverted to the rejected
//! sub-catalogue. Checks run in a fixed order and short-circuit on the first
//! failure: magnitude window, then bounding box, then rejection keywords.
//! Only the keyword check records the event into the rejected side-channel.

use tracing::debug;

use crate::app::models::Event;
use crate::config::ReaderConfig;

/// Outcome of assessing an assembled event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Event enters the main catalogue
    Accepted,
    /// Event is dropped with no record kept
    Excluded(ExclusionReason),
    /// Event is appended to the rejected sub-catalogue
    Rejected,
}

/// Which silent check an excluded event failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// No magnitude fell inside the configured window
    MagnitudeWindow,
    /// No origin fell inside the configured bounding box
    BoundingBox,
}

/// Assess an assembled event against the reader configuration
///
/// The magnitude and location checks use "any" semantics: a single magnitude
/// inside the window, or a single origin inside the box, is enough. Events
/// with no origins or no magnitudes must be discarded before this filter is
/// consulted.
pub fn assess_event(event: &Event, config: &ReaderConfig) -> Acceptance {
    let magnitude_in_window = event.magnitudes.iter().any(|magnitude| {
        magnitude.value >= config.lower_magnitude && magnitude.value <= config.upper_magnitude
    });
    if !magnitude_in_window {
        debug!(
            "Event {} excluded: no magnitude within [{}, {}]",
            event.id, config.lower_magnitude, config.upper_magnitude
        );
        return Acceptance::Excluded(ExclusionReason::MagnitudeWindow);
    }

    let origin_in_box = event.origins.iter().any(|origin| {
        config
            .bounding_box
            .contains(origin.location.longitude, origin.location.latitude)
    });
    if !origin_in_box {
        debug!("Event {} excluded: no origin within bounding box", event.id);
        return Acceptance::Excluded(ExclusionReason::BoundingBox);
    }

    if !config.rejection_keywords.is_empty() {
        let comment = event.comment.to_lowercase();
        for keyword in &config.rejection_keywords {
            if comment.contains(&keyword.to_lowercase()) {
                debug!("Event {} rejected: comment contains '{}'", event.id, keyword);
                return Acceptance::Rejected;
            }
        }
    }

    Acceptance::Accepted
}
