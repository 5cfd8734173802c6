//! Reader configuration and validation.
//!
//! Provides the configuration consumed by the ISF block reader: agency
//! allow-lists, rejection keywords, the geographic bounding box and the
//! magnitude window. All settings are validated eagerly at reader
//! construction so a bad configuration fails before any parsing begins.

use crate::constants::GLOBAL_SELECTED_AGENCIES;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Geographic bounding box in decimal degrees
///
/// Default spans the whole globe, which makes the location check a no-op
/// and expresses the simpler magnitude+keyword filtering profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western edge (decimal degrees)
    pub lower_lon: f64,
    /// Southern edge (decimal degrees)
    pub lower_lat: f64,
    /// Eastern edge (decimal degrees)
    pub upper_lon: f64,
    /// Northern edge (decimal degrees)
    pub upper_lat: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lower_lon: -180.0,
            lower_lat: -90.0,
            upper_lon: 180.0,
            upper_lat: 90.0,
        }
    }
}

impl BoundingBox {
    /// Create a bounding box from its four edges
    pub fn new(lower_lon: f64, lower_lat: f64, upper_lon: f64, upper_lat: f64) -> Self {
        Self {
            lower_lon,
            lower_lat,
            upper_lon,
            upper_lat,
        }
    }

    /// Check whether a coordinate pair falls inside the box (edges inclusive)
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude >= self.lower_lon
            && longitude <= self.upper_lon
            && latitude >= self.lower_lat
            && latitude <= self.upper_lat
    }

    /// Validate box shape and coordinate ranges
    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.lower_lon) || !(-180.0..=180.0).contains(&self.upper_lon)
        {
            return Err(Error::configuration(format!(
                "Bounding box longitudes must be between -180 and 180 degrees, got [{}, {}]",
                self.lower_lon, self.upper_lon
            )));
        }

        if !(-90.0..=90.0).contains(&self.lower_lat) || !(-90.0..=90.0).contains(&self.upper_lat) {
            return Err(Error::configuration(format!(
                "Bounding box latitudes must be between -90 and 90 degrees, got [{}, {}]",
                self.lower_lat, self.upper_lat
            )));
        }

        if self.lower_lon >= self.upper_lon {
            return Err(Error::configuration(
                "Bounding box lower longitude must be less than upper longitude".to_string(),
            ));
        }

        if self.lower_lat >= self.upper_lat {
            return Err(Error::configuration(
                "Bounding box lower latitude must be less than upper latitude".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the ISF block reader
///
/// Empty allow-lists admit every agency. The magnitude window defaults to
/// unbounded and the bounding box to the whole globe, so a default
/// configuration accepts every well-formed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Agencies whose origin solutions are retained (empty = all)
    pub selected_origin_agencies: Vec<String>,

    /// Agencies whose magnitude solutions are retained (empty = all)
    pub selected_magnitude_agencies: Vec<String>,

    /// Keywords that send an event to the rejected sub-catalogue when found
    /// in its accumulated comment text (case-insensitive substring match)
    pub rejection_keywords: Vec<String>,

    /// Geographic acceptance region
    pub bounding_box: BoundingBox,

    /// Lower edge of the magnitude acceptance window
    pub lower_magnitude: f64,

    /// Upper edge of the magnitude acceptance window
    pub upper_magnitude: f64,

    /// Retain the accumulated comment text on accepted events
    pub store_comments: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            selected_origin_agencies: Vec::new(),
            selected_magnitude_agencies: Vec::new(),
            rejection_keywords: Vec::new(),
            bounding_box: BoundingBox::default(),
            lower_magnitude: f64::NEG_INFINITY,
            upper_magnitude: f64::INFINITY,
            store_comments: true,
        }
    }
}

impl ReaderConfig {
    /// Restrict origin rows to the given agencies
    pub fn with_origin_agencies<I, S>(mut self, agencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_origin_agencies = agencies.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict magnitude rows to the given agencies
    pub fn with_magnitude_agencies<I, S>(mut self, agencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_magnitude_agencies = agencies.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict both origin and magnitude rows to the conventional
    /// global-catalogue agency set
    pub fn with_global_agencies(self) -> Self {
        self.with_origin_agencies(GLOBAL_SELECTED_AGENCIES.iter().copied())
            .with_magnitude_agencies(GLOBAL_SELECTED_AGENCIES.iter().copied())
    }

    /// Configure rejection keywords
    pub fn with_rejection_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rejection_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Configure the geographic acceptance region
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Configure the magnitude acceptance window
    pub fn with_magnitude_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_magnitude = lower;
        self.upper_magnitude = upper;
        self
    }

    /// Discard comment text on accepted events after the keyword check
    pub fn without_comments(mut self) -> Self {
        self.store_comments = false;
        self
    }

    /// Validate the configuration, failing fast before any parsing begins
    pub fn validate(&self) -> Result<()> {
        self.bounding_box.validate()?;

        if self.lower_magnitude.is_nan() || self.upper_magnitude.is_nan() {
            return Err(Error::configuration(
                "Magnitude bounds must not be NaN".to_string(),
            ));
        }

        if self.lower_magnitude > self.upper_magnitude {
            return Err(Error::configuration(format!(
                "Magnitude lower bound {} exceeds upper bound {}",
                self.lower_magnitude, self.upper_magnitude
            )));
        }

        for agency in self
            .selected_origin_agencies
            .iter()
            .chain(&self.selected_magnitude_agencies)
        {
            if agency.trim().is_empty() {
                return Err(Error::configuration(
                    "Agency allow-list entries cannot be blank".to_string(),
                ));
            }
        }

        for keyword in &self.rejection_keywords {
            if keyword.trim().is_empty() {
                return Err(Error::configuration(
                    "Rejection keywords cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Check whether an origin author passes the allow-list
    pub fn accepts_origin_agency(&self, author: &str) -> bool {
        self.selected_origin_agencies.is_empty()
            || self.selected_origin_agencies.iter().any(|a| a == author)
    }

    /// Check whether a magnitude author passes the allow-list
    pub fn accepts_magnitude_agency(&self, author: &str) -> bool {
        self.selected_magnitude_agencies.is_empty()
            || self.selected_magnitude_agencies.iter().any(|a| a == author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ReaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_magnitude_bounds_rejected() {
        let config = ReaderConfig::default().with_magnitude_bounds(7.0, 5.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_bounding_box_rejected() {
        // Inverted longitudes
        let config =
            ReaderConfig::default().with_bounding_box(BoundingBox::new(30.0, -10.0, 20.0, 10.0));
        assert!(config.validate().is_err());

        // Out-of-range latitude
        let config =
            ReaderConfig::default().with_bounding_box(BoundingBox::new(-10.0, -95.0, 10.0, 10.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_agency_rejected() {
        let config = ReaderConfig::default().with_magnitude_agencies(["ISC", "  "]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_allow_list_admits_all() {
        let config = ReaderConfig::default();
        assert!(config.accepts_origin_agency("ANYBODY"));
        assert!(config.accepts_magnitude_agency("ANYBODY"));

        let config = config.with_global_agencies();
        assert!(config.accepts_origin_agency("ISC"));
        assert!(!config.accepts_origin_agency("ANYBODY"));
    }

    #[test]
    fn test_bounding_box_containment() {
        let bbox = BoundingBox::new(-10.0, 30.0, 40.0, 50.0);
        assert!(bbox.contains(0.0, 40.0));
        assert!(bbox.contains(-10.0, 30.0));
        assert!(!bbox.contains(-10.1, 40.0));
        assert!(!bbox.contains(0.0, 51.0));
    }
}
