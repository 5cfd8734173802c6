//! ISF parser for fixed-width earthquake catalogue bulletins
//!
//! This module reconstructs hierarchical Event → Origin → Magnitude
//! structures from the flat, column-positional text blocks of the
//! International Seismological Format. Malformed fields decode as missing
//! and malformed rows are dropped, so individual bad records never abort a
//! parse.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`reader`] - Block-reader state machine and file handling
//! - [`record_builders`] - Origin / magnitude / event-header row builders
//! - [`field_decoders`] - Lenient fixed-width field decoding
//! - [`acceptance`] - Event acceptance filter (magnitude window, bounding
//!   box, rejection keywords)
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use isf_processor::ReaderConfig;
//! use isf_processor::app::services::isf_parser::IsfReader;
//!
//! # async fn example() -> isf_processor::Result<()> {
//! let reader = IsfReader::new(ReaderConfig::default())?;
//! let result = reader
//!     .parse_file(std::path::Path::new("bulletin.isf"), "ISC", "ISC Bulletin")
//!     .await?;
//!
//! println!(
//!     "Accepted {} of {} events",
//!     result.stats.events_accepted, result.stats.events_parsed
//! );
//! # Ok(())
//! # }
//! ```

pub mod acceptance;
pub mod field_decoders;
pub mod record_builders;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use acceptance::{Acceptance, ExclusionReason, assess_event};
pub use reader::IsfReader;
pub use stats::{ParseResult, ParseStats};
