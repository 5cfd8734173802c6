//! ISF Processor Library
//!
//! A Rust library for curating and harmonizing earthquake catalogues
//! distributed in the International Seismological Format (ISF) into a single
//! unified record.
//!
//! This library provides tools for:
//! - Parsing fixed-width ISF bulletins into an Event/Origin/Magnitude graph
//! - Filtering events by reporting agency, magnitude window, bounding box
//!   and rejection keywords found in free-text annotations
//! - Merging origins and magnitudes from secondary catalogues into a primary
//!   catalogue with tolerance-based deduplication
//! - Flattening catalogues into fixed-schema origin/magnitude tables and
//!   simple delimited exports
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod exporter;
        pub mod isf_parser;
        pub mod merge;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Catalogue, Event, Location, Magnitude, Origin};
pub use config::ReaderConfig;

/// Result type alias for the ISF processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for ISF processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// ISF file-level format error
    #[error("ISF format error in file '{file}': {message}")]
    IsfFormat { file: String, message: String },

    /// A single fixed-width data row could not be built into a record
    ///
    /// Recovered by the block reader: the row is dropped and the message is
    /// recorded in the parse statistics.
    #[error("record parsing error: {message}")]
    RecordParsing { message: String },

    /// Two magnitudes share (origin, author, scale) but disagree in value
    ///
    /// Fatal: indicates corrupt or inconsistent source data and must never
    /// be silently resolved.
    #[error("magnitude integrity error: '{existing}' and '{incoming}' share metadata but differ in value")]
    MagnitudeConflict { existing: String, incoming: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Table rendering error
    #[error("Table rendering error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Delimited export error
    #[error("Delimited export error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create an ISF format error
    pub fn isf_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IsfFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a record parsing error
    pub fn record_parsing(message: impl Into<String>) -> Self {
        Self::RecordParsing {
            message: message.into(),
        }
    }

    /// Create a magnitude integrity error from the two composite identifiers
    pub fn magnitude_conflict(existing: impl Into<String>, incoming: impl Into<String>) -> Self {
        Self::MagnitudeConflict {
            existing: existing.into(),
            incoming: incoming.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
