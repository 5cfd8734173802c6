//! Catalogue export services
//!
//! Flattens the Event → Origin → Magnitude object graph into storage-ready
//! artifacts: a pair of fixed-schema tables (origins, magnitudes) written as
//! Parquet, a compact per-event summary table, and simple delimited text
//! renderings for quick inspection and GMT plotting.
//!
//! # Architecture
//!
//! - [`tables`] - Fixed-schema polars DataFrames and Parquet writing
//! - [`delimited`] - Quick delimited export and xyzm text export
//!
//! # Example Usage
//!
//! ```rust
//! use isf_processor::Catalogue;
//! use isf_processor::app::services::exporter::tables;
//!
//! # fn example(catalogue: &Catalogue) -> isf_processor::Result<()> {
//! let origins = tables::origins_dataframe(catalogue)?;
//! let magnitudes = tables::magnitudes_dataframe(catalogue)?;
//! println!("{} origin rows, {} magnitude rows", origins.height(), magnitudes.height());
//! # Ok(())
//! # }
//! ```

pub mod delimited;
pub mod tables;

#[cfg(test)]
pub mod tests;

pub use delimited::{quick_export, write_xyzm};
pub use tables::{magnitudes_dataframe, origins_dataframe, summary_dataframe, write_parquet_tables};
