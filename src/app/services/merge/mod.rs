//! Catalogue merge engine
//!
//! Combines two already-parsed catalogues by event identifier, reconciling
//! origins and deduplicating magnitudes via tolerance-based equality. The
//! merge is a refinement of the primary catalogue: secondary events whose
//! identifier does not exist in the primary are not added.
//!
//! # Architecture
//!
//! - [`engine`] - Merge orchestration and the per-origin magnitude rules
//! - [`stats`] - Merge statistics
//!
//! # Example Usage
//!
//! ```rust
//! use isf_processor::Catalogue;
//! use isf_processor::app::services::merge::merge_catalogues;
//!
//! # fn example(mut primary: Catalogue, secondary: Catalogue) -> isf_processor::Result<()> {
//! let stats = merge_catalogues(&mut primary, secondary, None)?;
//! println!("Merge summary: {}", stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use engine::merge_catalogues;
pub use stats::MergeStats;
