//! Command implementations for the ISF processor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface.

use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;
use futures::{StreamExt, TryStreamExt, stream};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::models::Catalogue;
use crate::app::services::exporter::{quick_export, write_parquet_tables, write_xyzm};
use crate::app::services::isf_parser::{IsfReader, ParseResult};
use crate::app::services::merge::{MergeStats, merge_catalogues};
use crate::cli::args::{Args, Commands, ConvertArgs, ExportFormat, MergeArgs};
use crate::{Error, Result};

/// Processing statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of catalogue files parsed
    pub catalogues_parsed: usize,
    /// Events accepted into the main catalogue
    pub events_accepted: usize,
    /// Events diverted to the rejected sub-catalogue
    pub events_rejected: usize,
    /// Merge counters (zero for the convert command)
    pub merge: MergeStats,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Main command runner for the ISF processor
pub async fn run(args: Args) -> Result<ProcessingStats> {
    match args.command {
        Commands::Convert(convert_args) => run_convert(convert_args).await,
        Commands::Merge(merge_args) => run_merge(merge_args).await,
    }
}

/// Parse a single catalogue, report on it and export it
async fn run_convert(args: ConvertArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());

    info!("Starting ISF convert");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let reader = IsfReader::new(args.filters.to_reader_config()?)?;

    let identifier = args.resolved_id();
    let name = args.resolved_name();
    let result = reader.parse_file(&args.input, &identifier, &name).await?;

    if !result.stats.produced_events() {
        warn!(
            "No events produced from {}; is it an ISF bulletin?",
            args.input.display()
        );
    }

    let mut stats = ProcessingStats {
        catalogues_parsed: 1,
        events_accepted: result.stats.events_accepted,
        events_rejected: result.stats.events_rejected,
        ..Default::default()
    };

    stats.output_sizes = export_catalogue(
        &result.catalogue,
        &args.output_path,
        args.export_format,
        args.delimiter as u8,
    )?;

    stats.processing_time = start_time.elapsed();
    if args.show_progress() {
        report_outcome(&result, None, &stats);
    }
    Ok(stats)
}

/// Parse a primary and its secondaries, merge in order and export the result
async fn run_merge(args: MergeArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    setup_logging(args.get_log_level());

    info!("Starting ISF merge");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let reader = IsfReader::new(args.filters.to_reader_config()?)?;

    let secondary_paths = collect_secondary_paths(&args)?;
    info!(
        "Merging {} secondary catalogues into {}",
        secondary_paths.len(),
        args.primary.display()
    );

    let identifier = args.resolved_id();
    let mut primary = reader
        .parse_file(&args.primary, &identifier, &identifier)
        .await?;

    // Parse secondaries concurrently but preserve the merge order
    let workers = args.resolved_workers();
    let secondary_results: Vec<ParseResult> = stream::iter(secondary_paths.iter().map(|path| {
        let reader = reader.clone();
        let path = path.clone();
        async move {
            let id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "secondary".to_string());
            reader.parse_file(&path, &id, &id).await
        }
    }))
    .buffered(workers)
    .try_collect()
    .await?;

    let total_secondary_events: usize = secondary_results
        .iter()
        .map(|r| r.catalogue.number_events())
        .sum();
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(total_secondary_events as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Merging catalogues");
        Some(pb)
    } else {
        None
    };

    let mut stats = ProcessingStats {
        catalogues_parsed: 1 + secondary_results.len(),
        ..Default::default()
    };

    for result in secondary_results {
        let merge_stats =
            merge_catalogues(&mut primary.catalogue, result.catalogue, progress_bar.as_ref())?;
        stats.merge.absorb(&merge_stats);
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Merge complete");
    }

    stats.events_accepted = primary.catalogue.number_events();
    stats.events_rejected = primary
        .catalogue
        .rejected
        .as_ref()
        .map_or(0, |r| r.number_events());

    stats.output_sizes = export_catalogue(
        &primary.catalogue,
        &args.output_path,
        args.export_format,
        args.delimiter as u8,
    )?;

    stats.processing_time = start_time.elapsed();
    if args.show_progress() {
        report_outcome(&primary, Some(&stats.merge), &stats);
    }
    Ok(stats)
}

/// Gather secondary catalogue paths from explicit flags and the scan
/// directory, in a deterministic order
fn collect_secondary_paths(args: &MergeArgs) -> Result<Vec<PathBuf>> {
    let mut paths = args.secondary.clone();

    if let Some(dir) = &args.secondary_dir {
        let mut scanned = Vec::new();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            let is_isf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("isf"))
                .unwrap_or(false);
            if is_isf && path != args.primary {
                scanned.push(path);
            }
        }
        scanned.sort();
        paths.extend(scanned);
    }

    if paths.is_empty() {
        return Err(Error::configuration(
            "No secondary catalogues found to merge".to_string(),
        ));
    }
    Ok(paths)
}

/// Export a catalogue (and its rejected companion) in the requested format
fn export_catalogue(
    catalogue: &Catalogue,
    output_dir: &std::path::Path,
    format: ExportFormat,
    delimiter: u8,
) -> Result<Vec<(String, u64)>> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    let mut written = Vec::new();
    let mut record = |path: PathBuf| {
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        written.push((path.display().to_string(), size));
    };

    match format {
        ExportFormat::Parquet => {
            let (origins, magnitudes) = write_parquet_tables(catalogue, output_dir)?;
            record(origins);
            record(magnitudes);
            if let Some(rejected) = &catalogue.rejected {
                let (origins, magnitudes) = write_parquet_tables(rejected, output_dir)?;
                record(origins);
                record(magnitudes);
            }
        }
        ExportFormat::Csv => {
            let path = output_dir.join(format!("{}.csv", catalogue.id));
            quick_export(catalogue, &path, delimiter)?;
            record(path);
            if let Some(rejected) = &catalogue.rejected {
                let path = output_dir.join(format!("{}.csv", rejected.id));
                quick_export(rejected, &path, delimiter)?;
                record(path);
            }
        }
        ExportFormat::Xyzm => {
            let path = output_dir.join(format!("{}.xyzm", catalogue.id));
            write_xyzm(catalogue, &path)?;
            record(path);
        }
    }

    Ok(written)
}

/// Print the human-readable run summary
fn report_outcome(result: &ParseResult, merge: Option<&MergeStats>, stats: &ProcessingStats) {
    println!();
    println!("{}", "ISF processing complete".green().bold());
    println!(
        "  Catalogue {}: {} events accepted, {} rejected",
        result.catalogue.id.cyan(),
        stats.events_accepted,
        stats.events_rejected
    );
    if let Some(merge_stats) = merge {
        println!("  Merge: {}", merge_stats.summary());
    }
    if result.stats.records_skipped > 0 {
        println!(
            "  {} malformed rows skipped during parsing",
            result.stats.records_skipped.to_string().yellow()
        );
    }
    for (name, size) in &stats.output_sizes {
        println!(
            "  Wrote {} ({})",
            name.cyan(),
            ProcessingStats::format_size(*size)
        );
    }
    println!(
        "  Elapsed: {} ({} total output)",
        HumanDuration(stats.processing_time),
        ProcessingStats::format_size(stats.total_output_size())
    );
}

/// Set up structured logging from the CLI verbosity level
fn setup_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // try_init: keep going if a test harness installed a subscriber already
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(ProcessingStats::format_size(512), "512 B");
        assert_eq!(ProcessingStats::format_size(2048), "2.00 KB");
        assert_eq!(ProcessingStats::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_total_output_size() {
        let stats = ProcessingStats {
            output_sizes: vec![("a".to_string(), 100), ("b".to_string(), 150)],
            ..Default::default()
        };
        assert_eq!(stats.total_output_size(), 250);
    }
}
