//! Command-line argument definitions for the ISF processor
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Both subcommands share the reader filter flags, which map directly onto
//! [`ReaderConfig`].

use crate::config::{BoundingBox, ReaderConfig};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the ISF catalogue processor
///
/// Curates and harmonizes earthquake catalogues in ISF format, merging
/// origins and magnitudes from multiple reporting agencies into a single
/// unified record.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "isf-processor",
    version,
    about = "Harmonize ISF earthquake catalogues into a unified record",
    long_about = "Parses fixed-width ISF bulletins into an Event/Origin/Magnitude graph, \
                  filters events by agency, magnitude window, bounding box and rejection \
                  keywords, merges secondary catalogues into a primary one, and exports \
                  the result as Parquet tables or delimited text.",
    arg_required_else_help = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the ISF processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single ISF catalogue and export it
    Convert(ConvertArgs),
    /// Merge secondary ISF catalogues into a primary one and export the result
    Merge(MergeArgs),
}

/// Reader filter flags shared by both subcommands
#[derive(Debug, Clone, Parser)]
pub struct FilterArgs {
    /// Restrict origin rows to these agencies (comma-separated list)
    ///
    /// An empty or absent list admits every agency.
    #[arg(
        long = "origin-agencies",
        value_name = "LIST",
        help = "Comma-separated agencies whose origins are kept"
    )]
    pub origin_agencies: Option<AgencyList>,

    /// Restrict magnitude rows to these agencies (comma-separated list)
    #[arg(
        long = "magnitude-agencies",
        value_name = "LIST",
        help = "Comma-separated agencies whose magnitudes are kept"
    )]
    pub magnitude_agencies: Option<AgencyList>,

    /// Use the conventional global-catalogue agency set
    ///
    /// Equivalent to passing ISC,EHB,GCMT,HRVD,GUTE,PAS,NIED to both
    /// agency lists.
    #[arg(
        long = "global-agencies",
        help = "Restrict to the conventional global-catalogue agencies",
        conflicts_with_all = ["origin_agencies", "magnitude_agencies"]
    )]
    pub global_agencies: bool,

    /// Send events whose comments contain any of these keywords to the
    /// rejected sub-catalogue (comma-separated, case-insensitive)
    #[arg(
        long = "reject-keywords",
        value_name = "LIST",
        help = "Comma-separated rejection keywords"
    )]
    pub reject_keywords: Option<String>,

    /// Geographic acceptance region
    ///
    /// Four comma-separated values: lower_lon,lower_lat,upper_lon,upper_lat.
    /// Defaults to the whole globe.
    #[arg(
        long = "bbox",
        value_name = "BBOX",
        help = "Bounding box as lower_lon,lower_lat,upper_lon,upper_lat"
    )]
    pub bounding_box: Option<String>,

    /// Lower edge of the magnitude acceptance window
    #[arg(
        long = "min-magnitude",
        value_name = "MAG",
        help = "Keep only events with a magnitude of at least this value"
    )]
    pub min_magnitude: Option<f64>,

    /// Upper edge of the magnitude acceptance window
    #[arg(
        long = "max-magnitude",
        value_name = "MAG",
        help = "Keep only events with a magnitude of at most this value"
    )]
    pub max_magnitude: Option<f64>,

    /// Discard accepted events' comment text after the keyword check
    #[arg(long = "discard-comments", help = "Do not retain comment text on accepted events")]
    pub discard_comments: bool,
}

impl FilterArgs {
    /// Build and validate the reader configuration these flags describe
    pub fn to_reader_config(&self) -> Result<ReaderConfig> {
        let mut config = ReaderConfig::default();

        if self.global_agencies {
            config = config.with_global_agencies();
        }
        if let Some(agencies) = &self.origin_agencies {
            config = config.with_origin_agencies(agencies.agencies.iter().cloned());
        }
        if let Some(agencies) = &self.magnitude_agencies {
            config = config.with_magnitude_agencies(agencies.agencies.iter().cloned());
        }

        if let Some(keywords) = &self.reject_keywords {
            let keywords: Vec<String> = keywords
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            config = config.with_rejection_keywords(keywords);
        }

        if let Some(bbox) = &self.bounding_box {
            config = config.with_bounding_box(parse_bounding_box(bbox)?);
        }

        let lower = self.min_magnitude.unwrap_or(f64::NEG_INFINITY);
        let upper = self.max_magnitude.unwrap_or(f64::INFINITY);
        config = config.with_magnitude_bounds(lower, upper);

        if self.discard_comments {
            config = config.without_comments();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a bounding box string of four comma-separated edges
pub fn parse_bounding_box(text: &str) -> Result<BoundingBox> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 4 {
        return Err(Error::configuration(
            "Bounding box must be in format: lower_lon,lower_lat,upper_lon,upper_lat".to_string(),
        ));
    }

    let mut edges = [0.0f64; 4];
    for (index, part) in parts.iter().enumerate() {
        edges[index] = part.trim().parse().map_err(|_| {
            Error::configuration(format!("Invalid bounding box value: {}", part))
        })?;
    }

    Ok(BoundingBox::new(edges[0], edges[1], edges[2], edges[3]))
}

/// Arguments for the convert command (single-catalogue processing)
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input ISF catalogue file
    #[arg(value_name = "FILE", help = "Input ISF catalogue file")]
    pub input: PathBuf,

    /// Catalogue identifier
    ///
    /// Defaults to the input file stem.
    #[arg(long = "id", value_name = "ID", help = "Catalogue identifier")]
    pub catalogue_id: Option<String>,

    /// Catalogue display name
    ///
    /// Defaults to the identifier.
    #[arg(long = "name", value_name = "NAME", help = "Catalogue display name")]
    pub catalogue_name: Option<String>,

    /// Output directory for exported files
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "./output",
        help = "Output directory for exported files"
    )]
    pub output_path: PathBuf,

    /// Export format
    #[arg(
        long = "format",
        value_enum,
        default_value = "parquet",
        help = "Export format"
    )]
    pub export_format: ExportFormat,

    /// Field delimiter for the csv export format
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        help = "Field delimiter for csv export"
    )]
    pub delimiter: char,

    /// Shared reader filter flags
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the merge command (multi-catalogue harmonization)
#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
    /// Primary ISF catalogue file receiving the merge
    #[arg(value_name = "PRIMARY", help = "Primary ISF catalogue file")]
    pub primary: PathBuf,

    /// Secondary ISF catalogue files, merged in the given order
    #[arg(
        short = 's',
        long = "secondary",
        value_name = "FILE",
        help = "Secondary ISF catalogue file (repeatable)"
    )]
    pub secondary: Vec<PathBuf>,

    /// Directory scanned recursively for secondary `.isf` files
    #[arg(
        long = "secondary-dir",
        value_name = "PATH",
        help = "Directory scanned recursively for secondary .isf files"
    )]
    pub secondary_dir: Option<PathBuf>,

    /// Primary catalogue identifier (defaults to the file stem)
    #[arg(long = "id", value_name = "ID", help = "Primary catalogue identifier")]
    pub catalogue_id: Option<String>,

    /// Output directory for exported files
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "./output",
        help = "Output directory for exported files"
    )]
    pub output_path: PathBuf,

    /// Export format
    #[arg(
        long = "format",
        value_enum,
        default_value = "parquet",
        help = "Export format"
    )]
    pub export_format: ExportFormat,

    /// Field delimiter for the csv export format
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        help = "Field delimiter for csv export"
    )]
    pub delimiter: char,

    /// Number of catalogue files parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of catalogue files parsed concurrently (defaults to CPU count)"
    )]
    pub workers: Option<usize>,

    /// Shared reader filter flags
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Fixed-schema origin and magnitude tables as Parquet
    Parquet,
    /// Quick delimited text export, one row per origin
    Csv,
    /// Longitude/latitude/depth/magnitude text for GMT
    Xyzm,
}

/// Wrapper for parsing comma-separated agency lists
#[derive(Debug, Clone)]
pub struct AgencyList {
    pub agencies: Vec<String>,
}

impl FromStr for AgencyList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let agencies: Vec<String> = s
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        if agencies.is_empty() {
            return Err(Error::configuration(
                "Agency list cannot be empty".to_string(),
            ));
        }

        Ok(AgencyList { agencies })
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input.display()
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(
                "Delimiter must be a single ASCII character".to_string(),
            ));
        }
        self.filters.to_reader_config().map(|_| ())
    }

    /// Catalogue identifier, defaulting to the input file stem
    pub fn resolved_id(&self) -> String {
        match &self.catalogue_id {
            Some(id) => id.clone(),
            None => file_stem_id(&self.input),
        }
    }

    /// Catalogue display name, defaulting to the identifier
    pub fn resolved_name(&self) -> String {
        self.catalogue_name
            .clone()
            .unwrap_or_else(|| self.resolved_id())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Check if we should show progress output (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl MergeArgs {
    /// Validate the merge command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.primary.exists() {
            return Err(Error::configuration(format!(
                "Primary catalogue does not exist: {}",
                self.primary.display()
            )));
        }
        for path in &self.secondary {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Secondary catalogue does not exist: {}",
                    path.display()
                )));
            }
        }
        if let Some(dir) = &self.secondary_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Secondary directory is not a directory: {}",
                    dir.display()
                )));
            }
        }
        if self.secondary.is_empty() && self.secondary_dir.is_none() {
            return Err(Error::configuration(
                "Merge requires at least one secondary catalogue (--secondary or --secondary-dir)"
                    .to_string(),
            ));
        }
        if let Some(workers) = self.workers {
            if workers == 0 || workers > 100 {
                return Err(Error::configuration(
                    "Number of workers must be between 1 and 100".to_string(),
                ));
            }
        }
        self.filters.to_reader_config().map(|_| ())
    }

    /// Primary catalogue identifier, defaulting to the file stem
    pub fn resolved_id(&self) -> String {
        match &self.catalogue_id {
            Some(id) => id.clone(),
            None => file_stem_id(&self.primary),
        }
    }

    /// Number of concurrent parse workers, defaulting to the CPU count
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Check if we should show progress output (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn file_stem_id(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalogue".to_string())
}

fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_filters() -> FilterArgs {
        FilterArgs {
            origin_agencies: None,
            magnitude_agencies: None,
            global_agencies: false,
            reject_keywords: None,
            bounding_box: None,
            min_magnitude: None,
            max_magnitude: None,
            discard_comments: false,
        }
    }

    #[test]
    fn test_agency_list_parsing() {
        let result = AgencyList::from_str("ISC,GCMT , EHB").unwrap();
        assert_eq!(result.agencies, vec!["ISC", "GCMT", "EHB"]);

        assert!(AgencyList::from_str("").is_err());
        assert!(AgencyList::from_str(",,,").is_err());
    }

    #[test]
    fn test_parse_bounding_box() {
        let bbox = parse_bounding_box("-10.0, 30.0, 40.0, 50.0").unwrap();
        assert_eq!(bbox.lower_lon, -10.0);
        assert_eq!(bbox.upper_lat, 50.0);

        assert!(parse_bounding_box("1,2,3").is_err());
        assert!(parse_bounding_box("a,b,c,d").is_err());
    }

    #[test]
    fn test_filter_args_to_reader_config() {
        let mut filters = default_filters();
        filters.global_agencies = true;
        filters.reject_keywords = Some("explosion, blast".to_string());
        filters.min_magnitude = Some(4.0);

        let config = filters.to_reader_config().unwrap();
        assert!(!config.selected_origin_agencies.is_empty());
        assert_eq!(config.rejection_keywords, vec!["explosion", "blast"]);
        assert_eq!(config.lower_magnitude, 4.0);
        assert_eq!(config.upper_magnitude, f64::INFINITY);
        assert!(config.store_comments);
    }

    #[test]
    fn test_filter_args_inverted_bounds_rejected() {
        let mut filters = default_filters();
        filters.min_magnitude = Some(7.0);
        filters.max_magnitude = Some(5.0);
        assert!(filters.to_reader_config().is_err());
    }

    #[test]
    fn test_convert_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("catalogue.isf");
        std::fs::write(&input, "STOP\n").unwrap();

        let args = ConvertArgs {
            input: input.clone(),
            catalogue_id: None,
            catalogue_name: None,
            output_path: temp_dir.path().join("out"),
            export_format: ExportFormat::Parquet,
            delimiter: ',',
            filters: default_filters(),
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());
        assert_eq!(args.resolved_id(), "catalogue");
        assert_eq!(args.resolved_name(), "catalogue");

        let mut missing = args.clone();
        missing.input = temp_dir.path().join("nope.isf");
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_merge_args_require_a_secondary() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("primary.isf");
        std::fs::write(&primary, "STOP\n").unwrap();

        let args = MergeArgs {
            primary,
            secondary: vec![],
            secondary_dir: None,
            catalogue_id: None,
            output_path: temp_dir.path().join("out"),
            export_format: ExportFormat::Parquet,
            delimiter: ',',
            workers: None,
            filters: default_filters(),
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_err());

        let mut with_dir = args.clone();
        with_dir.secondary_dir = Some(temp_dir.path().to_path_buf());
        assert!(with_dir.validate().is_ok());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(false, 0), "warn");
        assert_eq!(log_level(false, 1), "info");
        assert_eq!(log_level(false, 2), "debug");
        assert_eq!(log_level(false, 5), "trace");
        assert_eq!(log_level(true, 0), "error");
    }
}
