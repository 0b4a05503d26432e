//! Command-line argument definitions for snowgrid
//!
//! Defines the CLI using the clap derive API.

use crate::config::{InterpolationMethod, SnowgridConfig};
use crate::constants::SMET_DATETIME_FORMAT;
use crate::error::{Result, SnowgridError};
use crate::resample::{HeightWindow, TimeWindow};
use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect snowpack .PRO profiles and their resampled grids
#[derive(Debug, Clone, Parser)]
#[command(
    name = "snowgrid",
    version,
    about = "Decode snowpack .PRO profiles and resample them onto a height grid"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a .PRO file, grid one variable and print a summary
    Inspect(InspectArgs),
    /// List the field code registry and variable aliases
    Codes(CodesArgs),
    /// Summarise one field of a SMET time series file
    Smet(SmetArgs),
}

/// Logging flags shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct Verbosity {
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Only log errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Verbosity {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct InspectArgs {
    /// .PRO file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Variable alias or full field name
    #[arg(long, default_value = "density")]
    pub variable: String,

    /// Lower height bound (cm), used together with --ymax
    #[arg(long, requires = "ymax", allow_negative_numbers = true)]
    pub ymin: Option<f64>,

    /// Upper height bound (cm), used together with --ymin
    #[arg(long, requires = "ymin", allow_negative_numbers = true)]
    pub ymax: Option<f64>,

    /// Keep profiles after this time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, requires = "xmax", value_parser = parse_timestamp)]
    pub xmin: Option<NaiveDateTime>,

    /// Keep profiles before this time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, requires = "xmin", value_parser = parse_timestamp)]
    pub xmax: Option<NaiveDateTime>,

    /// Number of points on the height axis
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Interpolate linearly instead of taking the nearest layer
    #[arg(long)]
    pub linear: bool,

    /// Subtract this from displayed heights (cm)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub y_shift: f64,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl InspectArgs {
    /// Configuration implied by the flags
    pub fn config(&self) -> SnowgridConfig {
        let mut config = SnowgridConfig::default();
        if let Some(resolution) = self.resolution {
            config = config.with_resolution(resolution);
        }
        if self.linear {
            config = config.with_interpolation(InterpolationMethod::Linear);
        }
        config
    }

    pub fn height_window(&self) -> Result<Option<HeightWindow>> {
        match (self.ymin, self.ymax) {
            (Some(min), Some(max)) => HeightWindow::new(min, max).map(Some),
            _ => Ok(None),
        }
    }

    pub fn time_window(&self) -> Result<Option<TimeWindow>> {
        match (self.xmin, self.xmax) {
            (Some(start), Some(end)) if start >= end => Err(SnowgridError::configuration(
                format!("time window is empty: {} to {}", start, end),
            )),
            (Some(start), Some(end)) => Ok(Some(TimeWindow::new(start, end))),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CodesArgs {
    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SmetArgs {
    /// SMET file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field name from the header's `fields` line
    #[arg(long)]
    pub field: String,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl Commands {
    pub fn verbosity(&self) -> &Verbosity {
        match self {
            Commands::Inspect(args) => &args.verbosity,
            Commands::Codes(args) => &args.verbosity,
            Commands::Smet(args) => &args.verbosity,
        }
    }
}

fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, SMET_DATETIME_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {e}"))
}
