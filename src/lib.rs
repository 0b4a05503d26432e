//! Snowgrid Library
//!
//! Decodes snowpack `.PRO` profile files into per-snapshot layer tables and
//! resamples them onto a uniform height grid for heatmap rendering.
//!
//! This library provides tools for:
//! - Mapping four-digit field codes to variable names and resolving aliases
//! - Parsing `.PRO` files into a time-ordered sequence of profiles
//! - Resampling profiles onto a common height axis without extrapolation
//! - Reading SMET time series written alongside the profiles
//! - Preparing grids for an image backend

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pro_parser;
pub mod registry;
pub mod render;
pub mod resample;
pub mod smet;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{InterpolationMethod, SnowgridConfig};
pub use error::{Result, SnowgridError};
pub use models::{Grid, Profile, ProfileSequence};
pub use pro_parser::{ProParser, read_pro};
pub use registry::{Variable, resolve_variable};
pub use resample::{GridResampler, HeightWindow, TimeWindow, create_grid};
