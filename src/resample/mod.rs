//! Resampling of profile sequences onto a uniform height grid
//!
//! Each profile has its own layer heights, so profiles cannot be stacked
//! side by side directly. The resampler fixes a common height axis, samples
//! every profile's layers onto it and stacks the results as grid columns.
//!
//! ## Architecture
//!
//! - [`grid`] - Time filtering, grid assembly and the [`GridResampler`] entry point
//! - [`axis`] - Height extent, outward rounding and the evenly spaced axis
//! - [`interpolate`] - Nearest and linear interpolation without extrapolation
//! - [`grain_type`] - Primary grain class extraction for display
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snowgrid::pro_parser::read_pro;
//! use snowgrid::resample::GridResampler;
//!
//! # fn example() -> snowgrid::Result<()> {
//! let profiles = read_pro("sample.pro", Some("density"))?;
//! let grid = GridResampler::default().create_grid(&profiles, "density", None, None)?;
//! println!("{} x {}", grid.rows(), grid.columns());
//! # Ok(())
//! # }
//! ```

pub mod axis;
pub mod grain_type;
pub mod grid;
pub mod interpolate;

#[cfg(test)]
pub mod tests;

pub use axis::{HeightWindow, RoundDirection, height_extent, linspace, round_to};
pub use grain_type::{GrainClass, leading_digit, transform_grain_type_grid};
pub use grid::{GridResampler, TimeWindow, create_grid};
pub use interpolate::{interpolate, interpolate_linear, interpolate_nearest};
