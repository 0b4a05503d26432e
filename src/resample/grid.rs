//! Profile sequence to 2-D grid

use super::axis::{HeightWindow, height_extent, linspace};
use super::grain_type::transform_grain_type_grid;
use super::interpolate::interpolate;
use crate::config::SnowgridConfig;
use crate::error::{Result, SnowgridError};
use crate::models::{Grid, Profile, ProfileSequence};
use crate::registry::{Variable, resolve_variable};
use chrono::NaiveDateTime;
use ndarray::Array2;
use tracing::{debug, info};

/// Open time interval used to select profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Strict on both ends: a profile at exactly `start` or `end` is left out
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start < timestamp && timestamp < self.end
    }
}

/// Resamples profile sequences onto a uniform height axis
#[derive(Debug, Clone, Default)]
pub struct GridResampler {
    config: SnowgridConfig,
}

impl GridResampler {
    pub fn new(config: SnowgridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnowgridConfig {
        &self.config
    }

    /// Build the `[resolution, kept profiles]` grid of one variable.
    ///
    /// The height extent always comes from the whole sequence, before the
    /// time window is applied, so grids of different windows share an axis.
    pub fn create_grid(
        &self,
        profiles: &ProfileSequence,
        variable: &str,
        time_window: Option<TimeWindow>,
        height_window: Option<HeightWindow>,
    ) -> Result<Grid> {
        self.config.validate()?;
        if profiles.is_empty() {
            return Err(SnowgridError::EmptyProfileSequence);
        }
        let variable = resolve_variable(variable)?;

        // An automatic extent may collapse to one height; the axis then
        // repeats it
        let (min_height, max_height) = match height_window {
            Some(window) if window.min >= window.max => {
                return Err(SnowgridError::configuration(format!(
                    "height window is empty: [{}, {}]",
                    window.min, window.max
                )));
            }
            Some(window) => (window.min, window.max),
            None => height_extent(profiles, self.config.height_rounding_cm)?,
        };

        let resolution = self.config.grid_resolution;
        let heights = linspace(min_height, max_height, resolution);

        let kept: Vec<&Profile> = profiles
            .iter()
            .filter(|profile| time_window.is_none_or(|w| w.contains(profile.timestamp())))
            .collect();
        debug!(
            "Keeping {} of {} profiles for {}",
            kept.len(),
            profiles.len(),
            variable
        );

        let mut values = Array2::from_elem((resolution, kept.len()), f64::NAN);
        for (column, profile) in kept.iter().enumerate() {
            let resampled = self.resample_profile(profile, &variable, &heights)?;
            for (row, value) in resampled.into_iter().rev().enumerate() {
                values[[row, column]] = value;
            }
        }

        let grid = Grid {
            values,
            heights,
            min_height,
            max_height,
            timestamps: kept.iter().map(|p| p.timestamp()).collect(),
            variable: variable.name().to_string(),
        };
        info!(
            "Created {}x{} grid for {} over [{}, {}] cm ({:.1}% filled)",
            grid.rows(),
            grid.columns(),
            grid.variable,
            min_height,
            max_height,
            grid.coverage() * 100.0
        );
        Ok(grid)
    }

    /// Grid prepared for display: grain type is reduced to its primary
    /// class, every other variable is returned unchanged.
    pub fn create_display_grid(
        &self,
        profiles: &ProfileSequence,
        variable: &str,
        time_window: Option<TimeWindow>,
        height_window: Option<HeightWindow>,
    ) -> Result<Grid> {
        let grid = self.create_grid(profiles, variable, time_window, height_window)?;
        if resolve_variable(variable)?.is_grain_type() {
            Ok(transform_grain_type_grid(&grid))
        } else {
            Ok(grid)
        }
    }

    fn resample_profile(
        &self,
        profile: &Profile,
        variable: &Variable,
        axis: &[f64],
    ) -> Result<Vec<f64>> {
        let layer_heights = profile.heights()?;
        let layer_values = profile.values(variable.name())?;
        Ok(interpolate(
            self.config.interpolation,
            &layer_heights,
            &layer_values,
            axis,
        ))
    }
}

/// [`GridResampler::create_grid`] with an explicit configuration
pub fn create_grid(
    profiles: &ProfileSequence,
    variable: &str,
    time_window: Option<TimeWindow>,
    height_window: Option<HeightWindow>,
    config: &SnowgridConfig,
) -> Result<Grid> {
    GridResampler::new(config.clone()).create_grid(profiles, variable, time_window, height_window)
}
