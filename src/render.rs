//! Boundary between resampled grids and an image backend.
//!
//! Nothing here draws. [`PlotOptions`] collects the presentation choices,
//! [`prepare_plot`] turns a raw grid into what a backend should show, and a
//! backend implements [`GridRenderer`].

use crate::constants::DEFAULT_COLOR_SCHEME;
use crate::error::{Result, SnowgridError};
use crate::models::Grid;
use crate::registry::resolve_variable;
use crate::resample::{GrainClass, TimeWindow, transform_grain_type_grid};
use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::debug;

/// Colours of the nine grain classes, in class order
pub const GRAIN_TYPE_COLORS: [&str; 9] = [
    "lime", "green", "yellow", "orange", "blue", "gray", "red", "cyan", "black",
];

/// Colour map of a plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorScheme {
    /// Continuous map known to the backend, e.g. `plasma_r` or `Blues`
    Named(String),
    /// Nine discrete colours, one per grain class
    GrainType,
}

impl ColorScheme {
    /// Grain type always gets the discrete scheme, whatever was requested
    pub fn for_variable(variable: &str, requested: &ColorScheme) -> ColorScheme {
        match resolve_variable(variable) {
            Ok(v) if v.is_grain_type() => ColorScheme::GrainType,
            _ => requested.clone(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Named(DEFAULT_COLOR_SCHEME.to_string())
    }
}

/// Panel of an existing multi-plot figure to draw into.
///
/// Panels are numbered row by row from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotTarget {
    pub rows: usize,
    pub columns: usize,
    pub panel: usize,
}

impl PlotTarget {
    pub fn new(rows: usize, columns: usize, panel: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || panel >= rows * columns {
            return Err(SnowgridError::configuration(format!(
                "panel {} does not exist in a {}x{} layout",
                panel, rows, columns
            )));
        }
        Ok(Self {
            rows,
            columns,
            panel,
        })
    }

    /// Row and column of the panel
    pub fn position(&self) -> (usize, usize) {
        (self.panel / self.columns, self.panel % self.columns)
    }
}

/// Presentation settings of one plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotOptions {
    pub color_scheme: ColorScheme,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// Where to save the image; `None` shows it only
    pub output: Option<PathBuf>,
    /// Subtracted from the height labels, e.g. 400 to put sea level at 0
    pub y_shift: f64,
    /// X range of the plot; defaults to the first and last grid column
    pub time_window: Option<TimeWindow>,
    /// Draw into this panel instead of a new figure
    pub target: Option<PlotTarget>,
}

impl PlotOptions {
    pub fn with_color_scheme(mut self, name: impl Into<String>) -> Self {
        self.color_scheme = ColorScheme::Named(name.into());
        self
    }

    pub fn with_value_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = Some(vmin);
        self.vmax = Some(vmax);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_y_shift(mut self, y_shift: f64) -> Self {
        self.y_shift = y_shift;
        self
    }

    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    pub fn with_target(mut self, target: PlotTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Display extent of `grid`. `None` when there is no time range to show.
    pub fn extent(&self, grid: &Grid) -> Option<Extent> {
        let (start, end) = match self.time_window {
            Some(window) => (window.start, window.end),
            None => (*grid.timestamps.first()?, *grid.timestamps.last()?),
        };

        Some(Extent {
            start,
            end,
            bottom: grid.min_height - self.y_shift,
            top: grid.max_height - self.y_shift,
        })
    }
}

/// Axis ranges of the image: time along x, shifted height along y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub bottom: f64,
    pub top: f64,
}

/// Everything a backend needs to draw one grid
#[derive(Debug, Clone)]
pub struct PreparedPlot {
    pub grid: Grid,
    pub extent: Option<Extent>,
    pub color_scheme: ColorScheme,
    /// Colour bar title, or the class labels for grain type
    pub colorbar_labels: Vec<String>,
    pub target: Option<PlotTarget>,
}

/// Apply the presentation rules to a raw grid
pub fn prepare_plot(grid: &Grid, options: &PlotOptions) -> PreparedPlot {
    let color_scheme = ColorScheme::for_variable(&grid.variable, &options.color_scheme);

    let (grid, colorbar_labels) = match color_scheme {
        ColorScheme::GrainType => (
            transform_grain_type_grid(grid),
            GrainClass::ALL
                .iter()
                .map(|class| class.label().to_string())
                .collect(),
        ),
        ColorScheme::Named(_) => (grid.clone(), vec![grid.variable.clone()]),
    };

    let extent = options.extent(&grid);
    debug!("Prepared plot of {} with {:?}", grid.variable, color_scheme);

    PreparedPlot {
        grid,
        extent,
        color_scheme,
        colorbar_labels,
        target: options.target,
    }
}

/// Image backend. With [`PlotOptions::target`] set, the grid is drawn into
/// that panel of the backend's current figure.
pub trait GridRenderer {
    fn render(&mut self, grid: &Grid, options: &PlotOptions) -> Result<()>;
}
