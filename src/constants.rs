//! Format constants for the snowpack .PRO reader
//!
//! This module contains the field-code table, the variable aliases accepted
//! from callers, and the fixed values used when decoding and resampling.

// =============================================================================
// Field Codes
// =============================================================================

/// Field code of the snapshot date line (the smallest code in the registry)
pub const DATE_CODE: &str = "0500";

/// Field code of the layer height line
pub const HEIGHT_CODE: &str = "0501";

/// Field code of the Swiss F1F2F3 grain classification
pub const GRAIN_TYPE_CODE: &str = "0513";

/// Width of the code prefix on every record line
pub const CODE_WIDTH: usize = 4;

/// Registry of every field code and its variable name
pub const FIELD_CODES: &[(&str, &str)] = &[
    ("0500", "Date"),
    ("0501", "height [> 0: top, < 0: bottom of elem.] (cm)"),
    ("0502", "element density (kg m-3)"),
    ("0503", "element temperature (degC)"),
    ("0504", "element ID (1)"),
    ("0506", "liquid water content by volume (%)"),
    ("0508", "dendricity (1)"),
    ("0509", "sphericity (1)"),
    ("0510", "coordination number (1)"),
    ("0511", "bond size (mm)"),
    ("0512", "grain size (mm)"),
    ("0513", "grain type (Swiss Code F1F2F3)"),
    (
        "0514",
        "grain type, grain size (mm), and density (kg m-3) of SH at surface",
    ),
    ("0515", "ice volume fraction (%)"),
    ("0516", "air volume fraction (%)"),
    ("0517", "stress in (kPa)"),
    ("0518", "viscosity (GPa s)"),
    ("0519", "soil volume fraction (%)"),
    ("0520", "temperature gradient (K m-1)"),
    ("0521", "thermal conductivity (W K-1 m-1)"),
    ("0522", "absorbed shortwave radiation (W m-2)"),
    ("0523", "viscous deformation rate (1.e-6 s-1)"),
    ("0531", "deformation rate stability index Sdef"),
    ("0532", "natural stability index Sn38"),
    ("0533", "stability index Sk38"),
    ("0534", "hand hardness either (N) or index steps (1)"),
    ("0535", "optical equivalent grain size (mm)"),
    ("0540", "bulk salinity (g/kg)"),
    ("0541", "brine salinity (g/kg)"),
    ("0601", "snow shear strength (kPa)"),
    ("0602", "grain size difference (mm)"),
    ("0603", "hardness difference (1)"),
    ("0604", "ssi"),
    ("0605", "inverse texture index ITI (Mg m-4)"),
    ("0606", "critical cut length (m)"),
];

/// Codes decoded when the caller does not ask for a single variable
pub const DEFAULT_CODES: &[&str] = &[
    "0502", "0503", "0506", "0512", "0513", "0515", "0516", "0535", "0540", "0541",
];

// =============================================================================
// Variable Aliases
// =============================================================================

/// Short aliases accepted in place of full variable names
pub const VARIABLE_ALIASES: &[(&str, &str)] = &[
    ("density", "element density (kg m-3)"),
    ("temperature", "element temperature (degC)"),
    ("lwc", "liquid water content by volume (%)"),
    ("grain size", "grain size (mm)"),
    ("grain type", "grain type (Swiss Code F1F2F3)"),
    ("ivf", "ice volume fraction (%)"),
    ("avf", "air volume fraction (%)"),
    ("d_opt", "optical equivalent grain size (mm)"),
    ("bulk_sal", "bulk salinity (g/kg)"),
    ("brine_sal", "brine salinity (g/kg)"),
    ("thickness", THICKNESS_COLUMN),
];

// =============================================================================
// Profile Columns
// =============================================================================

/// Derived per-layer thickness column (metres)
pub const THICKNESS_COLUMN: &str = "thickness_m";

/// Per-row snapshot timestamp column
pub const DATES_COLUMN: &str = "dates";

/// Thickness of the reference row, which has no layer below it
pub const THICKNESS_SENTINEL: f64 = -999.0;

/// Centimetres per metre, for converting height differences to thickness
pub const CM_PER_M: f64 = 100.0;

// =============================================================================
// Timestamp Formats
// =============================================================================

/// Date format on `0500` lines, e.g. `27.01.2020 00:00:00`
pub const PRO_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Timestamp format of the first column of SMET data rows
pub const SMET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Missing value marker in SMET files when the header does not declare one
pub const SMET_DEFAULT_NODATA: f64 = -999.0;

// =============================================================================
// Resampling Defaults
// =============================================================================

/// Number of points on the height axis
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// Automatic height bounds are rounded outward to this multiple (cm)
pub const DEFAULT_HEIGHT_ROUNDING_CM: f64 = 5.0;

/// Colorbar anchors written into the first two cells of a grain-type grid
pub const GRAIN_TYPE_ANCHOR_LOW: f64 = 0.05;
pub const GRAIN_TYPE_ANCHOR_HIGH: f64 = 0.95;

/// Default colour scheme for continuous variables
pub const DEFAULT_COLOR_SCHEME: &str = "plasma_r";
