//! Test utilities for grid resampling
//!
//! Profile sequences are built by parsing the .PRO fixtures of the parser
//! tests, so resampling is always exercised on realistic frames.

use crate::models::ProfileSequence;
use crate::pro_parser::ProParser;
use crate::pro_parser::tests::{create_minimal_pro, create_test_pro};

// Test modules
mod grid_tests;

/// Three snapshots on 27-29 Jan 2020, layer tops between 410 and 455 cm
pub fn test_sequence(variable: &str) -> ProfileSequence {
    ProParser::default()
        .parse_str(&create_test_pro(), Some(variable))
        .unwrap()
}

/// One snapshot, heights [10, 20] and densities [200, 300]
pub fn minimal_sequence() -> ProfileSequence {
    ProParser::default()
        .parse_str(&create_minimal_pro(), Some("density"))
        .unwrap()
}

/// Sequence parsed from `[DATA]` lines carrying only date, height and density
pub fn density_sequence(data: &str) -> ProfileSequence {
    let content = format!(
        "0500,Date\n0501,nElems,height [> 0: top, < 0: bottom of elem.] (cm)\n0502,nElems,element density (kg m-3)\n{}",
        data
    );
    ProParser::default()
        .parse_str(&content, Some("density"))
        .unwrap()
}
