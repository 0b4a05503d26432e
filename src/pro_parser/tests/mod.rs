//! Test utilities for .PRO parser testing
//!
//! Shared fixtures and helpers used across the parser test modules.

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use tempfile::NamedTempFile;


/// Header block of a .PRO file, as the model writes it
pub fn pro_header() -> String {
    r#"[STATION_PARAMETERS]
StationName= Test Site
Latitude= 74.7
Longitude= -95.0
Altitude= 0

[HEADER]
0500,Date
0501,nElems,height [> 0: top, < 0: bottom of elem.] (cm)
0502,nElems,element density (kg m-3)
0503,nElems,element temperature (degC)
0513,nElems,grain type (Swiss Code F1F2F3)
0535,nElems,optical equivalent grain size (mm)

[DATA]"#
        .to_string()
}

/// Three snapshots with density, temperature and grain type
pub fn create_test_pro() -> String {
    format!(
        "{}\n{}",
        pro_header(),
        r#"0500,27.01.2020 00:00:00
0501,4,400,410,425,450
0502,4,917,300,250,120
0503,4,-5.0,-8.5,-12.0,-15.5
0513,5,880,772,591,220,0
0535,4,1.0,0.5,0.4,0.2
0500,28.01.2020 00:00:00
0501,5,400,410,425,450,455
0502,5,917,310,260,150,90
0503,5,-4.0,-7.0,-11.0,-14.0,-16.0
0513,6,880,772,591,220,110,0
0535,5,1.0,0.5,0.4,0.3,0.1
0500,29.01.2020 00:00:00
0501,3,400,420,440
0502,3,917,320,200
0503,3,-3.5,-6.0,-9.0
0513,4,880,772,220,0
0535,3,1.0,0.6,0.3"#
    )
}

/// Minimal single-snapshot file: heights 0,10,20 and densities 100,200,300
pub fn create_minimal_pro() -> String {
    r#"0500,Date
0501,nElems,height [> 0: top, < 0: bottom of elem.] (cm)
0502,nElems,element density (kg m-3)
0500,1,27.01.2020 00:00:00
0501,3,0,10,20
0502,3,100,200,300"#
        .to_string()
}

pub fn datetime(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}

pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}
