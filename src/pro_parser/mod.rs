//! Parser for snowpack .PRO profile files
//!
//! A .PRO file interleaves one record line per field code per snapshot, each
//! line starting with a four-digit code. The parser is code driven: lines of
//! fields nobody asked for are simply never bucketed.
//!
//! ## Architecture
//!
//! - [`parser`] - Orchestration: variable resolution, file reading, bucketing
//! - [`buckets`] - Record lines grouped by field code
//! - [`decoder`] - Decoding a single record line
//! - [`snapshot`] - Assembling one profile per time index
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snowgrid::pro_parser::read_pro;
//!
//! # fn example() -> snowgrid::Result<()> {
//! let profiles = read_pro("sample.pro", Some("density"))?;
//! println!("{} snapshots", profiles.len());
//! # Ok(())
//! # }
//! ```

pub mod buckets;
pub mod decoder;
pub mod parser;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use buckets::{FieldBuckets, RecordLine};
pub use decoder::{DecodedLine, decode_line};
pub use parser::{ProParser, read_pro};
pub use snapshot::assemble_snapshot;
pub use stats::{ParseResult, ParseStats};
