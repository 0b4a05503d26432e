//! Per-code line buckets
//!
//! Raw record lines grouped by field code, borrowed from the file content
//! and kept in file order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One raw record line with its 1-based position in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLine<'a> {
    pub line_number: usize,
    pub text: &'a str,
}

/// Record lines of the active field codes, keyed by code
#[derive(Debug, Clone)]
pub struct FieldBuckets<'a> {
    source: PathBuf,
    lines: BTreeMap<&'static str, Vec<RecordLine<'a>>>,
}

impl<'a> FieldBuckets<'a> {
    /// Empty buckets for each of `codes`
    pub fn new(source: &Path, codes: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            source: source.to_path_buf(),
            lines: codes.into_iter().map(|code| (code, Vec::new())).collect(),
        }
    }

    /// File the lines were read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Append `line` to the bucket of `code`; returns false when the code is
    /// not active
    pub fn push(&mut self, code: &str, line: RecordLine<'a>) -> bool {
        match self.lines.get_mut(code) {
            Some(bucket) => {
                bucket.push(line);
                true
            }
            None => false,
        }
    }

    /// Remove the first line of every bucket (the header row of that code)
    pub fn drop_header_rows(&mut self) -> usize {
        let mut dropped = 0;
        for bucket in self.lines.values_mut() {
            if !bucket.is_empty() {
                bucket.remove(0);
                dropped += 1;
            }
        }
        dropped
    }

    pub fn get(&self, code: &str) -> Option<&[RecordLine<'a>]> {
        self.lines.get(code).map(Vec::as_slice)
    }

    /// Active codes in ascending order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lines.keys().copied()
    }

    /// Codes with their lines in ascending code order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[RecordLine<'a>])> + '_ {
        self.lines
            .iter()
            .map(|(&code, bucket)| (code, bucket.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines currently bucketed for `code`
    pub fn count(&self, code: &str) -> usize {
        self.lines.get(code).map_or(0, Vec::len)
    }
}
