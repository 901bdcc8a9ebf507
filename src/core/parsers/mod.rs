//! Bundle file parsers.
//!
//! - `json`: JSON bundle files (single-file parsing and bundle directory scans)

pub mod json;
