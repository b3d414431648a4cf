//! `goldenfix`: golden-file regression testing for parsers.
//!
//! This crate provides the test-support primitives used by a language
//! plugin's parser tests: deterministic fixture path resolution, fixture
//! loading with normalized line separators, line-by-line comparison of a
//! rendered syntax tree against a stored golden file, and a scoped override
//! of test-wide settings such as the language level.

/// Golden-file harness, fixture stores, and scoped setting overrides.
pub mod harness;
