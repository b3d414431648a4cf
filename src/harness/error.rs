//! Error types for fixture loading and golden-file comparison.

use std::io;

use camino::Utf8PathBuf;

use super::diagnostic::{HarnessDiagnostic, HarnessDiagnosticCode, SourceLocation};
use super::diff::LineMismatch;

/// Errors that can occur while running a golden-file check.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// An input or expected fixture is missing or unreadable.
    #[error("fixture not found or unreadable: {path}")]
    FixtureNotFound {
        /// The exact path the harness tried to read.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Rendered output diverged from the golden file.
    #[error("golden mismatch in {path} at {mismatch}")]
    GoldenMismatch {
        /// Path of the golden file that was compared against.
        path: Utf8PathBuf,
        /// The first differing line.
        mismatch: LineMismatch,
    },

    /// The golden file did not exist and was created from the rendered
    /// output. The check still fails so the new baseline gets reviewed.
    #[error("golden file {path} did not exist; created it from the rendered output")]
    GoldenCreated {
        /// Path of the newly written golden file.
        path: Utf8PathBuf,
    },

    /// A golden file could not be written.
    #[error("failed to write fixture {path}")]
    FixtureWrite {
        /// The path the harness tried to write.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Harness configuration could not be parsed or failed validation.
    #[error("invalid harness configuration: {message}")]
    InvalidConfig {
        /// A human-readable explanation of the failure.
        message: String,
        /// Structured diagnostic payload when a location is known.
        diagnostic: Option<Box<HarnessDiagnostic>>,
    },
}

impl HarnessError {
    /// Returns a source-located diagnostic for this error, if it has one.
    ///
    /// Golden mismatches point at the golden file, the 1-based line number
    /// and the column of the first differing character. Configuration
    /// failures point at the offending YAML location when the parser
    /// reported one.
    #[must_use]
    pub fn diagnostic(&self) -> Option<HarnessDiagnostic> {
        match self {
            Self::GoldenMismatch { path, mismatch } => Some(HarnessDiagnostic {
                code: HarnessDiagnosticCode::GoldenMismatch,
                location: SourceLocation {
                    source: path.to_string(),
                    line: mismatch.line_number(),
                    column: mismatch.column(),
                },
                message: mismatch.to_string(),
            }),
            Self::InvalidConfig { diagnostic, .. } => diagnostic.as_deref().cloned(),
            Self::FixtureNotFound { .. }
            | Self::GoldenCreated { .. }
            | Self::FixtureWrite { .. } => None,
        }
    }

    /// Returns the path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::FixtureNotFound { path, .. }
            | Self::GoldenMismatch { path, .. }
            | Self::GoldenCreated { path }
            | Self::FixtureWrite { path, .. } => Some(path),
            Self::InvalidConfig { .. } => None,
        }
    }
}
