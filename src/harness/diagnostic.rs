//! Structured diagnostics for harness failures.
//!
//! Golden mismatches and configuration failures point at a concrete place
//! in a file. This module defines the stable machine-readable payload used
//! to report them, with a deterministic single-line rendering for snapshot
//! tests.

/// Stable diagnostic classification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessDiagnosticCode {
    /// Rendered output diverged from the golden file.
    GoldenMismatch,
    /// Harness configuration YAML could not be parsed.
    ConfigParseFailure,
    /// Harness configuration parsed but violated a constraint.
    ConfigValidationFailure,
}

impl HarnessDiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoldenMismatch => "golden.mismatch",
            Self::ConfigParseFailure => "config.parse_failure",
            Self::ConfigValidationFailure => "config.validation_failure",
        }
    }
}

/// Source location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file or source identifier.
    pub source: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

/// Structured harness diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessDiagnostic {
    /// Stable diagnostic code for programmatic handling.
    pub code: HarnessDiagnosticCode,
    /// Primary source location.
    pub location: SourceLocation,
    /// Deterministic human-readable fallback message.
    pub message: String,
}

impl HarnessDiagnostic {
    /// Renders the diagnostic into a deterministic single-line format suitable
    /// for snapshot tests.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {}:{}:{} | {}",
            self.code.as_str(),
            self.location.source,
            self.location.line,
            self.location.column,
            self.message
        )
    }
}
