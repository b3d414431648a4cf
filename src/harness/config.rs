//! Harness configuration.
//!
//! A [`HarnessConfig`] fixes where fixtures live, which extensions the two
//! halves of a fixture pair use, and what a golden check does when the
//! golden file is missing or stale. It is usually built in code with
//! [`HarnessConfig::new`], but can also be loaded from YAML:
//!
//! ```yaml
//! Root: tests/fixtures
//! InputExtension: test.cfml
//! ExpectedExtension: test.expected
//! Policy: create_missing
//! ```
//!
//! Keys accept TitleCase or snake_case spellings. Unknown keys are rejected.

use camino::Utf8PathBuf;
use serde::Deserialize;
use serde_saphyr::{Location, Spanned};

use super::diagnostic::{HarnessDiagnostic, HarnessDiagnosticCode, SourceLocation};
use super::error::HarnessError;
use super::fixture::{EXPECTED_EXTENSION, FixtureLayout, INPUT_EXTENSION};

/// Synthetic source identifier used by [`load_harness_config`].
const INLINE_SOURCE: &str = "<inline>";

/// What a golden check does when the golden file is missing or differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldenPolicy {
    /// Never write. Missing golden files and mismatches fail the check.
    #[default]
    Verify,
    /// Write a missing golden file from the rendered output, then fail so
    /// the new baseline is reviewed. Mismatches fail the check.
    CreateMissing,
    /// Rewrite missing or stale golden files and pass.
    Overwrite,
}

/// Fixture layout plus golden update policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    layout: FixtureLayout,
    policy: GoldenPolicy,
}

impl HarnessConfig {
    /// Creates a configuration rooted at `root` with the default extensions
    /// and [`GoldenPolicy::Verify`].
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            layout: FixtureLayout::new(root),
            policy: GoldenPolicy::Verify,
        }
    }

    /// Replaces the golden update policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GoldenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the fixture layout.
    #[must_use]
    pub fn with_layout(mut self, layout: FixtureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the fixture layout.
    #[must_use]
    pub const fn layout(&self) -> &FixtureLayout {
        &self.layout
    }

    /// Returns the golden update policy.
    #[must_use]
    pub const fn policy(&self) -> GoldenPolicy {
        self.policy
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHarnessConfig {
    #[serde(rename = "Root", alias = "root")]
    root: Spanned<String>,
    #[serde(rename = "InputExtension", alias = "input_extension", default)]
    input_extension: Option<Spanned<String>>,
    #[serde(rename = "ExpectedExtension", alias = "expected_extension", default)]
    expected_extension: Option<Spanned<String>>,
    #[serde(rename = "Policy", alias = "policy", default)]
    policy: GoldenPolicy,
}

/// Loads a harness configuration from a YAML string.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidConfig`] if the YAML is malformed, has
/// unknown keys, or violates a constraint (blank root, blank or malformed
/// extensions, identical input and expected extensions).
///
/// # Examples
///
///     use goldenfix::harness::{GoldenPolicy, load_harness_config};
///
///     let config = load_harness_config("Root: tests/fixtures\nPolicy: overwrite\n").unwrap();
///     assert_eq!(config.layout().root().as_str(), "tests/fixtures");
///     assert_eq!(config.policy(), GoldenPolicy::Overwrite);
pub fn load_harness_config(input: &str) -> Result<HarnessConfig, HarnessError> {
    load_harness_config_with_source(INLINE_SOURCE, input)
}

/// Loads a harness configuration and records diagnostics against an
/// explicit source identifier.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidConfig`] with a
/// [`HarnessDiagnosticCode::ConfigParseFailure`] diagnostic when parsing
/// fails and a [`HarnessDiagnosticCode::ConfigValidationFailure`]
/// diagnostic when a constraint is violated.
pub fn load_harness_config_with_source(
    source: &str,
    input: &str,
) -> Result<HarnessConfig, HarnessError> {
    let raw: RawHarnessConfig = serde_saphyr::from_str(input).map_err(|error| {
        let message = error.to_string();
        let diagnostic = error.location().map(|location| {
            Box::new(diagnostic_at(
                HarnessDiagnosticCode::ConfigParseFailure,
                source,
                first_line(&message),
                location,
            ))
        });
        HarnessError::InvalidConfig {
            message,
            diagnostic,
        }
    })?;
    let config = raw.into_config(source)?;
    tracing::debug!(
        source,
        root = %config.layout.root(),
        policy = ?config.policy,
        "loaded harness configuration"
    );
    Ok(config)
}

impl RawHarnessConfig {
    fn into_config(self, source: &str) -> Result<HarnessConfig, HarnessError> {
        if self.root.value.trim().is_empty() {
            return Err(validation_error(
                source,
                "Root must be non-empty",
                self.root.referenced,
            ));
        }
        let input = validate_extension(source, "InputExtension", self.input_extension.as_ref())?;
        let expected =
            validate_extension(source, "ExpectedExtension", self.expected_extension.as_ref())?
                .unwrap_or(EXPECTED_EXTENSION);
        let input_extension = input.unwrap_or(INPUT_EXTENSION);

        if input_extension == expected {
            let location = self
                .expected_extension
                .as_ref()
                .or(self.input_extension.as_ref())
                .map_or(self.root.referenced, |spanned| spanned.referenced);
            return Err(validation_error(
                source,
                "InputExtension and ExpectedExtension must differ",
                location,
            ));
        }

        Ok(HarnessConfig {
            layout: FixtureLayout::with_extensions(
                self.root.value.as_str(),
                input_extension,
                expected,
            ),
            policy: self.policy,
        })
    }
}

fn validate_extension<'a>(
    source: &str,
    field: &str,
    extension: Option<&'a Spanned<String>>,
) -> Result<Option<&'a str>, HarnessError> {
    let Some(spanned) = extension else {
        return Ok(None);
    };
    let value = spanned.value.as_str();
    let reason = if value.trim().is_empty() {
        Some(format!("{field} must be non-empty"))
    } else if value.starts_with('.') {
        Some(format!("{field} must not start with '.'"))
    } else if value.contains('/') || value.contains('\\') {
        Some(format!("{field} must not contain path separators"))
    } else {
        None
    };
    match reason {
        Some(message) => Err(validation_error(source, &message, spanned.referenced)),
        None => Ok(Some(value)),
    }
}

fn validation_error(source: &str, reason: &str, location: Location) -> HarnessError {
    HarnessError::InvalidConfig {
        message: reason.to_owned(),
        diagnostic: Some(Box::new(diagnostic_at(
            HarnessDiagnosticCode::ConfigValidationFailure,
            source,
            reason.to_owned(),
            location,
        ))),
    }
}

fn diagnostic_at(
    code: HarnessDiagnosticCode,
    source: &str,
    message: String,
    location: Location,
) -> HarnessDiagnostic {
    let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
    let column = usize::try_from(location.column())
        .ok()
        .unwrap_or(usize::MAX);
    HarnessDiagnostic {
        code,
        location: SourceLocation {
            source: source.to_owned(),
            line,
            column,
        },
        message,
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
