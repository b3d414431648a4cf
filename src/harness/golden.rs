//! Parser-regression checks against golden files.
//!
//! A check loads a fixture's input, renders it, and compares the rendered
//! text line by line with the fixture's golden file:
//!
//! 1. load `<root>/<subpath>/<name>.test.cfml`;
//! 2. apply the injected [`Renderer`];
//! 3. compare with `<root>/<subpath>/<name>.test.expected`.
//!
//! What happens when the golden file is missing or stale is decided by the
//! harness's [`GoldenPolicy`].

use camino::{Utf8Path, Utf8PathBuf};

use super::config::{GoldenPolicy, HarnessConfig};
use super::diff::first_line_mismatch;
use super::error::HarnessError;
use super::fixture::{FixtureId, FixtureKind};
use super::render::Renderer;
use super::store::{DirFixtureStore, FixtureStore};

/// Result of a passing golden check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenOutcome {
    /// Rendered output matched the golden file.
    Matched,
    /// The golden file was missing or stale and has been rewritten.
    Updated,
}

/// Runs golden checks for one renderer against one fixture store.
#[derive(Debug, Clone)]
pub struct GoldenHarness<S, R> {
    store: S,
    renderer: R,
    policy: GoldenPolicy,
}

impl<R: Renderer> GoldenHarness<DirFixtureStore, R> {
    /// Creates a harness reading fixtures from disk as described by `config`.
    #[must_use]
    pub fn from_config(config: &HarnessConfig, renderer: R) -> Self {
        Self::new(DirFixtureStore::new(config.layout().clone()), renderer)
            .with_policy(config.policy())
    }

    /// Creates a harness rooted at `root` with the default extensions and
    /// [`GoldenPolicy::Verify`].
    #[must_use]
    pub fn at_root(root: impl Into<Utf8PathBuf>, renderer: R) -> Self {
        Self::from_config(&HarnessConfig::new(root), renderer)
    }
}

impl<S: FixtureStore, R: Renderer> GoldenHarness<S, R> {
    /// Creates a harness over an explicit fixture store.
    #[must_use]
    pub const fn new(store: S, renderer: R) -> Self {
        Self {
            store,
            renderer,
            policy: GoldenPolicy::Verify,
        }
    }

    /// Replaces the golden update policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GoldenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the fixture store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the golden update policy.
    #[must_use]
    pub const fn policy(&self) -> GoldenPolicy {
        self.policy
    }

    /// Loads and renders the input fixture for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureNotFound`] when the input fixture is
    /// missing or unreadable.
    pub fn render_fixture(&self, id: &FixtureId) -> Result<String, HarnessError> {
        if id.has_mixed_case_name() {
            tracing::warn!(
                fixture = %id,
                "test name contains upper-case letters; fixture names are lower-case by convention"
            );
        }
        let input = self.store.load(id, FixtureKind::Input)?;
        let rendered = self.renderer.render(&input);
        tracing::debug!(fixture = %id, lines = rendered.lines().count(), "rendered fixture");
        Ok(rendered)
    }

    /// Renders the input fixture for `id` and compares it with the golden
    /// file.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::FixtureNotFound`] when the input is missing, or
    ///   when the golden file is missing under [`GoldenPolicy::Verify`].
    /// - [`HarnessError::GoldenMismatch`] on the first differing line,
    ///   unless the policy is [`GoldenPolicy::Overwrite`].
    /// - [`HarnessError::GoldenCreated`] when a missing golden file was
    ///   written under [`GoldenPolicy::CreateMissing`].
    /// - [`HarnessError::FixtureWrite`] when a golden file could not be
    ///   written.
    pub fn check(&self, id: &FixtureId) -> Result<GoldenOutcome, HarnessError> {
        let rendered = self.render_fixture(id)?;
        self.compare(id, &rendered)
    }

    /// Convenience form of [`GoldenHarness::check`] taking the fixture's
    /// parts directly.
    ///
    /// # Errors
    ///
    /// See [`GoldenHarness::check`].
    pub fn check_named(
        &self,
        data_subpath: &str,
        test_name: &str,
    ) -> Result<GoldenOutcome, HarnessError> {
        self.check(&FixtureId::new(data_subpath, test_name))
    }

    /// Compares already-rendered text with the golden file for `id`.
    ///
    /// # Errors
    ///
    /// See [`GoldenHarness::check`], minus the input-loading failure.
    pub fn compare(&self, id: &FixtureId, rendered: &str) -> Result<GoldenOutcome, HarnessError> {
        let expected = match self.store.load(id, FixtureKind::Expected) {
            Ok(expected) => expected,
            Err(HarnessError::FixtureNotFound { path, source }) => {
                return self.handle_missing_golden(id, rendered, &path, source);
            }
            Err(other) => return Err(other),
        };

        let Some(mismatch) = first_line_mismatch(&expected, rendered) else {
            tracing::debug!(fixture = %id, "golden file matched");
            return Ok(GoldenOutcome::Matched);
        };

        if self.policy == GoldenPolicy::Overwrite {
            self.store.write(id, FixtureKind::Expected, rendered)?;
            tracing::warn!(fixture = %id, line = mismatch.index, "rewrote stale golden file");
            return Ok(GoldenOutcome::Updated);
        }

        Err(HarnessError::GoldenMismatch {
            path: self.store.resolve(id, FixtureKind::Expected),
            mismatch,
        })
    }

    fn handle_missing_golden(
        &self,
        id: &FixtureId,
        rendered: &str,
        path: &Utf8Path,
        source: std::io::Error,
    ) -> Result<GoldenOutcome, HarnessError> {
        match self.policy {
            GoldenPolicy::Verify => Err(HarnessError::FixtureNotFound {
                path: path.to_owned(),
                source,
            }),
            GoldenPolicy::CreateMissing => {
                self.store.write(id, FixtureKind::Expected, rendered)?;
                tracing::warn!(%path, "created missing golden file");
                Err(HarnessError::GoldenCreated {
                    path: path.to_owned(),
                })
            }
            GoldenPolicy::Overwrite => {
                self.store.write(id, FixtureKind::Expected, rendered)?;
                tracing::warn!(%path, "created missing golden file");
                Ok(GoldenOutcome::Updated)
            }
        }
    }
}

/// Asserts that `actual` has the same lines as `expected`.
///
/// Line separators are normalized on both sides and a final line
/// terminator is not significant.
///
/// # Errors
///
/// Returns [`HarnessError::GoldenMismatch`] attributed to `source` on the
/// first differing line.
///
/// # Examples
///
///     use goldenfix::harness::assert_same_lines;
///
///     assert!(assert_same_lines("inline", "a\nb\n", "a\r\nb").is_ok());
///     assert!(assert_same_lines("inline", "a\nb", "a\nc").is_err());
pub fn assert_same_lines(source: &str, expected: &str, actual: &str) -> Result<(), HarnessError> {
    match first_line_mismatch(expected, actual) {
        None => Ok(()),
        Some(mismatch) => Err(HarnessError::GoldenMismatch {
            path: source.into(),
            mismatch,
        }),
    }
}

#[cfg(test)]
#[path = "golden_tests.rs"]
mod tests;
