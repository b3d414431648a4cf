//! Fixture identities and deterministic fixture path resolution.
//!
//! A fixture is addressed by a data subpath and a test name. Its input and
//! golden files live side by side and differ only in extension:
//!
//! ```text
//! <root>/<data_subpath>/<test_name>.test.cfml
//! <root>/<data_subpath>/<test_name>.test.expected
//! ```
//!
//! Paths are built by plain string concatenation with `/` separators, so
//! resolution is identical on every platform.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

/// Extension of input fixtures.
pub const INPUT_EXTENSION: &str = "test.cfml";

/// Extension of golden (expected output) fixtures.
pub const EXPECTED_EXTENSION: &str = "test.expected";

/// Which half of a fixture pair a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// Source text fed to the renderer.
    Input,
    /// Golden rendered output.
    Expected,
}

impl FixtureKind {
    /// Returns the fixed extension for this kind.
    #[must_use]
    pub const fn default_extension(self) -> &'static str {
        match self {
            Self::Input => INPUT_EXTENSION,
            Self::Expected => EXPECTED_EXTENSION,
        }
    }
}

/// Logical location of a test's input and expected files.
///
/// Test names are lower-case by convention. The harness does not fold case,
/// so callers must pass names exactly as they appear on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureId {
    data_subpath: String,
    test_name: String,
}

impl FixtureId {
    /// Creates a fixture identity from a data subpath and a test name.
    #[must_use]
    pub fn new(data_subpath: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            data_subpath: data_subpath.into(),
            test_name: test_name.into(),
        }
    }

    /// Returns the data subpath, relative to the fixture root.
    #[must_use]
    pub fn data_subpath(&self) -> &str {
        &self.data_subpath
    }

    /// Returns the test name.
    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Returns `true` if the test name contains upper-case ASCII letters.
    ///
    /// Such names break the lower-case naming convention and commonly fail
    /// to resolve on case-sensitive file systems.
    #[must_use]
    pub fn has_mixed_case_name(&self) -> bool {
        self.test_name.chars().any(|c| c.is_ascii_uppercase())
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.data_subpath, self.test_name)
    }
}

/// Root directory and extensions used to resolve fixture identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLayout {
    root: Utf8PathBuf,
    input_extension: String,
    expected_extension: String,
}

impl FixtureLayout {
    /// Creates a layout rooted at `root` with the fixed default extensions.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self::with_extensions(
            root,
            FixtureKind::Input.default_extension(),
            FixtureKind::Expected.default_extension(),
        )
    }

    /// Creates a layout with explicit input and expected extensions.
    #[must_use]
    pub fn with_extensions(
        root: impl Into<Utf8PathBuf>,
        input_extension: impl Into<String>,
        expected_extension: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            input_extension: input_extension.into(),
            expected_extension: expected_extension.into(),
        }
    }

    /// Returns the fixture root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the extension used for `kind`.
    #[must_use]
    pub fn extension(&self, kind: FixtureKind) -> &str {
        match kind {
            FixtureKind::Input => &self.input_extension,
            FixtureKind::Expected => &self.expected_extension,
        }
    }

    /// Resolves the path of one half of a fixture pair.
    #[must_use]
    pub fn resolve(&self, id: &FixtureId, kind: FixtureKind) -> Utf8PathBuf {
        resolve_fixture_path(
            &self.root,
            id.data_subpath(),
            id.test_name(),
            self.extension(kind),
        )
    }
}

/// Resolves a fixture path from its parts.
///
/// The result is `root + "/" + data_subpath + "/" + test_name + "." +
/// extension`. No normalization is applied.
///
/// # Examples
///
///     use camino::Utf8Path;
///     use goldenfix::harness::resolve_fixture_path;
///
///     let path = resolve_fixture_path(
///         Utf8Path::new("/home"),
///         "data/parser",
///         "simpleif",
///         "test.cfml",
///     );
///     assert_eq!(path, "/home/data/parser/simpleif.test.cfml");
#[must_use]
pub fn resolve_fixture_path(
    root: &Utf8Path,
    data_subpath: &str,
    test_name: &str,
    extension: &str,
) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{root}/{data_subpath}/{test_name}.{extension}"))
}

/// Resolves the input fixture path using [`INPUT_EXTENSION`].
#[must_use]
pub fn input_fixture_path(root: &Utf8Path, data_subpath: &str, test_name: &str) -> Utf8PathBuf {
    resolve_fixture_path(root, data_subpath, test_name, INPUT_EXTENSION)
}

/// Resolves the golden fixture path using [`EXPECTED_EXTENSION`].
#[must_use]
pub fn expected_fixture_path(root: &Utf8Path, data_subpath: &str, test_name: &str) -> Utf8PathBuf {
    resolve_fixture_path(root, data_subpath, test_name, EXPECTED_EXTENSION)
}

/// Returns the bare input file name for `test_name`.
#[must_use]
pub fn input_file_name(test_name: &str) -> String {
    format!("{test_name}.{INPUT_EXTENSION}")
}

/// Returns the bare golden file name for `test_name`.
#[must_use]
pub fn expected_file_name(test_name: &str) -> String {
    format!("{test_name}.{EXPECTED_EXTENSION}")
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
