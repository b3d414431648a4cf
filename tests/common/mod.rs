//! Shared test helpers for integration tests.

use camino::Utf8PathBuf;

/// Fixture root, relative to the package directory tests run from.
pub const FIXTURE_ROOT: &str = "tests/fixtures";

/// Returns the fixture root as a path.
pub fn fixture_root() -> Utf8PathBuf {
    Utf8PathBuf::from(FIXTURE_ROOT)
}

/// Loads a file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{FIXTURE_ROOT}/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}
