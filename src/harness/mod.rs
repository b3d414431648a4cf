//! Golden-file harness for parser regression tests.
//!
//! The harness resolves fixture pairs (`<name>.test.cfml` input,
//! `<name>.test.expected` golden output), renders the input with an
//! injected [`Renderer`], and compares the result with the golden file line
//! by line. Fixture access goes through a [`FixtureStore`], and test-wide
//! settings are overridden through an explicit [`SettingsStore`] handle.

mod config;
mod diagnostic;
mod diff;
mod error;
mod fixture;
mod golden;
mod loader;
mod render;
mod scoped;
mod settings;
mod store;

pub use config::{GoldenPolicy, HarnessConfig, load_harness_config, load_harness_config_with_source};
pub use diagnostic::{HarnessDiagnostic, HarnessDiagnosticCode, SourceLocation};
pub use diff::{LineMismatch, first_line_mismatch};
pub use error::HarnessError;
pub use fixture::{
    EXPECTED_EXTENSION, FixtureId, FixtureKind, FixtureLayout, INPUT_EXTENSION,
    expected_file_name, expected_fixture_path, input_file_name, input_fixture_path,
    resolve_fixture_path,
};
pub use golden::{GoldenHarness, GoldenOutcome, assert_same_lines};
pub use loader::{load_fixture_text, load_input, normalize_line_separators, write_fixture_text};
pub use render::Renderer;
pub use scoped::{
    LANGUAGE_LEVEL_KEY, OverrideError, SettingOverride, with_language_level, with_setting_override,
};
pub use settings::{MemorySettingsStore, SettingsStore, StoreError};
pub use store::{DirFixtureStore, FixtureStore, MemoryFixtureStore};
