//! Integration tests for loading harness configuration from YAML files.

mod common;

use common::load_fixture;
use goldenfix::harness::{
    FixtureKind, GoldenHarness, GoldenOutcome, GoldenPolicy, load_harness_config_with_source,
};
use rstest::rstest;
use test_helpers::outline_renderer;

#[test]
fn checked_in_config_drives_the_corpus() {
    let source = "tests/fixtures/config/harness.yaml";
    let config = load_harness_config_with_source(source, &load_fixture("config/harness.yaml"))
        .unwrap_or_else(|e| panic!("config should load: {e}"));
    assert_eq!(config.policy(), GoldenPolicy::Verify);
    assert_eq!(config.layout().root().as_str(), "tests/fixtures");
    assert_eq!(config.layout().extension(FixtureKind::Input), "test.cfml");

    let harness = GoldenHarness::from_config(&config, outline_renderer);
    assert!(matches!(
        harness.check_named("data/parser", "simpleif"),
        Ok(GoldenOutcome::Matched)
    ));
}

#[rstest]
#[case::invalid_extension("config/invalid_extension.yaml", "must not start with '.'")]
#[case::unknown_key("config/unknown_key.yaml", "unknown field")]
fn invalid_configs_are_rejected_with_actionable_messages(
    #[case] fixture: &str,
    #[case] expected_fragment: &str,
) {
    let source = format!("tests/fixtures/{fixture}");
    let result = load_harness_config_with_source(&source, &load_fixture(fixture));
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(
        message.contains(expected_fragment),
        "error for {fixture} should contain '{expected_fragment}', got: {message}"
    );
}
