//! Regression corpus tests for golden parser fixtures.

mod common;

use common::fixture_root;
use goldenfix::harness::{
    DirFixtureStore, FixtureLayout, GoldenHarness, GoldenOutcome, HarnessError,
};
use rstest::{fixture, rstest};
use test_helpers::outline_renderer;

const PARSER_DATA: &str = "data/parser";

type CorpusHarness = GoldenHarness<DirFixtureStore, fn(&str) -> String>;

#[fixture]
fn harness() -> CorpusHarness {
    GoldenHarness::at_root(fixture_root(), outline_renderer as fn(&str) -> String)
}

#[rstest]
#[case::simple_if("simpleif")]
#[case::loop_with_inline_output("cfloop")]
#[case::function_with_text("function")]
#[case::crlf_input("crlf")]
fn corpus_matches_golden_files(harness: CorpusHarness, #[case] test_name: &str) {
    let result = harness.check_named(PARSER_DATA, test_name);
    assert!(
        matches!(result, Ok(GoldenOutcome::Matched)),
        "expected {test_name} to match its golden file, got: {result:?}"
    );
}

#[rstest]
fn stale_golden_reports_first_differing_line(harness: CorpusHarness) {
    let result = harness.check_named(PARSER_DATA, "stale");
    let Err(HarnessError::GoldenMismatch { path, mismatch }) = &result else {
        panic!("stale fixture should mismatch, got: {result:?}");
    };
    assert_eq!(path.as_str(), "tests/fixtures/data/parser/stale.test.expected");
    assert_eq!(mismatch.index, 2);
    assert_eq!(mismatch.expected.as_deref(), Some("    Tag(cfparam)"));
    assert_eq!(mismatch.actual.as_deref(), Some("    Tag(cfset)"));
}

#[rstest]
fn missing_golden_reports_attempted_path(harness: CorpusHarness) {
    let result = harness.check_named(PARSER_DATA, "noexpected");
    let Err(error) = result else {
        panic!("fixture without golden file should fail");
    };
    assert!(matches!(error, HarnessError::FixtureNotFound { .. }));
    assert_eq!(
        error.path().map(|path| path.as_str()),
        Some("tests/fixtures/data/parser/noexpected.test.expected")
    );
}

#[rstest]
fn missing_input_reports_attempted_path(harness: CorpusHarness) {
    let result = harness.check_named(PARSER_DATA, "doesnotexist");
    let Err(error) = result else {
        panic!("missing input should fail");
    };
    assert!(matches!(error, HarnessError::FixtureNotFound { .. }));
    assert_eq!(
        error.path().map(|path| path.as_str()),
        Some("tests/fixtures/data/parser/doesnotexist.test.cfml")
    );
}

#[test]
fn custom_layout_reads_the_same_corpus() {
    let layout = FixtureLayout::with_extensions(fixture_root(), "test.cfml", "test.expected");
    let harness = GoldenHarness::new(DirFixtureStore::new(layout), outline_renderer);
    assert!(matches!(
        harness.check_named(PARSER_DATA, "simpleif"),
        Ok(GoldenOutcome::Matched)
    ));
}
