//! Grading the bundled fixture file.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use pseudoc::testing::{load_fixtures, FixtureOutcome, FixtureRunner};

const PROGRAMS: &str = include_str!("fixtures/programs.json");

#[test]
fn bundled_fixtures_pass() {
    let fixtures = load_fixtures(PROGRAMS).expect("fixture file parses");
    let summary = FixtureRunner::new().run(&fixtures);

    let failures: Vec<(&str, &FixtureOutcome)> = summary
        .results
        .iter()
        .filter(|r| !r.outcome.is_passed())
        .map(|r| (r.name.as_str(), &r.outcome))
        .collect();
    assert_eq!(failures, vec![]);
    assert_eq!(summary.passed, fixtures.len());
    assert_eq!(summary.exit_code(), 0);
}
