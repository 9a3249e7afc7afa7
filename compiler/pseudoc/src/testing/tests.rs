#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

const FIXTURES: &str = r#"[
  {
    "name": "count to three",
    "program": {"program": [
      {"type": "LoopFromTo", "line": 1, "loopVariable": "i",
       "range": {"start": 1, "end": 3},
       "body": [{"type": "PrintStatement", "line": 2,
                 "value": {"type": "Identifier", "name": "i"}}]}
    ]},
    "expectedOutput": ["1", "2", "3"]
  },
  {
    "name": "undeclared",
    "program": {"program": [
      {"type": "PrintStatement", "line": 1,
       "value": {"type": "Expression", "operator": "+",
                 "left": {"type": "Identifier", "name": "x"},
                 "right": {"type": "NumberLiteral", "value": 1}}}
    ]},
    "expectedError": "UndeclaredVariable"
  },
  {
    "name": "wrong expectation",
    "program": {"program": [
      {"type": "PrintStatement", "line": 1, "value": {"type": "StringLiteral", "value": "hi"}}
    ]},
    "expectedOutput": ["bye"]
  }
]"#;

#[test]
fn loads_camel_case_fixtures() {
    let fixtures = load_fixtures(FIXTURES).unwrap();
    assert_eq!(fixtures.len(), 3);
    assert_eq!(fixtures[0].expected_output, vec!["1", "2", "3"]);
    assert_eq!(
        fixtures[1].expected_error.as_deref(),
        Some("UndeclaredVariable")
    );
    assert!(fixtures[1].expected_output.is_empty());
}

#[test]
fn grades_output_and_errors() {
    let fixtures = load_fixtures(FIXTURES).unwrap();
    let compiler = TraceCompiler::new();

    assert!(grade(&compiler, &fixtures[0]).outcome.is_passed());
    assert!(grade(&compiler, &fixtures[1]).outcome.is_passed());
    assert_eq!(
        grade(&compiler, &fixtures[2]).outcome,
        FixtureOutcome::Failed(r#"expected output ["bye"], got ["hi"]"#.to_string())
    );
}

#[test]
fn error_expectation_matches_message_text() {
    let mut fixture = load_fixtures(FIXTURES).unwrap().swap_remove(1);
    fixture.expected_error = Some("'x' is not declared".to_string());
    assert!(grade(&TraceCompiler::new(), &fixture).outcome.is_passed());

    fixture.expected_error = Some("DivisionByZero".to_string());
    assert_eq!(
        grade(&TraceCompiler::new(), &fixture).outcome,
        FixtureOutcome::Failed(
            "expected error 'DivisionByZero', got 'Variable 'x' is not declared.'".to_string()
        )
    );
}

#[test]
fn parallel_and_sequential_agree() {
    let fixtures = load_fixtures(FIXTURES).unwrap();

    let parallel = FixtureRunner::new().run(&fixtures);
    let sequential = FixtureRunner::with_config(FixtureRunnerConfig {
        parallel: false,
        verbose: false,
    })
    .run(&fixtures);

    for summary in [&parallel, &sequential] {
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);
    }
    let names: Vec<&str> = parallel.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["count to three", "undeclared", "wrong expectation"]);
}

#[test]
fn runner_uses_configured_compiler() {
    let fixtures = load_fixtures(FIXTURES).unwrap();
    let runner = FixtureRunner::new().with_compiler(
        TraceCompiler::builder().max_loop_iterations(2).build(),
    );
    let summary = runner.run(&fixtures[..1]);
    assert!(matches!(
        &summary.results[0].outcome,
        FixtureOutcome::Failed(msg) if msg.starts_with("IterationLimitExceeded")
    ));
}
