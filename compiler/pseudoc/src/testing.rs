//! Fixture grading.
//!
//! A fixture file is a JSON array of cases:
//!
//! ```json
//! [{ "name": "counts", "program": { "program": [...] }, "expectedOutput": ["0", "1"] },
//!  { "name": "bad", "program": { "program": [...] }, "expectedError": "UndeclaredVariable" }]
//! ```
//!
//! A case passes when the printed output of its trace equals
//! `expectedOutput`, or, for `expectedError` cases, when compilation fails
//! with that error kind or a message containing that text.

use std::time::{Duration, Instant};

use pseudo_eval::{TraceCompiler, TraceError};
use pseudo_ir::Program;
use rayon::prelude::*;
use serde::Deserialize;

/// One graded case.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub name: String,
    pub program: Program,
    #[serde(default)]
    pub expected_output: Vec<String>,
    #[serde(default)]
    pub expected_error: Option<String>,
}

/// Parse a fixture file.
pub fn load_fixtures(text: &str) -> Result<Vec<Fixture>, serde_json::Error> {
    serde_json::from_str(text)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureOutcome {
    Passed,
    Failed(String),
}

impl FixtureOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, FixtureOutcome::Passed)
    }
}

#[derive(Clone, Debug)]
pub struct FixtureResult {
    pub name: String,
    pub outcome: FixtureOutcome,
    pub duration: Duration,
}

/// Results of a whole fixture file, in file order.
#[derive(Clone, Debug, Default)]
pub struct FixtureSummary {
    pub results: Vec<FixtureResult>,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl FixtureSummary {
    pub fn add_result(&mut self, result: FixtureResult) {
        match result.outcome {
            FixtureOutcome::Passed => self.passed += 1,
            FixtureOutcome::Failed(_) => self.failed += 1,
        }
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

#[derive(Clone, Debug)]
pub struct FixtureRunnerConfig {
    pub parallel: bool,
    pub verbose: bool,
}

impl Default for FixtureRunnerConfig {
    fn default() -> Self {
        FixtureRunnerConfig {
            parallel: true,
            verbose: false,
        }
    }
}

/// Grades fixtures against one compiler configuration.
#[derive(Clone, Debug, Default)]
pub struct FixtureRunner {
    config: FixtureRunnerConfig,
    compiler: TraceCompiler,
}

impl FixtureRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FixtureRunnerConfig) -> Self {
        FixtureRunner {
            config,
            compiler: TraceCompiler::new(),
        }
    }

    /// Use `compiler` instead of the default one.
    #[must_use]
    pub fn with_compiler(mut self, compiler: TraceCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn run(&self, fixtures: &[Fixture]) -> FixtureSummary {
        let start = Instant::now();
        let results = if self.config.parallel && fixtures.len() > 1 {
            self.run_parallel(fixtures)
        } else {
            fixtures.iter().map(|f| grade(&self.compiler, f)).collect()
        };

        let mut summary = FixtureSummary::default();
        for result in results {
            summary.add_result(result);
        }
        summary.duration = start.elapsed();
        summary
    }

    /// Grade on a scoped pool so worker threads are joined before returning.
    ///
    /// Every compilation owns its symbol table and frame list, so fixtures
    /// share the compiler freely.
    fn run_parallel(&self, fixtures: &[Fixture]) -> Vec<FixtureResult> {
        let compiler = &self.compiler;
        rayon::ThreadPoolBuilder::new()
            .stack_size(16 * 1024 * 1024)
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    fixtures
                        .par_iter()
                        .map(|fixture| grade(compiler, fixture))
                        .collect::<Vec<_>>()
                })
            })
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), grading sequentially");
                fixtures.iter().map(|f| grade(compiler, f)).collect()
            })
    }
}

/// Compile one fixture and compare against its expectation.
pub fn grade(compiler: &TraceCompiler, fixture: &Fixture) -> FixtureResult {
    let start = Instant::now();
    let result = compiler.compile(&fixture.program);

    let outcome = match (result, &fixture.expected_error) {
        (Ok(trace), None) => {
            let actual = trace.printed_output();
            if actual == fixture.expected_output {
                FixtureOutcome::Passed
            } else {
                FixtureOutcome::Failed(format!(
                    "expected output {:?}, got {actual:?}",
                    fixture.expected_output
                ))
            }
        }
        (Ok(_), Some(expected)) => FixtureOutcome::Failed(format!(
            "expected error '{expected}', but the program ran to completion"
        )),
        (Err(err), Some(expected)) if error_matches(&err, expected) => FixtureOutcome::Passed,
        (Err(err), Some(expected)) => {
            FixtureOutcome::Failed(format!("expected error '{expected}', got '{err}'"))
        }
        (Err(err), None) => FixtureOutcome::Failed(format!("{}: {err}", err.kind())),
    };

    tracing::debug!(fixture = %fixture.name, passed = outcome.is_passed(), "graded");
    FixtureResult {
        name: fixture.name.clone(),
        outcome,
        duration: start.elapsed(),
    }
}

fn error_matches(err: &TraceError, expected: &str) -> bool {
    err.kind() == expected || err.to_string().contains(expected)
}

#[cfg(test)]
mod tests;
