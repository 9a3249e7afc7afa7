//! `TraceCompiler`: configuration and the public entry points.

use pseudo_ir::Program;

use crate::clock::Clock;
use crate::errors::TraceResult;
use crate::exec::Executor;
use crate::frame::Trace;

/// Loop iterations allowed per loop when nothing else is configured.
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 10_000;

/// Execution limits shared by every trace a compiler produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceConfig {
    /// Body executions allowed per loop statement; `None` means unbounded.
    pub max_loop_iterations: Option<usize>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            max_loop_iterations: Some(DEFAULT_MAX_LOOP_ITERATIONS),
        }
    }
}

/// Turns IR programs into action-frame traces.
///
/// A compiler holds configuration only. Every call to [`compile`] builds its
/// own symbol table and frame list, so one compiler can serve concurrent
/// callers and identical programs produce identical frames apart from
/// timestamps.
///
/// [`compile`]: TraceCompiler::compile
#[derive(Clone, Debug, Default)]
pub struct TraceCompiler {
    config: TraceConfig,
    clock: Clock,
}

impl TraceCompiler {
    /// A compiler with the wall clock and the default iteration limit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TraceCompilerBuilder {
        TraceCompilerBuilder::default()
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Execute `program` and return its trace.
    ///
    /// Fails as a unit: on any error no frames are returned.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.program.len()))]
    pub fn compile(&self, program: &Program) -> TraceResult<Trace> {
        let executor = Executor::new(&self.config, self.clock.clone());
        match executor.run(&program.program) {
            Ok(action_frames) => {
                tracing::debug!(frames = action_frames.len(), "trace generated");
                Ok(Trace { action_frames })
            }
            Err(err) => {
                tracing::debug!(kind = err.kind(), error = %err, "trace generation failed");
                Err(err)
            }
        }
    }

    /// Parse an IR document and execute it.
    pub fn compile_json(&self, text: &str) -> TraceResult<Trace> {
        let program = Program::from_json(text)?;
        self.compile(&program)
    }
}

/// Builder for [`TraceCompiler`].
#[derive(Debug, Default)]
pub struct TraceCompilerBuilder {
    config: TraceConfig,
    clock: Clock,
}

impl TraceCompilerBuilder {
    /// Set the timestamp source.
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Cap the body executions of any single loop.
    #[must_use]
    pub fn max_loop_iterations(mut self, limit: usize) -> Self {
        self.config.max_loop_iterations = Some(limit);
        self
    }

    /// Remove the loop cap. A loop whose condition never flips will then
    /// run until the process is stopped.
    #[must_use]
    pub fn unbounded_loops(mut self) -> Self {
        self.config.max_loop_iterations = None;
        self
    }

    pub fn build(self) -> TraceCompiler {
        TraceCompiler {
            config: self.config,
            clock: self.clock,
        }
    }
}

/// Execute `program` with the default compiler.
pub fn generate_trace(program: &Program) -> TraceResult<Trace> {
    TraceCompiler::new().compile(program)
}
