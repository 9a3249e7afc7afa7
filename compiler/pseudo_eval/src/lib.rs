//! Pseudo Eval - the trace compiler.
//!
//! Executes a pseudocode IR program and records every observable step as
//! an [`ActionFrame`], producing the [`Trace`] a playback client replays.
//!
//! # Architecture
//!
//! - `SymbolTable`: the single flat scope, the only mutable state
//! - `exec::expr`: expression evaluation (literals, operators, length,
//!   substring)
//! - `condition`: condition-string rendering and until-condition inversion,
//!   independent of runtime values
//! - `exec`: the statement executor, one method per statement kind
//! - `FrameEmitter`: line tracking, timestamps and frame collection
//!
//! Generation is synchronous and all-or-nothing: any [`TraceError`] aborts
//! the call and no partial trace escapes.

mod clock;
mod compiler;
mod condition;
mod emitter;
pub mod errors;
pub mod exec;
mod frame;
mod operators;
mod stack;
mod symbol_table;
mod value;


pub use clock::{Clock, StepClock, SystemClock};
pub use compiler::{
    generate_trace, TraceCompiler, TraceCompilerBuilder, TraceConfig, DEFAULT_MAX_LOOP_ITERATIONS,
};
pub use condition::{condition_text, negate_condition, render_condition};
pub use errors::{TraceError, TraceResult};
pub use frame::{Action, ActionFrame, LoopKind, Trace};
pub use operators::{evaluate_binary, evaluate_not};
pub use symbol_table::{Entry, SymbolTable};
pub use value::{SubstringValue, Value, ValueType};

pub use pseudo_ir::{Node, NodeKind, Operator, Program};
