//! Pseudocode trace compiler CLI.
//!
//! The binary is a thin shell over this library: argument parsing lives in
//! `main.rs`, everything that produces output lives in [`commands`] and
//! [`testing`] so it can be exercised without spawning a process.
//!
//! # Debugging
//!
//! Tracing is off unless `RUST_LOG` is set:
//! - `RUST_LOG=pseudo_eval=debug` - compile spans and loop summaries
//! - `RUST_LOG=pseudo_eval=trace` - every emitted frame

pub mod commands;
pub mod testing;
mod tracing_setup;

pub use tracing_setup::init_tracing;
