//! Pseudo IR - Intermediate Representation Types
//!
//! The parsed form of a pseudocode program, as handed over by the external
//! parser. A program is a flat list of statement [`Node`]s; statements nest
//! further nodes for conditions, values and bodies.
//!
//! # Design Philosophy
//!
//! - **One closed union**: every IR shape is a [`NodeKind`] variant, and
//!   shapes the crate does not recognize become [`NodeKind::Unsupported`]
//!   instead of a deserialization failure, so the executor decides how to
//!   report them.
//! - **Owned trees**: programs are small, so nodes own their children
//!   (`Box<Node>`, `Vec<Node>`) rather than living in an arena.

mod node;
mod operators;

pub use node::{LoopRange, Node, NodeKind, Program};
pub use operators::Operator;
