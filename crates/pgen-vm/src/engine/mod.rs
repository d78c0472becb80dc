//! Parser engine for pgen grammar tables.
//!
//! The engine feeds tokens through the table's DFAs, keeping one frame per
//! rule entered, and hands completed frames to a `NodeBuilder`. Dead ends go
//! to an `ErrorRecovery` hook.

mod cst;
mod error;
mod label;
mod node;
mod parser;
mod recovery;
mod stack;
mod trace;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod label_tests;
#[cfg(test)]
mod recovery_tests;
#[cfg(test)]
mod test_grammars;

pub use cst::{Cst, CstBuilder};
pub use error::{ErrorToken, ParseError};
pub use label::token_to_label;
pub use node::NodeBuilder;
pub use parser::{Limits, Parser, ParserBuilder};
pub use recovery::{ErrorRecovery, Recovery, SkipRecovery, StrictRecovery};
pub use stack::{Stack, StackNode};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
