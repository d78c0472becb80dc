#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for pgen grammar tables.
//!
//! Two layers:
//! - **Description layer**: per-rule DFAs as a grammar compiler writes them
//!   (`GrammarBuilder`, `grammar.json`)
//! - **Table layer**: the assembled, immutable `Grammar` the parser engine runs on
//!
//! The table layer is read-only once built. A single `Grammar` can back any
//! number of parses, on any number of threads.

mod colors;
pub mod grammar;
mod invariants;
mod token;


pub use colors::Colors;
pub use grammar::{
    DfaState, DfaStateDef, Grammar, GrammarBuilder, GrammarError, LabelKind, NONTERMINAL_BASE,
    Nonterminal, NonterminalId, Plan, StateId,
};
pub use token::{Position, Token, TokenType};

/// Transition alphabet symbol.
///
/// Every label stands for exactly one terminal: a token type or a keyword
/// spelling. Nonterminal references are expanded into plans at assembly time,
/// so they never appear in a transition table.
pub type Label = u16;
