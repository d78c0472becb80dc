//! Grammar tables for the pushdown automaton.
//!
//! This module provides the assembled `Grammar` table, the `GrammarBuilder`
//! that turns per-rule DFAs into it, JSON loading of DFA descriptions and
//! compact binary serialization of assembled tables.

mod binary;
mod builder;
mod dump;
mod error;
mod json;
mod types;
mod validate;

#[cfg(test)]
mod binary_tests;
#[cfg(test)]
mod json_tests;

pub use builder::{DfaStateDef, GrammarBuilder};
pub use error::GrammarError;
pub use types::{
    DfaState, Grammar, LabelKind, NONTERMINAL_BASE, Nonterminal, NonterminalId, Plan, StateId,
};
