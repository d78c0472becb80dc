//! Pushdown automaton engine for pgen grammar tables.
//!
//! This crate runs assembled `Grammar` tables against a token stream,
//! building a syntax tree bottom-up through caller-supplied node builders.

pub mod engine;

pub use engine::{
    Cst, CstBuilder, ErrorRecovery, ErrorToken, Limits, NodeBuilder, NoopTracer, ParseError,
    Parser, ParserBuilder, PrintTracer, Recovery, SkipRecovery, Stack, StackNode, StrictRecovery,
    Tracer, Verbosity, token_to_label,
};
pub use pgen_core::{Colors, Grammar, Position, Token, TokenType};
