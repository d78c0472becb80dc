//! Default concrete syntax tree.

use std::fmt;

use pgen_core::{Grammar, NonterminalId, Position, Token};
use serde::Serialize;

use super::node::NodeBuilder;

/// Concrete syntax tree node.
///
/// Leaves keep the token's value, position and prefix, so the tree holds
/// the whole input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cst {
    Node {
        rule: String,
        children: Vec<Cst>,
    },
    Leaf {
        #[serde(rename = "type")]
        token_type: String,
        value: String,
        start: Position,
        #[serde(skip_serializing_if = "String::is_empty")]
        prefix: String,
    },
    /// Token kept by error recovery outside the grammar's structure.
    Error {
        #[serde(rename = "type")]
        token_type: String,
        value: String,
        start: Position,
        #[serde(skip_serializing_if = "String::is_empty")]
        prefix: String,
    },
}

impl Cst {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Rule name for internal nodes.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::Node { rule, .. } => Some(rule),
            Self::Leaf { .. } | Self::Error { .. } => None,
        }
    }

    pub fn children(&self) -> &[Cst] {
        match self {
            Self::Node { children, .. } => children,
            Self::Leaf { .. } | Self::Error { .. } => &[],
        }
    }

    /// Leaf values in source order, error leaves included.
    pub fn leaf_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Self::Leaf { value, .. } | Self::Error { value, .. } => out.push(value),
        }
    }

    /// Source text: every leaf's prefix followed by its value.
    pub fn source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Self::Node { children, .. } => {
                for child in children {
                    child.write_source(out);
                }
            }
            Self::Leaf { value, prefix, .. } | Self::Error { value, prefix, .. } => {
                out.push_str(prefix);
                out.push_str(value);
            }
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        match self {
            Self::Node { rule, children } => {
                write!(f, "{:indent$}{rule}", "")?;
                for child in children {
                    writeln!(f)?;
                    child.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
            Self::Leaf {
                token_type, value, ..
            } => write!(f, "{:indent$}{token_type} {value:?}", ""),
            Self::Error {
                token_type, value, ..
            } => write!(f, "{:indent$}ERROR {token_type} {value:?}", ""),
        }
    }
}

/// Indented outline, one node per line.
impl fmt::Display for Cst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// [`NodeBuilder`] producing [`Cst`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct CstBuilder;

impl CstBuilder {
    fn token_type(grammar: &Grammar, token: &Token) -> String {
        grammar.token_display_name(token.kind)
    }
}

impl NodeBuilder for CstBuilder {
    type Node = Cst;

    fn leaf(&mut self, grammar: &Grammar, token: &Token) -> Cst {
        Cst::Leaf {
            token_type: Self::token_type(grammar, token),
            value: token.value.clone(),
            start: token.start,
            prefix: token.prefix.clone(),
        }
    }

    fn node(&mut self, grammar: &Grammar, nonterminal: NonterminalId, children: Vec<Cst>) -> Cst {
        Cst::Node {
            rule: grammar
                .nonterminal_name(nonterminal)
                .unwrap_or("?")
                .to_owned(),
            children,
        }
    }

    fn error_leaf(&mut self, grammar: &Grammar, token: &Token) -> Cst {
        Cst::Error {
            token_type: Self::token_type(grammar, token),
            value: token.value.clone(),
            start: token.start,
            prefix: token.prefix.clone(),
        }
    }
}
