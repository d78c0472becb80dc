//! Lexical tokens as the tokenizer hands them to the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token type number, as assigned by the tokenizer.
pub type TokenType = u16;

/// Source position of a token's first character.
///
/// Lines are 1-based, columns 0-based. Serialized as a `[line, column]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Self { line, column }
    }
}

impl From<Position> for (u32, u32) {
    fn from(pos: Position) -> Self {
        (pos.line, pos.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// One lexical token.
///
/// `prefix` holds the leading trivia (whitespace, comments) so that a tree
/// built from tokens can reproduce the source exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub value: String,
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub prefix: String,
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, start: impl Into<Position>) -> Self {
        Self {
            kind,
            value: value.into(),
            start: start.into(),
            prefix: String::new(),
        }
    }

    /// Set the leading trivia.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
