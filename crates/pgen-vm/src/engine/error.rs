//! Errors that end a parse.

use std::fmt;

use pgen_core::{Grammar, Position, Token, TokenType};

/// Token reported by a parse error, with its type name resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorToken {
    pub token_type: TokenType,
    /// Grammar name of `token_type`, or `?` if the grammar has none.
    pub type_name: String,
    pub value: String,
    pub start: Position,
}

impl ErrorToken {
    pub fn new(grammar: &Grammar, token: &Token) -> Self {
        Self {
            token_type: token.kind,
            type_name: type_name(grammar, token.kind),
            value: token.value.clone(),
            start: token.start,
        }
    }

    /// Empty token standing for the end of a stream that had no tokens.
    pub(crate) fn end_of_input(grammar: &Grammar) -> Self {
        Self {
            token_type: 0,
            type_name: type_name(grammar, 0),
            value: String::new(),
            start: Position::default(),
        }
    }
}

fn type_name(grammar: &Grammar, kind: TokenType) -> String {
    grammar.token_name(kind).unwrap_or("?").to_owned()
}

impl fmt::Display for ErrorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={}, value='{}', start_pos={}",
            self.type_name,
            self.value.escape_debug(),
            self.start
        )
    }
}

/// Errors that end the current parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A token arrived after the start rule was already complete.
    #[error("too much input: {0}")]
    TooMuchInput(ErrorToken),

    /// The stream ended while a rule still expected more tokens.
    #[error("incomplete input: {0}")]
    IncompleteInput(ErrorToken),

    /// A token no rule on the stack can take. Raised by recovery policies.
    #[error("invalid syntax: {token}{}", expected_suffix(.expected))]
    Syntax {
        token: ErrorToken,
        expected: Vec<String>,
    },

    #[error("unknown start rule `{0}`")]
    UnknownStart(String),

    #[error("stack depth limit of {0} frames exceeded")]
    StackDepthExceeded(u32),

    #[error("recovery nested more than {0} levels deep")]
    RecoveryDepthExceeded(u32),
}

fn expected_suffix(expected: &[String]) -> String {
    if expected.is_empty() {
        return String::new();
    }
    format!("; expected {}", expected.join(", "))
}

impl ParseError {
    /// Whether the error comes from the automaton itself rather than from a
    /// recovery policy or a configuration problem.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::TooMuchInput(_) | Self::IncompleteInput(_))
    }

    /// The offending token, for errors that have one.
    pub fn token(&self) -> Option<&ErrorToken> {
        match self {
            Self::TooMuchInput(token)
            | Self::IncompleteInput(token)
            | Self::Syntax { token, .. } => Some(token),
            Self::UnknownStart(_) | Self::StackDepthExceeded(_) | Self::RecoveryDepthExceeded(_) => {
                None
            }
        }
    }
}
