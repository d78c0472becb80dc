//! Errors raised while loading or assembling a grammar table.

use crate::TokenType;

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary decode error: {0}")]
    Binary(#[from] postcard::Error),

    #[error("grammar has no rules")]
    NoRules,

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("rule `{0}` has no states")]
    EmptyRule(String),

    #[error("token `{name}` is declared with type {kind}, which is already `{existing}`")]
    DuplicateTokenType {
        name: String,
        kind: TokenType,
        existing: String,
    },

    #[error("unknown token `{0}`")]
    UnknownToken(String),

    #[error("rule `{rule}`: unknown label `{label}`")]
    UnknownLabel { rule: String, label: String },

    #[error("rule `{rule}`: state {state} has an arc to missing state {target}")]
    BadTarget {
        rule: String,
        state: usize,
        target: usize,
    },

    #[error("rule `{rule}`: state {state} has no arcs and is not final")]
    DeadState { rule: String, state: usize },

    #[error("keywords are used but no name token is declared")]
    MissingNameToken,

    #[error("left recursion for rule `{0}`")]
    LeftRecursion(String),

    #[error("rule `{rule}` is ambiguous: {label} starts more than one alternative")]
    AmbiguousFirst { rule: String, label: String },

    #[error("rule `{rule}`: state {state} has more than one transition on {label}")]
    Conflict {
        rule: String,
        state: usize,
        label: String,
    },

    #[error("unknown start rule `{0}`")]
    UnknownStart(String),

    #[error("grammar has too many {what} (at most {limit})")]
    TooLarge { what: &'static str, limit: usize },

    #[error("malformed table: {0}")]
    MalformedTable(String),
}
