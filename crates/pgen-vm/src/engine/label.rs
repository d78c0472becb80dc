//! Token to label resolution.

use pgen_core::{Grammar, Label, TokenType};

/// Resolve a token to its transition label.
///
/// Identifier tokens whose spelling is a keyword resolve to the keyword's
/// label, so keywords shadow identifiers. Everything else resolves by token
/// type. `None` means the grammar never mentions this token; the engine
/// treats that as a dead end rather than an error.
pub fn token_to_label(grammar: &Grammar, kind: TokenType, value: &str) -> Option<Label> {
    if grammar.name_token() == Some(kind)
        && let Some(label) = grammar.keyword_label(value)
    {
        return Some(label);
    }
    grammar.token_label(kind)
}
