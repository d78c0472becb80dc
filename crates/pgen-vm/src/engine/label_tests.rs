use super::test_grammars::{ENDMARKER, NAME, NUMBER, UNKNOWN, calc, toy};
use crate::token_to_label;

#[test]
fn keywords_shadow_name_token() {
    let grammar = toy();

    assert_eq!(token_to_label(&grammar, NAME, "a"), grammar.keyword_label("a"));
    assert_eq!(token_to_label(&grammar, NAME, "b"), Some(3));
    assert_eq!(token_to_label(&grammar, NAME, "c"), grammar.token_label(NAME));
}

#[test]
fn keywords_only_apply_to_name_token() {
    let grammar = calc();

    assert_eq!(token_to_label(&grammar, NAME, "pass"), grammar.keyword_label("pass"));
    assert_eq!(token_to_label(&grammar, NUMBER, "pass"), grammar.token_label(NUMBER));
}

#[test]
fn token_types_resolve_directly() {
    let grammar = toy();

    assert_eq!(token_to_label(&grammar, ENDMARKER, ""), Some(0));
    assert_eq!(token_to_label(&grammar, UNKNOWN, "x"), None);
}
