use indoc::indoc;

use crate::{Grammar, GrammarError, LabelKind};

#[test]
fn load_rules_and_tokens() {
    let json = indoc! {r#"
        {
          "name": "sum",
          "tokens": { "ENDMARKER": 0, "NAME": 1, "PLUS": 14 },
          "operators": { "+": "PLUS" },
          "rules": {
            "sum": [
              { "arcs": [["NAME", 1]] },
              { "final": true, "arcs": [["'+'", 0]] }
            ]
          }
        }
    "#};

    let grammar = Grammar::from_json(json).unwrap();

    assert_eq!(grammar.name(), "sum");
    assert_eq!(grammar.name_token(), None);
    assert_eq!(grammar.labels_count(), 3);
    assert_eq!(grammar.label_kind(2), Some(&LabelKind::Token(14)));
    assert_eq!(grammar.token_type("PLUS"), Some(14));
    assert_eq!(grammar.token_name(0), Some("ENDMARKER"));
    assert_eq!(grammar.nonterminal_name(grammar.start()), Some("sum"));
}

#[test]
fn first_rule_is_default_start() {
    let json = indoc! {r#"
        {
          "name": "order",
          "tokens": { "NAME": 1 },
          "rules": {
            "outer": [{ "arcs": [["inner", 1]] }, { "final": true }],
            "inner": [{ "arcs": [["NAME", 1]] }, { "final": true }]
          }
        }
    "#};

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.nonterminal_name(grammar.start()), Some("outer"));
}

#[test]
fn explicit_start() {
    let json = indoc! {r#"
        {
          "name": "order",
          "start": "inner",
          "tokens": { "NAME": 1 },
          "rules": {
            "outer": [{ "arcs": [["inner", 1]] }, { "final": true }],
            "inner": [{ "arcs": [["NAME", 1]] }, { "final": true }]
          }
        }
    "#};

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.nonterminal_name(grammar.start()), Some("inner"));
}

#[test]
fn unknown_name_token() {
    let json = r#"{"name": "x", "name_token": "IDENT", "tokens": {"NAME": 1}, "rules": {}}"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert!(matches!(err, GrammarError::UnknownToken(ref name) if name == "IDENT"));
}

#[test]
fn malformed_json() {
    let err = Grammar::from_json(r#"{"name": "x", "rules": ["#).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));
    assert!(err.to_string().starts_with("JSON parse error"));
}

#[test]
fn rules_are_required() {
    let err = Grammar::from_json(r#"{"name": "x"}"#).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));
}
