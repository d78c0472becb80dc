use crate::{Colors, DfaStateDef, Grammar, GrammarBuilder, GrammarError, StateId};

fn toy() -> Grammar {
    GrammarBuilder::new("toy")
        .name_token(1)
        .token("ENDMARKER", 0)
        .token("NAME", 1)
        .rule(
            "S",
            [
                DfaStateDef::new().arc("'a'", 1),
                DfaStateDef::new().arc("B", 2),
                DfaStateDef::accepting(),
            ],
        )
        .rule(
            "B",
            [
                DfaStateDef::new().arc("'b'", 1),
                DfaStateDef::accepting().arc("'b'", 2),
                DfaStateDef::accepting(),
            ],
        )
        .build()
        .unwrap()
}

#[test]
fn binary_preserves_table() {
    let grammar = toy();
    let bytes = grammar.to_binary();
    let loaded = Grammar::from_binary(&bytes).unwrap();

    assert_eq!(loaded.dump(Colors::OFF), grammar.dump(Colors::OFF));
    assert_eq!(loaded.keyword_label("b"), Some(3));
    assert_eq!(loaded.name_token(), Some(1));
}

#[test]
fn truncated_binary() {
    let bytes = toy().to_binary();
    let err = Grammar::from_binary(&bytes[..bytes.len() / 2]).unwrap_err();

    assert!(matches!(err, GrammarError::Binary(_)));
}

fn reload(grammar: &Grammar) -> GrammarError {
    Grammar::from_binary(&grammar.to_binary()).unwrap_err()
}

#[test]
fn dangling_plan_target() {
    let mut grammar = toy();
    let plan = grammar.states[0].transitions.get_mut(&2).unwrap();
    plan.next = StateId::from_index(999);

    insta::assert_snapshot!(reload(&grammar), @"malformed table: state #999 is out of range (6 states)");
}

#[test]
fn dangling_push() {
    let mut grammar = toy();
    let plan = grammar.states[1].transitions.get_mut(&3).unwrap();
    plan.pushes.push(StateId::from_index(6));

    insta::assert_snapshot!(reload(&grammar), @"malformed table: state #6 is out of range (6 states)");
}

#[test]
fn transition_label_out_of_range() {
    let mut grammar = toy();
    let plan = grammar.states[0].transitions.remove(&2).unwrap();
    grammar.states[0].transitions.insert(40, plan);

    insta::assert_snapshot!(reload(&grammar), @"malformed table: label 40 is out of range (4 labels)");
}

#[test]
fn nonterminal_without_states() {
    let mut grammar = toy();
    grammar.nonterminals[1].states.clear();

    insta::assert_snapshot!(reload(&grammar), @"malformed table: nonterminal `B` has no states");
}

#[test]
fn state_owned_by_missing_nonterminal() {
    let mut grammar = toy();
    grammar.states[4].nonterminal = 700;

    insta::assert_snapshot!(reload(&grammar), @"malformed table: state #4 is listed by `B` but owned by 700");
}

#[test]
fn unknown_start_nonterminal() {
    let mut grammar = toy();
    grammar.start = 300;

    let err = reload(&grammar);
    assert!(matches!(err, GrammarError::MalformedTable(_)));
    insta::assert_snapshot!(err, @"malformed table: start nonterminal 300 does not exist");
}
