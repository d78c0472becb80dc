use pgen_core::Position;

use super::test_grammars::{names, toy};
use crate::{Cst, CstBuilder, Parser};

fn leaf(value: &str) -> Cst {
    Cst::Leaf {
        token_type: "NAME".to_owned(),
        value: value.to_owned(),
        start: Position::default(),
        prefix: String::new(),
    }
}

#[test]
fn cst_json() {
    let grammar = toy();
    let tree = Parser::builder(&grammar, CstBuilder)
        .build()
        .unwrap()
        .parse(&names(&["a", "b"]))
        .unwrap();

    insta::assert_snapshot!(serde_json::to_string_pretty(&tree).unwrap(), @r#"
    {
      "kind": "node",
      "rule": "S",
      "children": [
        {
          "kind": "leaf",
          "type": "NAME",
          "value": "a",
          "start": [
            1,
            0
          ]
        },
        {
          "kind": "leaf",
          "type": "NAME",
          "value": "b",
          "start": [
            1,
            2
          ],
          "prefix": " "
        }
      ]
    }
    "#);
}

#[test]
fn cst_outline() {
    let tree = Cst::Node {
        rule: "S".to_owned(),
        children: vec![
            leaf("a"),
            Cst::Node {
                rule: "B".to_owned(),
                children: vec![leaf("b"), leaf("b")],
            },
            Cst::Error {
                token_type: "#99".to_owned(),
                value: "\t".to_owned(),
                start: Position::new(2, 0),
                prefix: String::new(),
            },
        ],
    };

    insta::assert_snapshot!(tree, @r#"
    S
      NAME "a"
      B
        NAME "b"
        NAME "b"
      ERROR #99 "\t"
    "#);
    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.rule(), Some("S"));
    assert!(tree.children()[2].is_error());
    assert!(tree.children()[0].children().is_empty());
}

#[test]
fn cst_source_keeps_prefixes() {
    let grammar = toy();
    let tree = Parser::builder(&grammar, CstBuilder)
        .build()
        .unwrap()
        .parse(&names(&["a", "b", "b"]))
        .unwrap();

    assert_eq!(tree.source(), "a b b");
    assert_eq!(tree.leaf_values(), ["a", "b", "b"]);
}
