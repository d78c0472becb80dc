use pgen_core::Token;

use super::test_grammars::{NAME, calc, lex, names, toy};
use crate::{
    CstBuilder, ErrorRecovery, ParseError, Parser, Recovery, SkipRecovery, StrictRecovery, Tracer,
};

/// Inserts the single keyword the top frame expects, then feeds the
/// offending token again. Nested dead ends keep the token as an error leaf.
struct InsertExpected;

impl ErrorRecovery<CstBuilder> for InsertExpected {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let expected = ctx.stack().expected_tokens(ctx.grammar());
        if ctx.depth() == 1
            && let [only] = expected.as_slice()
            && let Some(spelling) = only.strip_prefix('\'').and_then(|s| s.strip_suffix('\''))
        {
            let inserted = Token::new(NAME, spelling, token.start);
            ctx.add_token(&inserted, self)?;
            ctx.add_token(token, self)?;
            return Ok(());
        }
        let leaf = ctx.error_leaf(token);
        ctx.append(leaf)
    }
}

/// Pretends `B` matched the offending token.
struct Repair;

impl ErrorRecovery<CstBuilder> for Repair {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let grammar = ctx.grammar();
        let s = grammar.nonterminal_by_name("S").unwrap();
        let b = grammar.nonterminal_by_name("B").unwrap();

        assert!(ctx.set_state(s.states()[2]));
        ctx.push(b.states()[1])?;
        let leaf = ctx.error_leaf(token);
        ctx.append(leaf)
    }
}

/// Closes the top rule with whatever it matched so far and drops the token.
struct CloseRule;

impl ErrorRecovery<CstBuilder> for CloseRule {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let grammar = ctx.grammar();
        let Some(frame) = ctx.pop_frame() else {
            return StrictRecovery.recover(ctx, token);
        };
        let nonterminal = frame.nonterminal(grammar).number();
        let node = ctx.node(nonterminal, frame.into_children());
        ctx.append(node)
    }
}

/// Records what the context shows, then fails.
#[derive(Default)]
struct Observe {
    seen: Option<(usize, u32, String, usize)>,
}

impl ErrorRecovery<CstBuilder> for Observe {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let grammar = ctx.grammar();
        let rule = ctx.stack().tos_nonterminal(grammar).unwrap().name().to_owned();
        self.seen = Some((ctx.len(), ctx.depth(), rule, ctx.stack().tos_nodes().len()));
        assert!(!ctx.is_empty());
        StrictRecovery.recover(ctx, token)
    }
}

/// Completes the parse, then tries to record the token as a second root.
struct DrainThenAppend;

impl ErrorRecovery<CstBuilder> for DrainThenAppend {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        while ctx.pop()? {}
        let leaf = ctx.error_leaf(token);
        ctx.append(leaf)
    }
}

/// Completes the parse, opens a fresh start frame and reduces it again.
struct Restart;

impl ErrorRecovery<CstBuilder> for Restart {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, CstBuilder, T>,
        _token: &Token,
    ) -> Result<(), ParseError> {
        while ctx.pop()? {}
        let start = ctx.grammar().nonterminal_by_name("S").unwrap().start();
        ctx.push(start)?;
        ctx.pop()?;
        Ok(())
    }
}

#[test]
fn skip_keeps_trailing_token() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(SkipRecovery::new())
        .build()
        .unwrap();

    let tree = parser.parse(&names(&["a", "b", "c"])).unwrap();

    insta::assert_snapshot!(tree, @r#"
    S
      NAME "a"
      NAME "b"
      ERROR NAME "c"
    "#);
    let errors: Vec<String> = parser.recovery().errors().iter().map(ToString::to_string).collect();
    assert_eq!(errors, ["type=NAME, value='c', start_pos=(1, 4)"]);
}

#[test]
fn skip_preserves_every_token() {
    let grammar = calc();
    let tokens = lex("1 $ 2\n");
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(SkipRecovery::new())
        .build()
        .unwrap();

    let tree = parser.parse(&tokens).unwrap();

    insta::assert_snapshot!(tree, @r#"
    file
      stmt
        NUMBER "1"
        ERROR #99 "$"
        ERROR NUMBER "2"
        NEWLINE "\n"
      ENDMARKER ""
    "#);
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(tree.leaf_values(), values);
    assert_eq!(parser.recovery().errors().len(), 2);
}

#[test]
fn insert_missing_keyword_and_refeed() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(InsertExpected)
        .build()
        .unwrap();

    let tree = parser.parse(&names(&["a", "c"])).unwrap();

    insta::assert_snapshot!(tree, @r#"
    S
      NAME "a"
      NAME "b"
      ERROR NAME "c"
    "#);
}

#[test]
fn repair_by_rebinding_and_pushing() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(Repair)
        .build()
        .unwrap();

    let tree = parser.parse(&names(&["a", "c"])).unwrap();

    insta::assert_snapshot!(tree, @r#"
    S
      NAME "a"
      ERROR NAME "c"
    "#);
}

#[test]
fn close_rule_from_raw_frame() {
    let grammar = calc();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(CloseRule)
        .build()
        .unwrap();

    let tree = parser.parse(&lex("x $ y\n")).unwrap();

    insta::assert_snapshot!(tree, @r#"
    file
      stmt
        NAME "x"
      stmt
        NAME "y"
        NEWLINE "\n"
      ENDMARKER ""
    "#);
}

#[test]
fn context_exposes_live_stack() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(Observe::default())
        .build()
        .unwrap();

    let err = parser.parse(&names(&["a", "c"])).unwrap_err();

    assert!(matches!(err, ParseError::Syntax { ref expected, .. } if expected == &["'b'"]));
    assert_eq!(parser.recovery().seen, Some((1, 1, "S".to_owned(), 1)));
}

#[test]
fn zero_recovery_depth_disables_hook() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(SkipRecovery::new())
        .max_recovery_depth(0)
        .build()
        .unwrap();

    let err = parser.parse(&names(&["a", "c"])).unwrap_err();

    assert_eq!(err, ParseError::RecoveryDepthExceeded(0));
    assert!(parser.recovery().errors().is_empty());
}

#[test]
fn append_after_completion_keeps_root() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(DrainThenAppend)
        .build()
        .unwrap();

    let err = parser.parse(&names(&["a", "b", "c"])).unwrap_err();

    assert!(matches!(err, ParseError::TooMuchInput(ref token) if token.value == "c"));
    insta::assert_snapshot!(err, @"too much input: type=NAME, value='c', start_pos=(1, 4)");
}

#[test]
fn second_reduction_into_empty_stack_fails() {
    let grammar = toy();
    let mut parser = Parser::builder(&grammar, CstBuilder)
        .recovery(Restart)
        .build()
        .unwrap();

    let err = parser.parse(&names(&["a", "b", "c"])).unwrap_err();

    assert!(matches!(err, ParseError::TooMuchInput(_)));
}
