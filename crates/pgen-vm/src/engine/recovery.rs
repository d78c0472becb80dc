//! Dead-end handling.
//!
//! When no frame can take a token, the engine hands the token to an
//! [`ErrorRecovery`] hook together with a [`Recovery`] context. The context
//! exposes the live stack and the operations the engine itself uses, plus
//! [`Recovery::add_token`] to feed tokens back in.

use pgen_core::{Grammar, NonterminalId, StateId, Token};

use super::error::{ErrorToken, ParseError};
use super::node::NodeBuilder;
use super::parser::Engine;
use super::stack::{Stack, StackNode};
use super::trace::Tracer;

/// Policy for tokens no frame can take.
pub trait ErrorRecovery<B: NodeBuilder> {
    /// Handle a dead end on `token`.
    ///
    /// Returning `Ok` resumes the parse with the next token, in whatever
    /// state the hook left the stack. Returning `Err` ends the parse.
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, B, T>,
        token: &Token,
    ) -> Result<(), ParseError>;
}

/// Access to a parse in progress, handed to recovery hooks.
pub struct Recovery<'a, 'g, B: NodeBuilder, T> {
    engine: &'a mut Engine<'g, B, T>,
}

impl<'a, 'g, B: NodeBuilder, T: Tracer> Recovery<'a, 'g, B, T> {
    pub(crate) fn new(engine: &'a mut Engine<'g, B, T>) -> Self {
        Self { engine }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.engine.grammar
    }

    pub fn stack(&self) -> &Stack<B::Node> {
        &self.engine.stack
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.engine.stack.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.engine.stack.len()
    }

    /// Nesting level of the current hook call, starting at 1.
    pub fn depth(&self) -> u32 {
        self.engine.recovery_depth
    }

    /// Reduce the top frame into its parent, as the engine does for a
    /// completed rule. Reducing the bottom frame completes the parse.
    /// Returns `false` on an empty stack, and fails with
    /// [`ParseError::TooMuchInput`] if the parse was already complete.
    pub fn pop(&mut self) -> Result<bool, ParseError> {
        self.engine.pop()
    }

    /// Remove the top frame without building anything from it.
    pub fn pop_frame(&mut self) -> Option<StackNode<B::Node>> {
        self.engine.stack.pop()
    }

    /// Push a frame in `state`, subject to the stack depth limit.
    pub fn push(&mut self, state: StateId) -> Result<(), ParseError> {
        self.engine.push(state)
    }

    /// Rebind the top frame's state. Returns `false` on an empty stack.
    pub fn set_state(&mut self, state: StateId) -> bool {
        match self.engine.stack.top_mut() {
            Some(top) => {
                top.state = state;
                true
            }
            None => false,
        }
    }

    /// Append to the top frame, or set the root once the stack is empty.
    ///
    /// Fails with [`ParseError::TooMuchInput`] when the stack is empty and
    /// the root is already set; the existing tree is kept.
    pub fn append(&mut self, node: B::Node) -> Result<(), ParseError> {
        self.engine.append(node)
    }

    pub fn leaf(&mut self, token: &Token) -> B::Node {
        self.engine.builder.leaf(self.engine.grammar, token)
    }

    pub fn error_leaf(&mut self, token: &Token) -> B::Node {
        self.engine.builder.error_leaf(self.engine.grammar, token)
    }

    pub fn node(&mut self, nonterminal: NonterminalId, children: Vec<B::Node>) -> B::Node {
        self.engine
            .builder
            .node(self.engine.grammar, nonterminal, children)
    }

    /// Feed a token through the engine, exactly as the parser does.
    ///
    /// Dead ends on the fed token call `hook` again, one nesting level
    /// deeper.
    pub fn add_token<R: ErrorRecovery<B>>(
        &mut self,
        token: &Token,
        hook: &mut R,
    ) -> Result<bool, ParseError> {
        self.engine.tracer.trace_reenter(token);
        self.engine.add_token(token, hook)
    }
}

/// Fail on the first dead end with a syntax error listing what the top
/// frame could have taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictRecovery;

impl<B: NodeBuilder> ErrorRecovery<B> for StrictRecovery {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, B, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let grammar = ctx.grammar();
        Err(ParseError::Syntax {
            token: ErrorToken::new(grammar, token),
            expected: ctx.stack().expected_tokens(grammar),
        })
    }
}

/// Keep going past dead ends: each offending token becomes an error leaf of
/// the top frame, so no input is lost from the tree.
#[derive(Clone, Debug, Default)]
pub struct SkipRecovery {
    errors: Vec<ErrorToken>,
}

impl SkipRecovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens skipped so far.
    pub fn errors(&self) -> &[ErrorToken] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorToken> {
        self.errors
    }
}

impl<B: NodeBuilder> ErrorRecovery<B> for SkipRecovery {
    fn recover<T: Tracer>(
        &mut self,
        ctx: &mut Recovery<'_, '_, B, T>,
        token: &Token,
    ) -> Result<(), ParseError> {
        self.errors.push(ErrorToken::new(ctx.grammar(), token));
        let leaf = ctx.error_leaf(token);
        ctx.append(leaf)
    }
}
