//! Parser state and the token loop.

use std::borrow::Borrow;

use pgen_core::{Grammar, Nonterminal, NonterminalId, Plan, StateId, Token};

use super::error::{ErrorToken, ParseError};
use super::label::token_to_label;
use super::node::NodeBuilder;
use super::recovery::{ErrorRecovery, Recovery, StrictRecovery};
use super::stack::Stack;
use super::trace::{NoopTracer, Tracer};

/// Resource limits for a parse.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Maximum number of frames on the stack (default: 10,000).
    pub(crate) max_stack_depth: u32,
    /// Maximum nesting of recovery hook calls (default: 64).
    pub(crate) max_recovery_depth: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_stack_depth: 10_000,
            max_recovery_depth: 64,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_stack_depth(mut self, depth: u32) -> Self {
        self.max_stack_depth = depth;
        self
    }

    pub fn max_recovery_depth(mut self, depth: u32) -> Self {
        self.max_recovery_depth = depth;
        self
    }

    pub fn get_max_stack_depth(&self) -> u32 {
        self.max_stack_depth
    }
    pub fn get_max_recovery_depth(&self) -> u32 {
        self.max_recovery_depth
    }
}

#[derive(Clone, Debug)]
enum Start {
    Default,
    Name(String),
    Number(NonterminalId),
}

/// Builder for [`Parser`] instances.
pub struct ParserBuilder<'g, B, R = StrictRecovery, T = NoopTracer> {
    grammar: &'g Grammar,
    builder: B,
    recovery: R,
    tracer: T,
    limits: Limits,
    start: Start,
}

impl<'g, B: NodeBuilder> ParserBuilder<'g, B> {
    pub fn new(grammar: &'g Grammar, builder: B) -> Self {
        Self {
            grammar,
            builder,
            recovery: StrictRecovery,
            tracer: NoopTracer,
            limits: Limits::default(),
            start: Start::Default,
        }
    }
}

impl<'g, B: NodeBuilder, R, T> ParserBuilder<'g, B, R, T> {
    /// Set the dead-end policy.
    pub fn recovery<R2: ErrorRecovery<B>>(self, recovery: R2) -> ParserBuilder<'g, B, R2, T> {
        ParserBuilder {
            grammar: self.grammar,
            builder: self.builder,
            recovery,
            tracer: self.tracer,
            limits: self.limits,
            start: self.start,
        }
    }

    pub fn tracer<T2: Tracer>(self, tracer: T2) -> ParserBuilder<'g, B, R, T2> {
        ParserBuilder {
            grammar: self.grammar,
            builder: self.builder,
            recovery: self.recovery,
            tracer,
            limits: self.limits,
            start: self.start,
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_stack_depth(mut self, depth: u32) -> Self {
        self.limits = self.limits.max_stack_depth(depth);
        self
    }

    pub fn max_recovery_depth(mut self, depth: u32) -> Self {
        self.limits = self.limits.max_recovery_depth(depth);
        self
    }

    /// Start from the named rule instead of the grammar's default.
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Start::Name(name.into());
        self
    }

    /// Start from the rule with this nonterminal number.
    pub fn start_number(mut self, number: NonterminalId) -> Self {
        self.start = Start::Number(number);
        self
    }

    pub fn build(self) -> Result<Parser<'g, B, R, T>, ParseError>
    where
        R: ErrorRecovery<B>,
        T: Tracer,
    {
        let grammar = self.grammar;
        let start = match &self.start {
            Start::Default => grammar.nonterminal(grammar.start()),
            Start::Name(name) => grammar.nonterminal_by_name(name),
            Start::Number(number) => grammar.nonterminal(*number),
        };
        let Some(start) = start else {
            let name = match self.start {
                Start::Default => grammar.start().to_string(),
                Start::Name(name) => name,
                Start::Number(number) => number.to_string(),
            };
            return Err(ParseError::UnknownStart(name));
        };

        Ok(Parser {
            engine: Engine::new(grammar, self.builder, self.tracer, self.limits, start),
            recovery: self.recovery,
        })
    }
}

/// One parse of one token stream.
///
/// Tokens go in one at a time through [`add_token`](Self::add_token); the
/// tree comes out of [`finish`](Self::finish). A parser is not reusable after
/// `finish`, but [`restart`](Self::restart) turns it into a fresh one that
/// keeps the builder, recovery hook, tracer and limits.
pub struct Parser<'g, B: NodeBuilder, R = StrictRecovery, T = NoopTracer> {
    engine: Engine<'g, B, T>,
    recovery: R,
}

impl<'g, B: NodeBuilder> Parser<'g, B> {
    pub fn builder(grammar: &'g Grammar, builder: B) -> ParserBuilder<'g, B> {
        ParserBuilder::new(grammar, builder)
    }
}

impl<'g, B: NodeBuilder, R: ErrorRecovery<B>, T: Tracer> Parser<'g, B, R, T> {
    pub fn grammar(&self) -> &'g Grammar {
        self.engine.grammar
    }

    /// Nonterminal number of the start rule.
    pub fn start(&self) -> NonterminalId {
        self.engine.start
    }

    pub fn stack(&self) -> &Stack<B::Node> {
        &self.engine.stack
    }

    pub fn recovery(&self) -> &R {
        &self.recovery
    }

    pub fn tracer(&self) -> &T {
        &self.engine.tracer
    }

    /// Feed one token.
    ///
    /// Returns whether the input could legally end after this token.
    pub fn add_token(&mut self, token: &Token) -> Result<bool, ParseError> {
        self.engine.add_token(token, &mut self.recovery)
    }

    /// End the stream: reduce every completed frame and return the root.
    pub fn finish(&mut self) -> Result<B::Node, ParseError> {
        self.engine.finish()
    }

    /// Feed every token, then [`finish`](Self::finish).
    pub fn parse<I>(&mut self, tokens: I) -> Result<B::Node, ParseError>
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
    {
        for token in tokens {
            self.add_token(token.borrow())?;
        }
        self.finish()
    }

    /// Fresh parser for the named start rule.
    pub fn restart(self, start: &str) -> Result<Self, ParseError> {
        let grammar = self.engine.grammar;
        let start = grammar
            .nonterminal_by_name(start)
            .ok_or_else(|| ParseError::UnknownStart(start.to_owned()))?;
        let Engine {
            builder,
            tracer,
            limits,
            ..
        } = self.engine;

        Ok(Self {
            engine: Engine::new(grammar, builder, tracer, limits, start),
            recovery: self.recovery,
        })
    }
}

/// Everything a parse owns except the recovery hook, so the hook can be
/// borrowed alongside it.
pub(crate) struct Engine<'g, B: NodeBuilder, T> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) builder: B,
    pub(crate) tracer: T,
    pub(crate) limits: Limits,
    pub(crate) start: NonterminalId,
    pub(crate) stack: Stack<B::Node>,
    /// Set exactly once, when the bottom frame is reduced.
    pub(crate) root: Option<B::Node>,
    /// Last token fed, for end-of-input diagnostics.
    last: Option<Token>,
    pub(crate) recovery_depth: u32,
}

impl<'g, B: NodeBuilder, T: Tracer> Engine<'g, B, T> {
    fn new(grammar: &'g Grammar, builder: B, tracer: T, limits: Limits, start: &Nonterminal) -> Self {
        Self {
            grammar,
            builder,
            tracer,
            limits,
            start: start.number(),
            stack: Stack::new(start.start()),
            root: None,
            last: None,
            recovery_depth: 0,
        }
    }

    pub(crate) fn add_token<R: ErrorRecovery<B>>(
        &mut self,
        token: &Token,
        hook: &mut R,
    ) -> Result<bool, ParseError> {
        let grammar = self.grammar;
        let label = token_to_label(grammar, token.kind, &token.value);
        self.tracer.trace_token(token, label);
        self.last = Some(token.clone());

        let (from, plan) = loop {
            let Some(top) = self.stack.top() else {
                return Err(ParseError::TooMuchInput(ErrorToken::new(grammar, token)));
            };
            let from = top.state;
            let state = grammar.state(from);
            if let Some(plan) = label.and_then(|label| state.plan(label)) {
                break (from, plan);
            }
            // The bottom frame is never reduced here: a token it cannot take
            // is a dead end even once the start rule could end.
            if state.is_final() && self.stack.len() > 1 {
                self.pop()?;
                continue;
            }
            self.tracer.trace_dead_end(from);
            self.recover(token, hook)?;
            return Ok(self.is_accepting());
        };

        self.shift(from, plan, token)?;
        Ok(self.is_accepting())
    }

    fn shift(&mut self, from: StateId, plan: &Plan, token: &Token) -> Result<(), ParseError> {
        // Checked up front so a rejected token leaves the stack untouched.
        let limit = self.limits.max_stack_depth;
        if self.stack.len() + plan.pushes.len() > limit as usize {
            return Err(ParseError::StackDepthExceeded(limit));
        }
        if let Some(top) = self.stack.top_mut() {
            top.state = plan.next;
        }
        for &state in &plan.pushes {
            self.stack.push(state);
        }
        self.tracer.trace_shift(from, plan, self.stack.len());

        let leaf = self.builder.leaf(self.grammar, token);
        self.append(leaf)
    }

    fn recover<R: ErrorRecovery<B>>(&mut self, token: &Token, hook: &mut R) -> Result<(), ParseError> {
        let limit = self.limits.max_recovery_depth;
        if self.recovery_depth >= limit {
            return Err(ParseError::RecoveryDepthExceeded(limit));
        }
        self.recovery_depth += 1;
        self.tracer.trace_recover(self.recovery_depth);
        let result = hook.recover(&mut Recovery::new(self), token);
        self.recovery_depth -= 1;
        result
    }

    pub(crate) fn finish(&mut self) -> Result<B::Node, ParseError> {
        while self.top_is_final() {
            self.pop()?;
        }

        if self.stack.is_empty()
            && let Some(root) = self.root.take()
        {
            self.tracer.trace_finish(true);
            return Ok(root);
        }

        self.tracer.trace_finish(false);
        Err(ParseError::IncompleteInput(self.last_token()))
    }

    /// Last token fed, or the end marker before any token.
    fn last_token(&self) -> ErrorToken {
        match &self.last {
            Some(token) => ErrorToken::new(self.grammar, token),
            None => ErrorToken::end_of_input(self.grammar),
        }
    }

    fn top_is_final(&self) -> bool {
        self.stack
            .top()
            .is_some_and(|top| self.grammar.state(top.state).is_final())
    }

    pub(crate) fn is_accepting(&self) -> bool {
        self.stack.is_accepting(self.grammar)
    }

    pub(crate) fn push(&mut self, state: StateId) -> Result<(), ParseError> {
        let limit = self.limits.max_stack_depth;
        if self.stack.len() >= limit as usize {
            return Err(ParseError::StackDepthExceeded(limit));
        }
        self.stack.push(state);
        Ok(())
    }

    /// Append to the top frame, or make `node` the root once the stack is
    /// empty. A second root is too much input: the first one is kept.
    pub(crate) fn append(&mut self, node: B::Node) -> Result<(), ParseError> {
        match self.stack.top_mut() {
            Some(top) => top.children.push(node),
            None if self.root.is_some() => {
                return Err(ParseError::TooMuchInput(self.last_token()));
            }
            None => self.root = Some(node),
        }
        Ok(())
    }

    /// Reduce the top frame into its parent. Returns `false` on an empty
    /// stack.
    pub(crate) fn pop(&mut self) -> Result<bool, ParseError> {
        let Some(frame) = self.stack.pop() else {
            return Ok(false);
        };
        let nonterminal = self.grammar.state(frame.state).nonterminal();
        let count = frame.children.len();
        let node = match <[B::Node; 1]>::try_from(frame.children) {
            Ok([child]) => child,
            Err(children) => self.builder.node(self.grammar, nonterminal, children),
        };
        self.tracer.trace_reduce(nonterminal, count, self.stack.len());
        self.append(node)?;
        Ok(true)
    }
}
