//! Pushdown stack of rule frames.
//!
//! The bottom frame belongs to the start rule, the top frame to the
//! innermost rule being matched. Each frame collects the children its rule
//! has matched so far.

use pgen_core::{Grammar, Label, Nonterminal, StateId};

/// One level of the pushdown stack.
#[derive(Clone, Debug)]
pub struct StackNode<N> {
    pub(crate) state: StateId,
    pub(crate) children: Vec<N>,
}

impl<N> StackNode<N> {
    pub(crate) fn new(state: StateId) -> Self {
        Self {
            state,
            children: Vec::new(),
        }
    }

    /// Current DFA state.
    #[inline]
    pub fn state(&self) -> StateId {
        self.state
    }

    #[inline]
    pub fn children(&self) -> &[N] {
        &self.children
    }

    /// The rule this frame is matching.
    pub fn nonterminal<'g>(&self, grammar: &'g Grammar) -> &'g Nonterminal {
        grammar.owner(self.state)
    }

    pub fn into_children(self) -> Vec<N> {
        self.children
    }
}

/// Frames of one parse, bottom first.
#[derive(Clone, Debug)]
pub struct Stack<N> {
    frames: Vec<StackNode<N>>,
}

impl<N> Stack<N> {
    /// Stack with a single frame in `start`.
    pub(crate) fn new(start: StateId) -> Self {
        Self {
            frames: vec![StackNode::new(start)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn top(&self) -> Option<&StackNode<N>> {
        self.frames.last()
    }

    #[inline]
    pub(crate) fn top_mut(&mut self) -> Option<&mut StackNode<N>> {
        self.frames.last_mut()
    }

    /// Frames, bottom first.
    pub fn frames(&self) -> &[StackNode<N>] {
        &self.frames
    }

    pub(crate) fn push(&mut self, state: StateId) {
        self.frames.push(StackNode::new(state));
    }

    pub(crate) fn pop(&mut self) -> Option<StackNode<N>> {
        self.frames.pop()
    }

    /// Children collected by the top frame so far.
    pub fn tos_nodes(&self) -> &[N] {
        match self.top() {
            Some(frame) => &frame.children,
            None => &[],
        }
    }

    /// Rule of the top frame.
    pub fn tos_nonterminal<'g>(&self, grammar: &'g Grammar) -> Option<&'g Nonterminal> {
        self.top().map(|frame| frame.nonterminal(grammar))
    }

    /// Display names of the labels that can begin the top frame's rule.
    pub fn tos_first_tokens(&self, grammar: &Grammar) -> Vec<String> {
        let Some(nt) = self.tos_nonterminal(grammar) else {
            return Vec::new();
        };
        label_names(grammar, nt.first().iter().copied())
    }

    /// Display names of the labels the top frame's state can take.
    pub fn expected_tokens(&self, grammar: &Grammar) -> Vec<String> {
        let Some(frame) = self.top() else {
            return Vec::new();
        };
        label_names(grammar, grammar.state(frame.state).labels())
    }

    /// Whether the input could end here: every frame sits in a final state.
    pub fn is_accepting(&self, grammar: &Grammar) -> bool {
        self.frames
            .iter()
            .all(|frame| grammar.state(frame.state).is_final())
    }
}

fn label_names(grammar: &Grammar, labels: impl Iterator<Item = Label>) -> Vec<String> {
    let mut names: Vec<String> = labels.map(|label| grammar.label_name(label)).collect();
    names.sort_unstable();
    names.dedup();
    names
}
