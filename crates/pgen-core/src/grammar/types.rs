//! Assembled grammar table types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Label, TokenType};

/// Nonterminal number. Numbers start at [`NONTERMINAL_BASE`], below which
/// lie the token types, as in classic pgen tables.
pub type NonterminalId = u16;

/// Number of the first nonterminal.
pub const NONTERMINAL_BASE: NonterminalId = 256;

/// Index of a DFA state in the grammar's state arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Effect of one transition.
///
/// `next` is the successor state in the same nonterminal. `pushes` lists the
/// nested nonterminals this single token enters, outermost first; each entry
/// is the nested frame's state after the token has been consumed, so the
/// token's leaf belongs to the last one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub next: StateId,
    pub pushes: Vec<StateId>,
}

/// One state of one nonterminal's DFA.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DfaState {
    pub(crate) nonterminal: NonterminalId,
    pub(crate) is_final: bool,
    pub(crate) transitions: BTreeMap<Label, Plan>,
}

impl DfaState {
    /// Number of the nonterminal this state belongs to.
    #[inline]
    pub fn nonterminal(&self) -> NonterminalId {
        self.nonterminal
    }

    /// Whether the rule may legally end in this state.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    #[inline]
    pub fn plan(&self, label: Label) -> Option<&Plan> {
        self.transitions.get(&label)
    }

    /// Transitions in label order.
    pub fn transitions(&self) -> impl Iterator<Item = (Label, &Plan)> {
        self.transitions.iter().map(|(&label, plan)| (label, plan))
    }

    /// Labels this state can take, in label order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.transitions.keys().copied()
    }
}

/// A grammar rule: name, DFA states and first set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nonterminal {
    pub(crate) number: NonterminalId,
    pub(crate) name: String,
    /// Contiguous state ids; the first one is the start state.
    pub(crate) states: Vec<StateId>,
    pub(crate) first: BTreeSet<Label>,
}

impl Nonterminal {
    #[inline]
    pub fn number(&self) -> NonterminalId {
        self.number
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start state of the rule's DFA.
    #[inline]
    pub fn start(&self) -> StateId {
        self.states[0]
    }

    #[inline]
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// Labels that can begin this rule.
    #[inline]
    pub fn first(&self) -> &BTreeSet<Label> {
        &self.first
    }

    /// Position of `state` within this rule's DFA, if it belongs to it.
    pub fn local_index(&self, state: StateId) -> Option<usize> {
        let start = self.start().index();
        let index = state.index().checked_sub(start)?;
        (index < self.states.len()).then_some(index)
    }
}

/// What a label stands for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// Any token of the given type.
    Token(TokenType),
    /// An identifier token with this exact spelling.
    Keyword(String),
}

/// Assembled, immutable grammar table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grammar {
    pub(crate) name: String,
    /// Token type whose values may be keywords.
    pub(crate) name_token: Option<TokenType>,
    /// Indexed by label.
    pub(crate) labels: Vec<LabelKind>,
    pub(crate) tokens: BTreeMap<TokenType, Label>,
    pub(crate) keywords: BTreeMap<String, Label>,
    pub(crate) token_names: BTreeMap<TokenType, String>,
    /// Indexed by `number - NONTERMINAL_BASE`.
    pub(crate) nonterminals: Vec<Nonterminal>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: NonterminalId,
}

impl Grammar {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The generic identifier token type, whose values are checked against
    /// the keyword table first.
    #[inline]
    pub fn name_token(&self) -> Option<TokenType> {
        self.name_token
    }

    /// Default start nonterminal.
    #[inline]
    pub fn start(&self) -> NonterminalId {
        self.start
    }

    #[inline]
    pub fn token_label(&self, kind: TokenType) -> Option<Label> {
        self.tokens.get(&kind).copied()
    }

    #[inline]
    pub fn keyword_label(&self, spelling: &str) -> Option<Label> {
        self.keywords.get(spelling).copied()
    }

    pub fn keywords(&self) -> impl Iterator<Item = (&str, Label)> {
        self.keywords.iter().map(|(k, &l)| (k.as_str(), l))
    }

    pub fn token_name(&self, kind: TokenType) -> Option<&str> {
        self.token_names.get(&kind).map(String::as_str)
    }

    /// Token type registered under `name`.
    pub fn token_type(&self, name: &str) -> Option<TokenType> {
        self.token_names
            .iter()
            .find_map(|(&kind, n)| (n == name).then_some(kind))
    }

    #[inline]
    pub fn label_kind(&self, label: Label) -> Option<&LabelKind> {
        self.labels.get(label as usize)
    }

    #[inline]
    pub fn labels_count(&self) -> usize {
        self.labels.len()
    }

    /// Display name of a label: `'spelling'` for keywords, the token name
    /// for tokens.
    pub fn label_name(&self, label: Label) -> String {
        match self.label_kind(label) {
            Some(LabelKind::Keyword(spelling)) => format!("'{spelling}'"),
            Some(LabelKind::Token(kind)) => self.token_display_name(*kind),
            None => format!("?{label}"),
        }
    }

    /// Token name, or `#<type>` when the type was never named.
    pub fn token_display_name(&self, kind: TokenType) -> String {
        self.token_name(kind)
            .map_or_else(|| format!("#{kind}"), str::to_owned)
    }

    pub fn nonterminal(&self, number: NonterminalId) -> Option<&Nonterminal> {
        let index = number.checked_sub(NONTERMINAL_BASE)?;
        self.nonterminals.get(index as usize)
    }

    pub fn nonterminal_by_name(&self, name: &str) -> Option<&Nonterminal> {
        self.nonterminals.iter().find(|n| n.name == name)
    }

    pub fn nonterminal_name(&self, number: NonterminalId) -> Option<&str> {
        self.nonterminal(number).map(Nonterminal::name)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        self.nonterminals.iter()
    }

    /// Look up a state.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different grammar.
    #[inline]
    pub fn state(&self, id: StateId) -> &DfaState {
        self.ensure_state(id)
    }

    #[inline]
    pub fn try_state(&self, id: StateId) -> Option<&DfaState> {
        self.states.get(id.index())
    }

    #[inline]
    pub fn states_count(&self) -> usize {
        self.states.len()
    }

    /// Nonterminal owning a state.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different grammar.
    pub fn owner(&self, id: StateId) -> &Nonterminal {
        self.ensure_nonterminal(self.state(id).nonterminal)
    }

    /// `rule:index` rendering of a state, e.g. `expr:2`.
    pub fn state_name(&self, id: StateId) -> String {
        let Some(state) = self.try_state(id) else {
            return id.to_string();
        };
        match self.nonterminal(state.nonterminal) {
            Some(nt) => match nt.local_index(id) {
                Some(local) => format!("{}:{local}", nt.name),
                None => id.to_string(),
            },
            None => id.to_string(),
        }
    }
}
