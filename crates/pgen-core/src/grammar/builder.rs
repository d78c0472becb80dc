//! Table assembly: per-rule DFAs to label alphabet, plans and first sets.
//!
//! A grammar compiler hands over one DFA per rule, with arcs labelled by
//! rule names, token names or quoted literals. Assembly allocates a label per
//! distinct terminal, then expands every arc that enters a nested rule into
//! one plan per terminal that can start it. The parser engine never sees a
//! nonterminal arc.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use super::error::GrammarError;
use super::types::{
    DfaState, Grammar, LabelKind, NONTERMINAL_BASE, Nonterminal, NonterminalId, Plan, StateId,
};
use crate::{Label, TokenType};

/// One DFA state as written by a grammar compiler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DfaStateDef {
    pub is_final: bool,
    /// `(label, target state index)` pairs. Targets index into the same rule.
    pub arcs: Vec<(String, usize)>,
}

impl DfaStateDef {
    /// Non-final state without arcs (add some with [`arc`](Self::arc)).
    pub fn new() -> Self {
        Self::default()
    }

    /// Final state without arcs.
    pub fn accepting() -> Self {
        Self {
            is_final: true,
            arcs: Vec::new(),
        }
    }

    pub fn arc(mut self, label: impl Into<String>, target: usize) -> Self {
        self.arcs.push((label.into(), target));
        self
    }

    pub fn set_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }
}

/// Builder for [`Grammar`] tables.
///
/// Arc labels are resolved in this order: rule name, token name, quoted
/// literal. A quoted literal registered with [`operator`](Self::operator)
/// becomes that token's label; any other identifier-like literal becomes a
/// keyword.
#[derive(Clone, Debug)]
pub struct GrammarBuilder {
    name: String,
    name_token: Option<TokenType>,
    tokens: IndexMap<String, TokenType>,
    operators: IndexMap<String, String>,
    rules: IndexMap<String, Vec<DfaStateDef>>,
    start: Option<String>,
    duplicate_rule: Option<String>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_token: None,
            tokens: IndexMap::new(),
            operators: IndexMap::new(),
            rules: IndexMap::new(),
            start: None,
            duplicate_rule: None,
        }
    }

    /// Set the generic identifier token type (keywords shadow it).
    pub fn name_token(mut self, kind: TokenType) -> Self {
        self.name_token = Some(kind);
        self
    }

    /// Declare a token type and its display name.
    pub fn token(mut self, name: impl Into<String>, kind: TokenType) -> Self {
        self.tokens.insert(name.into(), kind);
        self
    }

    /// Map a quoted literal (without quotes) to a declared token.
    pub fn operator(mut self, literal: impl Into<String>, token: impl Into<String>) -> Self {
        self.operators.insert(literal.into(), token.into());
        self
    }

    /// Add a rule. `states[0]` is the start state. The first rule added is
    /// the default start rule.
    pub fn rule(
        mut self,
        name: impl Into<String>,
        states: impl IntoIterator<Item = DfaStateDef>,
    ) -> Self {
        let name = name.into();
        if self.rules.contains_key(&name) {
            self.duplicate_rule.get_or_insert(name);
            return self;
        }
        self.rules.insert(name, states.into_iter().collect());
        self
    }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Assemble and validate the table.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(name) = self.duplicate_rule {
            return Err(GrammarError::DuplicateRule(name));
        }
        if self.rules.is_empty() {
            return Err(GrammarError::NoRules);
        }
        if self.rules.len() > MAX_RULES {
            return Err(GrammarError::TooLarge {
                what: "rules",
                limit: MAX_RULES,
            });
        }

        let mut token_names = BTreeMap::new();
        for (name, &kind) in &self.tokens {
            if let Some(existing) = token_names.insert(kind, name.clone()) {
                return Err(GrammarError::DuplicateTokenType {
                    name: name.clone(),
                    kind,
                    existing,
                });
            }
        }
        for token in self.operators.values() {
            if !self.tokens.contains_key(token) {
                return Err(GrammarError::UnknownToken(token.clone()));
            }
        }

        let start = match &self.start {
            Some(name) => self
                .rules
                .get_index_of(name)
                .ok_or_else(|| GrammarError::UnknownStart(name.clone()))?,
            None => 0,
        };

        // Declared tokens get labels first, in declaration order, so every
        // declared token resolves even if no rule mentions it.
        let mut alphabet = Alphabet::default();
        for &kind in self.tokens.values() {
            alphabet.token(kind)?;
        }

        let mut offsets = Vec::with_capacity(self.rules.len());
        let mut total = 0;
        for (name, states) in &self.rules {
            if states.is_empty() {
                return Err(GrammarError::EmptyRule(name.clone()));
            }
            offsets.push(total);
            total += states.len();
        }
        if total > MAX_STATES {
            return Err(GrammarError::TooLarge {
                what: "states",
                limit: MAX_STATES,
            });
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for (name, states) in &self.rules {
            let mut resolved = Vec::with_capacity(states.len());
            for (index, def) in states.iter().enumerate() {
                if def.arcs.is_empty() && !def.is_final {
                    return Err(GrammarError::DeadState {
                        rule: name.clone(),
                        state: index,
                    });
                }
                let mut arcs = Vec::with_capacity(def.arcs.len());
                for (label, target) in &def.arcs {
                    if *target >= states.len() {
                        return Err(GrammarError::BadTarget {
                            rule: name.clone(),
                            state: index,
                            target: *target,
                        });
                    }
                    arcs.push((self.resolve_arc(name, label, &mut alphabet)?, *target));
                }
                resolved.push(ResolvedState {
                    is_final: def.is_final,
                    arcs,
                });
            }
            rules.push(resolved);
        }

        if !alphabet.keywords.is_empty() && self.name_token.is_none() {
            return Err(GrammarError::MissingNameToken);
        }

        let assembly = Assembly {
            names: self.rules.keys().map(String::as_str).collect(),
            offsets,
            rules,
            alphabet: &alphabet,
            token_names: &token_names,
        };
        let first = assembly.first_plans()?;
        let states = assembly.states(&first)?;
        let nonterminals = assembly.nonterminals(&first);
        drop(assembly);

        Ok(Grammar {
            name: self.name,
            name_token: self.name_token,
            labels: alphabet.labels,
            tokens: alphabet.tokens,
            keywords: alphabet.keywords,
            token_names,
            nonterminals,
            states,
            start: nonterminal_number(start),
        })
    }

    fn resolve_arc(
        &self,
        rule: &str,
        label: &str,
        alphabet: &mut Alphabet,
    ) -> Result<Arc, GrammarError> {
        if let Some(index) = self.rules.get_index_of(label) {
            return Ok(Arc::Rule(index));
        }
        if let Some(&kind) = self.tokens.get(label) {
            return Ok(Arc::Terminal(alphabet.token(kind)?));
        }
        if let Some(literal) = unquote(label) {
            if let Some(token) = self.operators.get(literal) {
                // Operator targets were checked against `tokens` in `build`.
                let kind = self.tokens[token.as_str()];
                return Ok(Arc::Terminal(alphabet.token(kind)?));
            }
            if is_keyword_like(literal) {
                return Ok(Arc::Terminal(alphabet.keyword(literal)?));
            }
        }
        Err(GrammarError::UnknownLabel {
            rule: rule.to_owned(),
            label: label.to_owned(),
        })
    }
}

/// Nonterminal numbers run from `NONTERMINAL_BASE` to `NonterminalId::MAX`.
const MAX_RULES: usize = (NonterminalId::MAX - NONTERMINAL_BASE) as usize + 1;

/// State ids are `u32`.
const MAX_STATES: usize = u32::MAX as usize;

/// Labels are `u16`, so one more than the largest label.
const MAX_LABELS: usize = Label::MAX as usize + 1;

// `build` rejects more than `MAX_RULES` rules before any number is issued.
fn nonterminal_number(rule: usize) -> NonterminalId {
    NONTERMINAL_BASE + rule as NonterminalId
}

fn unquote(label: &str) -> Option<&str> {
    let inner = label
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| label.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
    (!inner.is_empty()).then_some(inner)
}

fn is_keyword_like(literal: &str) -> bool {
    let mut chars = literal.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[derive(Clone, Copy, Debug)]
enum Arc {
    Terminal(Label),
    Rule(usize),
}

struct ResolvedState {
    is_final: bool,
    arcs: Vec<(Arc, usize)>,
}

/// Label allocation, in order of first use.
#[derive(Default)]
struct Alphabet {
    labels: Vec<LabelKind>,
    tokens: BTreeMap<TokenType, Label>,
    keywords: BTreeMap<String, Label>,
}

impl Alphabet {
    fn token(&mut self, kind: TokenType) -> Result<Label, GrammarError> {
        if let Some(&label) = self.tokens.get(&kind) {
            return Ok(label);
        }
        let label = self.next_label()?;
        self.labels.push(LabelKind::Token(kind));
        self.tokens.insert(kind, label);
        Ok(label)
    }

    fn keyword(&mut self, spelling: &str) -> Result<Label, GrammarError> {
        if let Some(&label) = self.keywords.get(spelling) {
            return Ok(label);
        }
        let label = self.next_label()?;
        self.labels.push(LabelKind::Keyword(spelling.to_owned()));
        self.keywords.insert(spelling.to_owned(), label);
        Ok(label)
    }

    fn next_label(&self) -> Result<Label, GrammarError> {
        Label::try_from(self.labels.len()).map_err(|_| GrammarError::TooLarge {
            what: "labels",
            limit: MAX_LABELS,
        })
    }
}

/// Per-rule first plans: first label to the chain of nested states entered.
type FirstPlans = BTreeMap<Label, Vec<StateId>>;

enum FirstState {
    Pending,
    Computing,
    Done(FirstPlans),
}

struct Assembly<'a> {
    names: Vec<&'a str>,
    offsets: Vec<usize>,
    rules: Vec<Vec<ResolvedState>>,
    alphabet: &'a Alphabet,
    token_names: &'a BTreeMap<TokenType, String>,
}

impl Assembly<'_> {
    fn state_id(&self, rule: usize, local: usize) -> StateId {
        StateId::from_index(self.offsets[rule] + local)
    }

    fn describe(&self, label: Label) -> String {
        match &self.alphabet.labels[label as usize] {
            LabelKind::Keyword(spelling) => format!("'{spelling}'"),
            LabelKind::Token(kind) => self
                .token_names
                .get(kind)
                .cloned()
                .unwrap_or_else(|| format!("#{kind}")),
        }
    }

    fn first_plans(&self) -> Result<Vec<FirstPlans>, GrammarError> {
        let mut memo: Vec<FirstState> = (0..self.rules.len())
            .map(|_| FirstState::Pending)
            .collect();
        for rule in 0..self.rules.len() {
            if matches!(memo[rule], FirstState::Pending) {
                self.compute_first(rule, &mut memo)?;
            }
        }
        Ok(memo
            .into_iter()
            .map(|state| match state {
                FirstState::Done(plans) => plans,
                FirstState::Pending | FirstState::Computing => {
                    unreachable!("every rule's first plans are computed above")
                }
            })
            .collect())
    }

    fn compute_first(&self, rule: usize, memo: &mut [FirstState]) -> Result<(), GrammarError> {
        memo[rule] = FirstState::Computing;

        let mut plans = FirstPlans::new();
        for &(arc, target) in &self.rules[rule][0].arcs {
            let next = self.state_id(rule, target);
            match arc {
                Arc::Terminal(label) => self.insert_first(rule, &mut plans, label, vec![next])?,
                Arc::Rule(inner) => {
                    if matches!(memo[inner], FirstState::Computing) {
                        return Err(GrammarError::LeftRecursion(self.names[inner].to_owned()));
                    }
                    if matches!(memo[inner], FirstState::Pending) {
                        self.compute_first(inner, memo)?;
                    }
                    let FirstState::Done(inner_plans) = &memo[inner] else {
                        unreachable!("first plans of `{}` computed above", self.names[inner]);
                    };
                    let entries: Vec<(Label, Vec<StateId>)> = inner_plans
                        .iter()
                        .map(|(&label, pushes)| {
                            let mut chain = Vec::with_capacity(pushes.len() + 1);
                            chain.push(next);
                            chain.extend_from_slice(pushes);
                            (label, chain)
                        })
                        .collect();
                    for (label, chain) in entries {
                        self.insert_first(rule, &mut plans, label, chain)?;
                    }
                }
            }
        }

        memo[rule] = FirstState::Done(plans);
        Ok(())
    }

    fn insert_first(
        &self,
        rule: usize,
        plans: &mut FirstPlans,
        label: Label,
        chain: Vec<StateId>,
    ) -> Result<(), GrammarError> {
        if plans.insert(label, chain).is_some() {
            return Err(GrammarError::AmbiguousFirst {
                rule: self.names[rule].to_owned(),
                label: self.describe(label),
            });
        }
        Ok(())
    }

    fn states(&self, first: &[FirstPlans]) -> Result<Vec<DfaState>, GrammarError> {
        let mut states = Vec::new();
        for (rule, resolved) in self.rules.iter().enumerate() {
            for (local, state) in resolved.iter().enumerate() {
                let mut transitions = BTreeMap::new();
                for &(arc, target) in &state.arcs {
                    let next = self.state_id(rule, target);
                    match arc {
                        Arc::Terminal(label) => {
                            let plan = Plan {
                                next,
                                pushes: Vec::new(),
                            };
                            self.insert_plan(rule, local, &mut transitions, label, plan)?;
                        }
                        Arc::Rule(inner) => {
                            for (&label, pushes) in &first[inner] {
                                let plan = Plan {
                                    next,
                                    pushes: pushes.clone(),
                                };
                                self.insert_plan(rule, local, &mut transitions, label, plan)?;
                            }
                        }
                    }
                }
                states.push(DfaState {
                    nonterminal: nonterminal_number(rule),
                    is_final: state.is_final,
                    transitions,
                });
            }
        }
        Ok(states)
    }

    fn insert_plan(
        &self,
        rule: usize,
        state: usize,
        transitions: &mut BTreeMap<Label, Plan>,
        label: Label,
        plan: Plan,
    ) -> Result<(), GrammarError> {
        if transitions.insert(label, plan).is_some() {
            return Err(GrammarError::Conflict {
                rule: self.names[rule].to_owned(),
                state,
                label: self.describe(label),
            });
        }
        Ok(())
    }

    fn nonterminals(&self, first: &[FirstPlans]) -> Vec<Nonterminal> {
        self.rules
            .iter()
            .enumerate()
            .map(|(rule, resolved)| Nonterminal {
                number: nonterminal_number(rule),
                name: self.names[rule].to_owned(),
                states: (0..resolved.len())
                    .map(|local| self.state_id(rule, local))
                    .collect(),
                first: first[rule].keys().copied().collect::<BTreeSet<_>>(),
            })
            .collect()
    }
}
