//! Structural checks for tables that did not come from the builder.
//!
//! The builder only produces well-formed tables. A decoded binary table may
//! be truncated, corrupted or written by something else, so it is checked
//! here before any lookup that would panic on a dangling id.

use super::error::GrammarError;
use super::types::{Grammar, NONTERMINAL_BASE, NonterminalId, Plan, StateId};
use crate::Label;

impl Grammar {
    pub(crate) fn validate(&self) -> Result<(), GrammarError> {
        let max_nonterminals = usize::from(NonterminalId::MAX - NONTERMINAL_BASE) + 1;
        if self.nonterminals.len() > max_nonterminals {
            return malformed(format!("{} nonterminals", self.nonterminals.len()));
        }
        if self.nonterminals.is_empty() {
            return malformed("no nonterminals".to_owned());
        }

        let mut expected_start = 0;
        for (index, nt) in self.nonterminals.iter().enumerate() {
            if usize::from(nt.number) != usize::from(NONTERMINAL_BASE) + index {
                return malformed(format!(
                    "nonterminal `{}` is numbered {} at position {index}",
                    nt.name, nt.number
                ));
            }
            if nt.states.is_empty() {
                return malformed(format!("nonterminal `{}` has no states", nt.name));
            }
            for (local, &id) in nt.states.iter().enumerate() {
                if id.index() != expected_start + local {
                    return malformed(format!(
                        "nonterminal `{}` has non-contiguous state {id}",
                        nt.name
                    ));
                }
                match self.try_state(id) {
                    Some(state) if state.nonterminal == nt.number => {}
                    Some(state) => {
                        return malformed(format!(
                            "state {id} is listed by `{}` but owned by {}",
                            nt.name, state.nonterminal
                        ));
                    }
                    None => return self.dangling(id),
                }
            }
            expected_start += nt.states.len();
            for &label in &nt.first {
                self.check_label(label)?;
            }
        }
        if expected_start != self.states.len() {
            return malformed(format!(
                "{} states but nonterminals cover {expected_start}",
                self.states.len()
            ));
        }

        for state in &self.states {
            for (&label, plan) in &state.transitions {
                self.check_label(label)?;
                self.check_plan(plan)?;
            }
        }

        if self.nonterminal(self.start).is_none() {
            return malformed(format!("start nonterminal {} does not exist", self.start));
        }
        for &label in self.tokens.values().chain(self.keywords.values()) {
            self.check_label(label)?;
        }
        Ok(())
    }

    fn check_plan(&self, plan: &Plan) -> Result<(), GrammarError> {
        for &id in std::iter::once(&plan.next).chain(&plan.pushes) {
            if self.try_state(id).is_none() {
                return self.dangling(id);
            }
        }
        Ok(())
    }

    fn check_label(&self, label: Label) -> Result<(), GrammarError> {
        if self.label_kind(label).is_none() {
            return malformed(format!(
                "label {label} is out of range ({} labels)",
                self.labels.len()
            ));
        }
        Ok(())
    }

    fn dangling(&self, id: StateId) -> Result<(), GrammarError> {
        malformed(format!(
            "state {id} is out of range ({} states)",
            self.states.len()
        ))
    }
}

fn malformed(message: String) -> Result<(), GrammarError> {
    Err(GrammarError::MalformedTable(message))
}
