//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{DfaState, Grammar, Nonterminal, NonterminalId, StateId};

impl Grammar {
    pub(crate) fn ensure_state(&self, id: StateId) -> &DfaState {
        self.states.get(id.index()).unwrap_or_else(|| {
            panic!(
                "Grammar `{}`: state {id} not found \
                 (state ids are only valid for the grammar that issued them)",
                self.name
            )
        })
    }

    pub(crate) fn ensure_nonterminal(&self, number: NonterminalId) -> &Nonterminal {
        self.nonterminal(number).unwrap_or_else(|| {
            panic!(
                "Grammar `{}`: nonterminal {number} not found \
                 (states must belong to a nonterminal of the same grammar)",
                self.name
            )
        })
    }
}
