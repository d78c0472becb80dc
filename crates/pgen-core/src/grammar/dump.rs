//! Human-readable table dump for debugging and documentation.
//!
//! ```text
//! [grammar]
//! name  toy
//! start S
//!
//! [labels]
//! L0 NAME
//! L1 'a'
//!
//! [rules]
//! S #256  first: 'a'
//!   0   'a' → 1
//!   1 * NAME → 0  push B:1
//! ```
//!
//! `*` marks final states. `push` lists the nested rule states a transition
//! enters, outermost first.

use std::fmt::Write as _;

use super::types::{Grammar, Nonterminal, Plan};
use crate::{Colors, Label};

impl Grammar {
    /// Render the assembled table.
    pub fn dump(&self, colors: Colors) -> String {
        let mut out = String::new();
        dump_header(&mut out, self, colors);
        dump_labels(&mut out, self, colors);
        dump_rules(&mut out, self, colors);
        out
    }
}

fn width_for_count(count: usize) -> usize {
    count.saturating_sub(1).to_string().len()
}

fn dump_header(out: &mut String, grammar: &Grammar, c: Colors) {
    writeln!(out, "{}[grammar]{}", c.blue, c.reset).unwrap();
    writeln!(out, "name  {}", grammar.name()).unwrap();
    let start = grammar.nonterminal_name(grammar.start()).unwrap_or("?");
    writeln!(out, "start {}{start}{}", c.blue, c.reset).unwrap();
    if let Some(kind) = grammar.name_token() {
        writeln!(out, "names {}", grammar.token_display_name(kind)).unwrap();
    }
    out.push('\n');
}

fn dump_labels(out: &mut String, grammar: &Grammar, c: Colors) {
    let w = width_for_count(grammar.labels_count());
    writeln!(out, "{}[labels]{}", c.blue, c.reset).unwrap();
    for label in 0..grammar.labels_count() {
        let name = grammar.label_name(label as Label);
        writeln!(out, "L{label:0w$} {}{name}{}", c.green, c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_rules(out: &mut String, grammar: &Grammar, c: Colors) {
    writeln!(out, "{}[rules]{}", c.blue, c.reset).unwrap();
    for nt in grammar.nonterminals() {
        dump_rule(out, grammar, nt, c);
    }
}

fn dump_rule(out: &mut String, grammar: &Grammar, nt: &Nonterminal, c: Colors) {
    write!(
        out,
        "{}{}{} {}#{}{}",
        c.blue,
        nt.name(),
        c.reset,
        c.dim,
        nt.number(),
        c.reset
    )
    .unwrap();
    if !nt.first().is_empty() {
        let first: Vec<String> = nt
            .first()
            .iter()
            .map(|&label| grammar.label_name(label))
            .collect();
        write!(out, "  first: {}{}{}", c.green, first.join(", "), c.reset).unwrap();
    }
    out.push('\n');

    let w = width_for_count(nt.states().len());
    for (local, &id) in nt.states().iter().enumerate() {
        let state = grammar.state(id);
        let mark = if state.is_final() { '*' } else { ' ' };
        let mut transitions = state.transitions();

        let Some((label, plan)) = transitions.next() else {
            writeln!(out, "  {}{local:>w$}{} {mark}", c.dim, c.reset).unwrap();
            continue;
        };
        writeln!(
            out,
            "  {}{local:>w$}{} {mark} {}",
            c.dim,
            c.reset,
            format_transition(grammar, nt, label, plan, c)
        )
        .unwrap();
        for (label, plan) in transitions {
            writeln!(
                out,
                "  {:w$}   {}",
                "",
                format_transition(grammar, nt, label, plan, c)
            )
            .unwrap();
        }
    }
}

fn format_transition(
    grammar: &Grammar,
    nt: &Nonterminal,
    label: Label,
    plan: &Plan,
    c: Colors,
) -> String {
    let next = nt
        .local_index(plan.next)
        .map_or_else(|| grammar.state_name(plan.next), |i| i.to_string());
    let mut line = format!(
        "{}{}{} → {}{next}{}",
        c.green,
        grammar.label_name(label),
        c.reset,
        c.dim,
        c.reset
    );
    if !plan.pushes.is_empty() {
        let pushes: Vec<String> = plan
            .pushes
            .iter()
            .map(|&id| grammar.state_name(id))
            .collect();
        write!(line, "  {}push{} {}", c.dim, c.reset, pushes.join(", ")).unwrap();
    }
    line
}
