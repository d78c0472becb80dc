//! Tracing infrastructure for debugging parses.
//!
//! With `NoopTracer` every call is an empty `#[inline(always)]` function and
//! compiles away along with its arguments. The engine keeps no state for the
//! tracer's sake: `PrintTracer` remembers the token being processed itself.

use pgen_core::{Colors, Grammar, Label, NonterminalId, Plan, StateId, Token};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: shifts, reductions, dead ends and recovery.
    #[default]
    Default,
    /// Verbose (-v): also label resolution of every token.
    Verbose,
    /// Very verbose (-vv): also token positions, prefixes and stack depth.
    VeryVerbose,
}

/// Parser instrumentation.
///
/// All methods receive raw ids the engine already has. Name resolution and
/// formatting happen in the implementation.
///
/// - `trace_token` - a token was resolved to a label
/// - `trace_shift` - the top frame took the token
/// - `trace_reduce` - a completed frame was popped
/// - `trace_dead_end` - no frame can take the token
/// - `trace_recover` - the recovery hook is about to run
/// - `trace_reenter` - the recovery hook feeds a token back in
/// - `trace_finish` - the stream ended
pub trait Tracer {
    fn trace_token(&mut self, token: &Token, label: Option<Label>);

    /// `from` is the top frame's state before the transition; `depth` the
    /// stack depth after it.
    fn trace_shift(&mut self, from: StateId, plan: &Plan, depth: usize);

    /// `children == 1` means the child was promoted and no node was built.
    fn trace_reduce(&mut self, nonterminal: NonterminalId, children: usize, depth: usize);

    fn trace_dead_end(&mut self, state: StateId);

    fn trace_recover(&mut self, depth: u32);

    fn trace_reenter(&mut self, token: &Token);

    fn trace_finish(&mut self, accepted: bool);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_token(&mut self, _token: &Token, _label: Option<Label>) {}

    #[inline(always)]
    fn trace_shift(&mut self, _from: StateId, _plan: &Plan, _depth: usize) {}

    #[inline(always)]
    fn trace_reduce(&mut self, _nonterminal: NonterminalId, _children: usize, _depth: usize) {}

    #[inline(always)]
    fn trace_dead_end(&mut self, _state: StateId) {}

    #[inline(always)]
    fn trace_recover(&mut self, _depth: u32) {}

    #[inline(always)]
    fn trace_reenter(&mut self, _token: &Token) {}

    #[inline(always)]
    fn trace_finish(&mut self, _accepted: bool) {}
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace_token(&mut self, token: &Token, label: Option<Label>) {
        (**self).trace_token(token, label);
    }

    fn trace_shift(&mut self, from: StateId, plan: &Plan, depth: usize) {
        (**self).trace_shift(from, plan, depth);
    }

    fn trace_reduce(&mut self, nonterminal: NonterminalId, children: usize, depth: usize) {
        (**self).trace_reduce(nonterminal, children, depth);
    }

    fn trace_dead_end(&mut self, state: StateId) {
        (**self).trace_dead_end(state);
    }

    fn trace_recover(&mut self, depth: u32) {
        (**self).trace_recover(depth);
    }

    fn trace_reenter(&mut self, token: &Token) {
        (**self).trace_reenter(token);
    }

    fn trace_finish(&mut self, accepted: bool) {
        (**self).trace_finish(accepted);
    }
}

/// Tracer that collects a readable log of the parse.
pub struct PrintTracer<'g> {
    grammar: &'g Grammar,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// `NAME "x"` rendering of the token being processed.
    token: String,
    /// Label of the token being processed.
    label: Option<Label>,
}

impl<'g> PrintTracer<'g> {
    pub fn new(grammar: &'g Grammar, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            grammar,
            verbosity,
            colors,
            lines: Vec::new(),
            token: String::new(),
            label: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn push(&mut self, op: &str, content: String) {
        let c = self.colors;
        let line = format!("{}{op:<8}{}{content}", c.dim, c.reset);
        self.lines.push(line.trim_end().to_owned());
    }

    fn format_token(&self, token: &Token) -> String {
        let c = self.colors;
        let name = self.grammar.token_display_name(token.kind);
        let mut out = format!("{name} {}{:?}{}", c.green, token.value, c.reset);
        if self.verbosity == Verbosity::VeryVerbose {
            out.push_str(&format!(" {}{}{}", c.dim, token.start, c.reset));
            if !token.prefix.is_empty() {
                out.push_str(&format!(" {}prefix {:?}{}", c.dim, token.prefix, c.reset));
            }
        }
        out
    }

    fn format_label(&self, label: Option<Label>) -> String {
        let c = self.colors;
        match label {
            Some(label) => format!("{}{}{}", c.green, self.grammar.label_name(label), c.reset),
            None => format!("{}?{}", c.red, c.reset),
        }
    }

    fn format_depth(&self, depth: usize) -> String {
        if self.verbosity != Verbosity::VeryVerbose {
            return String::new();
        }
        let c = self.colors;
        format!("  {}[{depth}]{}", c.dim, c.reset)
    }

    fn format_rule(&self, nonterminal: NonterminalId) -> String {
        let c = self.colors;
        let name = self.grammar.nonterminal_name(nonterminal).unwrap_or("?");
        format!("{}{name}{}", c.blue, c.reset)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_token(&mut self, token: &Token, label: Option<Label>) {
        self.token = self.format_token(token);
        self.label = label;

        if self.verbosity == Verbosity::Default {
            return;
        }
        let content = format!("{} → {}", self.token, self.format_label(label));
        self.push("token", content);
    }

    fn trace_shift(&mut self, from: StateId, plan: &Plan, depth: usize) {
        let c = self.colors;
        let mut content = format!(
            "{}  {} → {}",
            self.format_label(self.label),
            self.grammar.state_name(from),
            self.grammar.state_name(plan.next)
        );
        if !plan.pushes.is_empty() {
            let pushes: Vec<String> = plan
                .pushes
                .iter()
                .map(|&id| self.grammar.state_name(id))
                .collect();
            content.push_str(&format!("  {}push{} {}", c.dim, c.reset, pushes.join(", ")));
        }
        content.push_str(&self.format_depth(depth));
        self.push("shift", content);
    }

    fn trace_reduce(&mut self, nonterminal: NonterminalId, children: usize, depth: usize) {
        let rule = self.format_rule(nonterminal);
        let depth = self.format_depth(depth);
        if children == 1 {
            self.push("promote", format!("{rule}{depth}"));
        } else {
            self.push("reduce", format!("{rule} ({children}){depth}"));
        }
    }

    fn trace_dead_end(&mut self, state: StateId) {
        let c = self.colors;
        let content = format!(
            "{}{}{} on {}",
            c.red,
            self.grammar.state_name(state),
            c.reset,
            self.token
        );
        self.push("dead", content);
    }

    fn trace_recover(&mut self, depth: u32) {
        self.push("recover", format!("level {depth}"));
    }

    fn trace_reenter(&mut self, token: &Token) {
        let content = self.format_token(token);
        self.push("reenter", content);
    }

    fn trace_finish(&mut self, accepted: bool) {
        let c = self.colors;
        if accepted {
            self.push("accept", String::new());
        } else {
            self.push("finish", format!("{}incomplete{}", c.red, c.reset));
        }
    }
}
