//! Trace a parse for debugging.

use std::io::{self, Write};
use std::path::PathBuf;

use pgen_core::Colors;
use pgen_vm::{ErrorToken, PrintTracer, Verbosity};

use super::error::CliError;
use super::parse::{ParseOptions, Parsed, load_inputs, parse_tokens, report_skipped};

pub struct TraceArgs {
    pub grammar_path: PathBuf,
    pub tokens_path: PathBuf,
    pub options: ParseOptions,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    match execute(&args, &mut io::stdout().lock()) {
        Ok(skipped) => report_skipped(&skipped),
        Err(e) => super::fail(e),
    }
}

/// Write the trace, then the tree, to `out`. On a parse error the trace
/// is still written before the error is returned.
pub fn execute(args: &TraceArgs, out: &mut impl Write) -> Result<Vec<ErrorToken>, CliError> {
    let (grammar, tokens) = load_inputs(&args.grammar_path, &args.tokens_path)?;
    let colors = Colors::new(args.color);
    let mut tracer = PrintTracer::new(&grammar, args.verbosity, colors);

    let result = parse_tokens(&grammar, &tokens, &args.options, &mut tracer);
    for line in tracer.lines() {
        writeln!(out, "{line}")?;
    }
    let Parsed { tree, skipped } = result?;

    writeln!(out, "{}---{}", colors.dim, colors.reset)?;
    writeln!(out, "{tree}")?;
    Ok(skipped)
}
