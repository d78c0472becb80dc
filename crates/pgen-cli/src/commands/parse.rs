use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pgen_core::{Grammar, Token};
use pgen_vm::{
    Cst, CstBuilder, ErrorToken, Limits, NoopTracer, ParseError, Parser, SkipRecovery, Tracer,
};

use super::error::{CliError, is_stdin};
use super::loader::{load_grammar, load_tokens};

pub struct ParseArgs {
    pub grammar_path: PathBuf,
    pub tokens_path: PathBuf,
    pub options: ParseOptions,
    pub json: bool,
}

/// Parser settings shared by `parse` and `trace`.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub start: Option<String>,
    pub recover: bool,
    pub limits: Limits,
}

/// Tree plus the tokens recovery had to skip.
pub struct Parsed {
    pub tree: Cst,
    pub skipped: Vec<ErrorToken>,
}

pub fn run(args: ParseArgs) {
    match execute(&args, &mut io::stdout().lock()) {
        Ok(skipped) => report_skipped(&skipped),
        Err(e) => super::fail(e),
    }
}

/// Print the tree to `out`; returns the tokens skipped under `--recover`.
pub fn execute(args: &ParseArgs, out: &mut impl Write) -> Result<Vec<ErrorToken>, CliError> {
    let (grammar, tokens) = load_inputs(&args.grammar_path, &args.tokens_path)?;
    let Parsed { tree, skipped } = parse_tokens(&grammar, &tokens, &args.options, NoopTracer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&tree).map_err(CliError::Json)?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "{tree}")?;
    }
    Ok(skipped)
}

pub(crate) fn load_inputs(
    grammar_path: &Path,
    tokens_path: &Path,
) -> Result<(Grammar, Vec<Token>), CliError> {
    if is_stdin(grammar_path) && is_stdin(tokens_path) {
        return Err(CliError::StdinTwice);
    }
    let grammar = load_grammar(grammar_path)?;
    let tokens = load_tokens(tokens_path, &grammar)?;
    Ok((grammar, tokens))
}

pub(crate) fn parse_tokens<T: Tracer>(
    grammar: &Grammar,
    tokens: &[Token],
    options: &ParseOptions,
    tracer: T,
) -> Result<Parsed, ParseError> {
    let mut builder = Parser::builder(grammar, CstBuilder)
        .tracer(tracer)
        .limits(options.limits);
    if let Some(start) = &options.start {
        builder = builder.start(start.as_str());
    }

    if !options.recover {
        let tree = builder.build()?.parse(tokens)?;
        return Ok(Parsed {
            tree,
            skipped: Vec::new(),
        });
    }

    let mut parser = builder.recovery(SkipRecovery::new()).build()?;
    let tree = parser.parse(tokens)?;
    Ok(Parsed {
        tree,
        skipped: parser.recovery().errors().to_vec(),
    })
}

pub(crate) fn report_skipped(skipped: &[ErrorToken]) {
    for token in skipped {
        eprintln!("warning: skipped unexpected token: {token}");
    }
}
