use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use pgen_core::Grammar;

use super::error::{CliError, display_path};
use super::loader::load_grammar;

pub struct CheckArgs {
    pub grammar_path: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn run(args: CheckArgs) {
    if let Err(e) = execute(&args, &mut io::stdout().lock()) {
        super::fail(e);
    }
}

pub fn execute(args: &CheckArgs, out: &mut impl Write) -> Result<(), CliError> {
    let grammar = load_grammar(&args.grammar_path)?;
    writeln!(out, "{}", summary(&grammar))?;

    if let Some(path) = &args.output {
        let bytes = grammar.to_binary();
        fs::write(path, &bytes).map_err(|source| CliError::Write {
            path: display_path(path),
            source,
        })?;
        writeln!(out, "wrote {} ({} bytes)", path.display(), bytes.len())?;
    }
    Ok(())
}

fn summary(grammar: &Grammar) -> String {
    let start = grammar.nonterminal_name(grammar.start()).unwrap_or("?");
    format!(
        "grammar {}: {} rules, {} states, {} labels ({} keywords), start {start}",
        grammar.name(),
        grammar.nonterminals().count(),
        grammar.states_count(),
        grammar.labels_count(),
        grammar.keywords().count(),
    )
}
