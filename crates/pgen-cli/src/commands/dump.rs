use std::io::{self, Write};
use std::path::PathBuf;

use pgen_core::Colors;

use super::error::CliError;
use super::loader::load_grammar;

pub struct DumpArgs {
    pub grammar_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    if let Err(e) = execute(&args, &mut io::stdout().lock()) {
        super::fail(e);
    }
}

pub fn execute(args: &DumpArgs, out: &mut impl Write) -> Result<(), CliError> {
    let grammar = load_grammar(&args.grammar_path)?;
    write!(out, "{}", grammar.dump(Colors::new(args.color)))?;
    Ok(())
}
