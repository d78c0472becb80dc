//! Command builders for the CLI.
//!
//! `parse` and `trace` run the same parse and accept each other's flags,
//! with the ones that do not apply hidden from `--help`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pgen")
        .about("Table-driven LL(1) parser engine for pgen grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(parse_command())
        .subcommand(trace_command())
}

/// Assemble and validate a grammar.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Assemble and validate a grammar")
        .override_usage(
            "\
  pgen check <GRAMMAR>
  pgen check <GRAMMAR> -o <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  pgen check grammar.json                  # validate and summarize
  pgen check grammar.json -o grammar.bin   # also write the binary table
  cat grammar.json | pgen check -          # read from stdin"#,
        )
        .arg(grammar_path_arg())
        .arg(output_arg())
}

/// Show assembled tables.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show assembled parse tables")
        .override_usage("  pgen dump <GRAMMAR>")
        .after_help(
            r#"EXAMPLES:
  pgen dump grammar.json              # labels, rules, plans
  pgen dump grammar.bin --color=never"#,
        )
        .arg(grammar_path_arg())
        .arg(color_arg())
}

/// Parse a token stream and print the tree.
///
/// Accepts trace's `-v` and `--color` for a unified CLI, but ignores them.
pub fn parse_command() -> Command {
    Command::new("parse")
        .about("Parse a token stream and print the syntax tree")
        .override_usage(
            "\
  pgen parse <GRAMMAR> <TOKENS>
  pgen parse <GRAMMAR> <TOKENS> --start <RULE> [--recover] [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  pgen parse grammar.json tokens.json           # indented tree
  pgen parse grammar.json tokens.json --json    # tree as JSON
  pgen parse grammar.json tokens.json --recover # keep bad tokens as errors
  lexer app.src | pgen parse grammar.bin -      # tokens from stdin"#,
        )
        .arg(grammar_path_arg())
        .arg(tokens_path_arg())
        .arg(start_arg())
        .arg(recover_arg())
        .arg(json_arg())
        .arg(max_depth_arg())
        .arg(verbose_arg().hide(true))
        .arg(color_arg().hide(true))
}

/// Parse a token stream and show every engine step.
///
/// Accepts parse's `--json` for a unified CLI, but ignores it.
pub fn trace_command() -> Command {
    Command::new("trace")
        .about("Trace the parser over a token stream")
        .override_usage(
            "\
  pgen trace <GRAMMAR> <TOKENS>
  pgen trace <GRAMMAR> <TOKENS> -v",
        )
        .after_help(
            r#"EXAMPLES:
  pgen trace grammar.json tokens.json           # shifts and reductions
  pgen trace grammar.json tokens.json -v        # plus label resolution
  pgen trace grammar.json tokens.json -vv       # plus positions and depth
  pgen trace grammar.json tokens.json --recover # trace recovery"#,
        )
        .arg(grammar_path_arg())
        .arg(tokens_path_arg())
        .arg(verbose_arg())
        .arg(start_arg())
        .arg(recover_arg())
        .arg(max_depth_arg())
        .arg(color_arg())
        .arg(json_arg().hide(true))
}
