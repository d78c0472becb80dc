//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same definition is reused across commands, hidden where it does not
//! apply (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar table file (positional, required).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Grammar file: JSON rule DFAs, or a .bin table (- for stdin)")
}

/// Token stream file (positional, required).
pub fn tokens_path_arg() -> Arg {
    Arg::new("tokens_path")
        .value_name("TOKENS")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("JSON array of tokens (- for stdin)")
}

/// Write the assembled table (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the assembled table in binary form")
}

/// Start rule (--start).
pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("RULE")
        .help("Start rule (defaults to the grammar's start rule)")
}

/// Keep going past syntax errors (--recover).
pub fn recover_arg() -> Arg {
    Arg::new("recover")
        .long("recover")
        .action(ArgAction::SetTrue)
        .help("Keep unexpected tokens as error leaves instead of failing")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the tree as JSON")
}

/// Stack depth limit (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .default_value("10000")
        .value_parser(value_parser!(u32))
        .help("Maximum parser stack depth")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}
