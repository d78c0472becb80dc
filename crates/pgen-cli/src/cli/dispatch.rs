//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap.
//! `from_matches()` pulls only the fields a command uses, so hidden unified
//! flags are parsed and then dropped here.

use std::path::PathBuf;

use clap::ArgMatches;
use pgen_vm::{Limits, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::parse::{ParseArgs, ParseOptions};
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub grammar_path: PathBuf,
    pub output: Option<PathBuf>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            output: p.output,
        }
    }
}

pub struct DumpParams {
    pub grammar_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub grammar_path: PathBuf,
    pub tokens_path: PathBuf,
    pub start: Option<String>,
    pub recover: bool,
    pub json: bool,
    pub max_depth: u32,
    // Note: verbose and color are parsed but not extracted (unified flags)
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            tokens_path: tokens_path(m),
            start: m.get_one::<String>("start").cloned(),
            recover: m.get_flag("recover"),
            json: m.get_flag("json"),
            max_depth: parse_max_depth(m),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            tokens_path: p.tokens_path,
            options: ParseOptions {
                start: p.start,
                recover: p.recover,
                limits: Limits::new().max_stack_depth(p.max_depth),
            },
            json: p.json,
        }
    }
}

pub struct TraceParams {
    pub grammar_path: PathBuf,
    pub tokens_path: PathBuf,
    pub start: Option<String>,
    pub recover: bool,
    pub max_depth: u32,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: json is parsed but not extracted (unified flags)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            tokens_path: tokens_path(m),
            start: m.get_one::<String>("start").cloned(),
            recover: m.get_flag("recover"),
            max_depth: parse_max_depth(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar_path: p.grammar_path,
            tokens_path: p.tokens_path,
            options: ParseOptions {
                start: p.start,
                recover: p.recover,
                limits: Limits::new().max_stack_depth(p.max_depth),
            },
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn tokens_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("tokens_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_max_depth(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("max_depth")
        .copied()
        .unwrap_or_else(|| Limits::default().get_max_stack_depth())
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
