use std::io;
use std::path::Path;

use pgen_core::GrammarError;
use pgen_vm::ParseError;

/// Everything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: String, source: io::Error },

    #[error("{path}: {source}")]
    Grammar {
        path: String,
        source: GrammarError,
    },

    #[error("{path}: invalid token list: {source}")]
    Tokens {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path}: token {index} has unknown type `{name}`")]
    UnknownTokenType {
        path: String,
        index: usize,
        name: String,
    },

    #[error("grammar and tokens cannot both be read from stdin")]
    StdinTwice,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to encode JSON: {0}")]
    Json(serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: display_path(path),
            source,
        }
    }

    /// 1 when the input did not parse, 2 for anything that stopped the
    /// parse from running.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(ParseError::UnknownStart(_)) => 2,
            Self::Parse(_) => 1,
            _ => 2,
        }
    }
}

pub(crate) fn display_path(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_owned()
    } else {
        path.display().to_string()
    }
}

pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
