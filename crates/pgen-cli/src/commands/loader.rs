//! Reading grammar tables and token streams from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use pgen_core::{Grammar, Position, Token, TokenType};
use serde::Deserialize;

use super::error::{CliError, display_path, is_stdin};

/// Load a grammar: `.bin` files are assembled tables, anything else is a
/// JSON rule description. Stdin is sniffed by its first byte.
pub fn load_grammar(path: &Path) -> Result<Grammar, CliError> {
    let bytes = read_input(path)?;
    let binary = if is_stdin(path) {
        !looks_like_json(&bytes)
    } else {
        path.extension().is_some_and(|ext| ext == "bin")
    };

    let grammar = if binary {
        Grammar::from_binary(&bytes)
    } else {
        let text = String::from_utf8_lossy(&bytes);
        Grammar::from_json(&text)
    };
    grammar.map_err(|source| CliError::Grammar {
        path: display_path(path),
        source,
    })
}

/// Load a JSON token list, resolving token names against `grammar`.
pub fn load_tokens(path: &Path, grammar: &Grammar) -> Result<Vec<Token>, CliError> {
    let bytes = read_input(path)?;
    let text = String::from_utf8_lossy(&bytes);
    tokens_from_json(&text, grammar).map_err(|err| err.at(path))
}

/// Parse a token list such as
/// `[{"type": "NAME", "value": "x", "start": [1, 0], "prefix": ""}]`.
///
/// `type` is a token number or a token name declared by the grammar;
/// `start` and `prefix` are optional.
pub fn tokens_from_json(json: &str, grammar: &Grammar) -> Result<Vec<Token>, TokenError> {
    let raw: Vec<RawToken> = serde_json::from_str(json).map_err(TokenError::Json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<Token, TokenError> {
            let kind = match raw.kind {
                RawKind::Number(kind) => kind,
                RawKind::Name(name) => grammar
                    .token_type(&name)
                    .ok_or(TokenError::UnknownType { index, name })?,
            };
            Ok(Token::new(kind, raw.value, raw.start).with_prefix(raw.prefix))
        })
        .collect()
}

/// Token list failure, before it is tied to a file.
#[derive(Debug)]
pub enum TokenError {
    Json(serde_json::Error),
    UnknownType { index: usize, name: String },
}

impl TokenError {
    fn at(self, path: &Path) -> CliError {
        let path = display_path(path);
        match self {
            Self::Json(source) => CliError::Tokens { path, source },
            Self::UnknownType { index, name } => CliError::UnknownTokenType { path, index, name },
        }
    }
}

#[derive(Deserialize)]
struct RawToken {
    #[serde(rename = "type")]
    kind: RawKind,
    value: String,
    #[serde(default)]
    start: Position,
    #[serde(default)]
    prefix: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKind {
    Number(TokenType),
    Name(String),
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    if is_stdin(path) {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| CliError::read(path, e))?;
        return Ok(buf);
    }
    fs::read(path).map_err(|e| CliError::read(path, e))
}

fn looks_like_json(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}
