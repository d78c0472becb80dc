//! JSON loading of per-rule DFA descriptions.
//!
//! The format mirrors what a pgen-style grammar compiler emits:
//!
//! ```json
//! {
//!   "name": "toy",
//!   "name_token": "NAME",
//!   "tokens": { "ENDMARKER": 0, "NAME": 1, "PLUS": 14 },
//!   "operators": { "+": "PLUS" },
//!   "rules": {
//!     "sum": [
//!       { "arcs": [["NAME", 1]] },
//!       { "final": true, "arcs": [["'+'", 0]] }
//!     ]
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use super::builder::{DfaStateDef, GrammarBuilder};
use super::error::GrammarError;
use super::types::Grammar;
use crate::TokenType;

impl Grammar {
    /// Parse a DFA description from JSON and assemble it.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json)?;
        GrammarBuilder::try_from(raw)?.build()
    }
}

/// Raw grammar structure matching the JSON format.
#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: String,
    #[serde(default)]
    name_token: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    tokens: IndexMap<String, TokenType>,
    #[serde(default)]
    operators: IndexMap<String, String>,
    /// IndexMap preserves definition order; the first rule is the default start.
    rules: IndexMap<String, Vec<RawState>>,
}

#[derive(Debug, Deserialize)]
struct RawState {
    #[serde(default, rename = "final")]
    is_final: bool,
    #[serde(default)]
    arcs: Vec<(String, usize)>,
}

impl From<RawState> for DfaStateDef {
    fn from(raw: RawState) -> Self {
        Self {
            is_final: raw.is_final,
            arcs: raw.arcs,
        }
    }
}

impl TryFrom<RawGrammar> for GrammarBuilder {
    type Error = GrammarError;

    fn try_from(raw: RawGrammar) -> Result<Self, Self::Error> {
        let name_token = match &raw.name_token {
            Some(name) => Some(
                *raw.tokens
                    .get(name)
                    .ok_or_else(|| GrammarError::UnknownToken(name.clone()))?,
            ),
            None => None,
        };

        let mut builder = GrammarBuilder::new(raw.name);
        if let Some(kind) = name_token {
            builder = builder.name_token(kind);
        }
        for (name, kind) in raw.tokens {
            builder = builder.token(name, kind);
        }
        for (literal, token) in raw.operators {
            builder = builder.operator(literal, token);
        }
        for (name, states) in raw.rules {
            builder = builder.rule(name, states.into_iter().map(DfaStateDef::from));
        }
        if let Some(start) = raw.start {
            builder = builder.start(start);
        }
        Ok(builder)
    }
}
