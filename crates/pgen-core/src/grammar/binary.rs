//! Binary serialization of assembled tables using postcard.
//!
//! Unlike JSON descriptions, the binary form stores the table exactly as
//! assembled, so loading it skips plan computation. Decoded tables are still
//! checked for dangling state, label and nonterminal ids.

use super::error::GrammarError;
use super::types::Grammar;

impl Grammar {
    /// Deserialize an assembled table.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        let grammar: Self = postcard::from_bytes(bytes)?;
        grammar.validate()?;
        Ok(grammar)
    }

    /// Serialize the assembled table.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}
