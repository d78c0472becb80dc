//! Tree construction seam.

use pgen_core::{Grammar, NonterminalId, Token};

/// Builds the caller's tree nodes.
///
/// The engine never looks inside nodes; it only moves them from frame to
/// frame. `node` is never called with a single child: a frame that matched
/// exactly one child hands that child to its parent unchanged.
pub trait NodeBuilder {
    type Node;

    /// Build a leaf for a shifted token.
    fn leaf(&mut self, grammar: &Grammar, token: &Token) -> Self::Node;

    /// Build an internal node for a completed rule.
    fn node(
        &mut self,
        grammar: &Grammar,
        nonterminal: NonterminalId,
        children: Vec<Self::Node>,
    ) -> Self::Node;

    /// Build a leaf for a token that recovery kept out of the grammar's
    /// structure. Defaults to [`leaf`](Self::leaf).
    fn error_leaf(&mut self, grammar: &Grammar, token: &Token) -> Self::Node {
        self.leaf(grammar, token)
    }
}
