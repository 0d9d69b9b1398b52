//! Codewords derived from a [`HuffmanTree`].

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node, NodeId};
use crate::Symbol;

/// Root-to-leaf path of a symbol: `false` descends left, `true` right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword(Vec<bool>);

impl Codeword {
    /// The bits of the codeword, first-written first.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for codewords produced by [`CodeTable::from_tree`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from every symbol of a tree to its codeword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<Symbol, Codeword>,
}

impl CodeTable {
    /// Walk `tree` depth-first and record the path to every leaf.
    ///
    /// A singleton tree has no path to walk; its only symbol gets the
    /// one-bit codeword `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = HashMap::with_capacity(tree.size());
        Self::build_codes(tree, tree.root(), Vec::new(), &mut codes);
        Self { codes }
    }

    fn build_codes(
        tree: &HuffmanTree,
        id: NodeId,
        prefix: Vec<bool>,
        codes: &mut HashMap<Symbol, Codeword>,
    ) {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => {
                let code = if prefix.is_empty() { vec![true] } else { prefix };
                let code = Codeword(code);
                trace!("codeword {:?} -> {}", symbol, code);
                codes.insert(*symbol, code);
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                Self::build_codes(tree, *left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(true);
                Self::build_codes(tree, *right, right_prefix, codes);
            }
        }
    }

    /// Codeword of `symbol`, if it has one.
    pub fn get(&self, symbol: Symbol) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for the table of an empty input.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, codeword)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Codeword)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Entries ordered by codeword length, then by symbol.
    pub fn sorted(&self) -> Vec<(Symbol, &Codeword)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then(a.0.cmp(&b.0)));
        entries
    }

    /// Bits needed to encode a stream with the given frequencies.
    ///
    /// Symbols without a codeword contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(s, count)| self.get(s).map(|c| count * c.len() as u64))
            .sum()
    }
}
