//! Symbol frequency analysis.

use std::collections::HashMap;

use log::debug;

use crate::Symbol;

/// Occurrence count of every distinct symbol seen in a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Symbol, u64>,
}

impl FrequencyTable {
    /// Count every symbol of `symbols`, consuming it exactly once.
    pub fn from_symbols<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        let mut counts = HashMap::new();
        for s in symbols {
            *counts.entry(s).or_insert(0) += 1;
        }
        debug!("frequency analysis found {} distinct symbols", counts.len());
        Self { counts }
    }

    /// Count the characters of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }

    /// Occurrence count of `symbol`, if it was seen.
    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no symbol was seen.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(symbol, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_counts_hello_world() {
        let table = FrequencyTable::from_text("hello world");
        assert_eq!(table.len(), 8);
        assert_eq!(table.get('l'), Some(3));
        assert_eq!(table.get('o'), Some(2));
        assert_eq!(table.get(' '), Some(1));
        assert_eq!(table.get('z'), None);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_empty_stream_gives_empty_table() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_non_ascii_symbols() {
        let table: FrequencyTable = "héé€".chars().collect();
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.get('€'), Some(1));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_total_matches_length(text in ".{0,200}") {
            let table = FrequencyTable::from_text(&text);
            prop_assert_eq!(table.total(), text.chars().count() as u64);
            for (s, c) in table.iter() {
                prop_assert!(c >= 1);
                prop_assert_eq!(c, text.chars().filter(|&x| x == s).count() as u64);
            }
        }
    }
}
