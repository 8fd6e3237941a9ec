//! Lazy enumeration of merge candidates.
//!
//! A candidate picks exactly one hint from every provider hint list. The
//! [`CrossProduct`] iterator walks the product with an odometer of indices,
//! so only one combination is alive at a time no matter how many lists
//! take part.

use crate::hint::{ProviderHintSet, TopologyHint};

/// Flatten provider groups into the hint lists that take part in the
/// cross product, one list per provider entry.
///
/// Lists are ordered by provider name within each group. The merge result
/// does not depend on this order; it only keeps trace output stable.
pub fn hint_lists(providers_hints: &[ProviderHintSet]) -> Vec<(&str, &[TopologyHint])> {
    let mut lists = Vec::new();
    for group in providers_hints {
        let mut entries: Vec<(&str, &[TopologyHint])> = group
            .iter()
            .map(|(name, hints)| (name.as_str(), hints.as_slice()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        lists.extend(entries);
    }
    lists
}

/// Number of combinations the product of `lists` yields.
///
/// Saturates instead of overflowing; an empty set of lists has exactly one
/// (empty) combination.
pub fn candidate_count(lists: &[&[TopologyHint]]) -> usize {
    lists
        .iter()
        .fold(1usize, |acc, list| acc.saturating_mul(list.len()))
}

/// Iterator over every combination of one hint per list.
///
/// The last list varies fastest. A list with no hints empties the whole
/// product.
pub struct CrossProduct<'a> {
    lists: Vec<&'a [TopologyHint]>,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> CrossProduct<'a> {
    pub fn new(lists: Vec<&'a [TopologyHint]>) -> Self {
        let done = lists.iter().any(|l| l.is_empty());
        let indices = vec![0; lists.len()];
        Self {
            lists,
            indices,
            done,
        }
    }

    /// Advance the odometer; marks the iterator done after the last
    /// combination.
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.done = true;
    }
}

impl<'a> Iterator for CrossProduct<'a> {
    type Item = Vec<&'a TopologyHint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let combination = self
            .indices
            .iter()
            .zip(&self.lists)
            .map(|(&i, list)| &list[i])
            .collect();
        self.advance();
        Some(combination)
    }
}
