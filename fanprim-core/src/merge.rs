//! Keyed merge of traversal edges.
//!
//! [`MergedEdgeSet`] folds oriented edges into one entry per unordered vertex
//! pair. A later insertion for a pair overwrites the stored weight; the
//! entry keeps the position of the pair's first insertion so iteration order
//! is stable for renderers.

use std::collections::HashMap;

use crate::{graph::Weight, prim::TreeEdge};

/// Unordered vertex pair stored in canonical `(low, high)` form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeKey {
    low: usize,
    high: usize,
}

impl EdgeKey {
    /// Canonicalises the pair `{a, b}`.
    ///
    /// # Examples
    /// ```
    /// use fanprim_core::EdgeKey;
    ///
    /// assert_eq!(EdgeKey::new(4, 1), EdgeKey::new(1, 4));
    /// assert_eq!(EdgeKey::new(4, 1).low(), 1);
    /// ```
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn low(&self) -> usize { self.low }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn high(&self) -> usize { self.high }
}

/// One entry of a [`MergedEdgeSet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergedEdge {
    key: EdgeKey,
    weight: Weight,
    occurrences: usize,
}

impl MergedEdge {
    /// Returns the unordered vertex pair.
    #[must_use]
    #[rustfmt::skip]
    pub fn key(&self) -> EdgeKey { self.key }

    /// Returns the weight written by the most recent insertion.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Weight { self.weight }

    /// Returns how many insertions targeted this pair.
    #[must_use]
    #[rustfmt::skip]
    pub fn occurrences(&self) -> usize { self.occurrences }
}

/// Last-write-wins mapping from unordered vertex pairs to weights.
///
/// # Examples
/// ```
/// use fanprim_core::{EdgeKey, MergedEdgeSet, TreeEdge};
///
/// let merged = MergedEdgeSet::from_edges(&[
///     TreeEdge::new(0, 1, 2.0),
///     TreeEdge::new(1, 2, 3.0),
///     TreeEdge::new(1, 0, 2.0),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged.weight(EdgeKey::new(0, 1)), Some(2.0));
/// assert_eq!(merged.get(EdgeKey::new(1, 0)).map(|e| e.occurrences()), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedEdgeSet {
    entries: Vec<MergedEdge>,
    index: HashMap<EdgeKey, usize>,
}

impl MergedEdgeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `edges` into a new set in order.
    #[must_use]
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a TreeEdge>) -> Self {
        let mut merged = Self::new();
        for edge in edges {
            merged.insert(edge.from(), edge.to(), edge.weight());
        }
        merged
    }

    /// Records `weight` for the pair `{u, v}`, overwriting any earlier weight.
    ///
    /// Returns the weight previously stored for the pair.
    pub fn insert(&mut self, u: usize, v: usize, weight: Weight) -> Option<Weight> {
        let key = EdgeKey::new(u, v);
        if let Some(entry) = self
            .index
            .get(&key)
            .and_then(|&position| self.entries.get_mut(position))
        {
            let previous = entry.weight;
            entry.weight = weight;
            entry.occurrences = entry.occurrences.saturating_add(1);
            return Some(previous);
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(MergedEdge {
            key,
            weight,
            occurrences: 1,
        });
        None
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: EdgeKey) -> Option<&MergedEdge> {
        self.index
            .get(&key)
            .and_then(|&position| self.entries.get(position))
    }

    /// Returns the weight recorded for `key`.
    #[must_use]
    pub fn weight(&self, key: EdgeKey) -> Option<Weight> {
        self.get(key).map(MergedEdge::weight)
    }

    /// Returns the number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in first-insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MergedEdge> + '_ {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MergedEdgeSet {
    type Item = &'a MergedEdge;
    type IntoIter = std::slice::Iter<'a, MergedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
