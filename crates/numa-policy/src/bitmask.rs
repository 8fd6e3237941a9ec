//! Fixed-width bit set over NUMA node IDs.
//!
//! A [`BitMask`] marks which NUMA nodes a hint considers acceptable. The
//! width is fixed at 64 nodes, which covers every shipping NUMA layout.
//! Masks are ordered numerically, so the tie-break between two hints of
//! equal width is stable regardless of how the hints were collected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of NUMA node IDs a [`BitMask`] can hold.
pub const MASK_WIDTH: usize = 64;

/// Errors raised while building a [`BitMask`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitMaskError {
    #[error("NUMA node {node} is out of range (mask width is {width})")]
    OutOfRange { node: usize, width: usize },
}

/// A set of NUMA node IDs in `0..MASK_WIDTH`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct BitMask(u64);

impl BitMask {
    /// Build a mask with exactly the given node IDs set.
    pub fn new(nodes: &[usize]) -> Result<Self, BitMaskError> {
        Self::from_nodes(nodes.iter().copied())
    }

    /// Build a mask from any iterator of node IDs.
    pub fn from_nodes<I>(nodes: I) -> Result<Self, BitMaskError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut mask = Self::empty();
        for node in nodes {
            mask.add(node)?;
        }
        Ok(mask)
    }

    /// The mask with no node set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Mask with nodes `0..count` set. `count` is clamped to the mask width.
    pub fn full(count: usize) -> Self {
        match count {
            0 => Self::empty(),
            n if n >= MASK_WIDTH => Self(u64::MAX),
            n => Self((1u64 << n) - 1),
        }
    }

    /// Set a single node.
    pub fn add(&mut self, node: usize) -> Result<(), BitMaskError> {
        if node >= MASK_WIDTH {
            return Err(BitMaskError::OutOfRange {
                node,
                width: MASK_WIDTH,
            });
        }
        self.0 |= 1u64 << node;
        Ok(())
    }

    /// Bitwise intersection.
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Intersection of every mask yielded by `masks`.
    ///
    /// Returns `None` for an empty iterator: the intersection over nothing
    /// has no natural width, so the caller decides what "unconstrained"
    /// means.
    pub fn and_all<I>(masks: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        masks.into_iter().reduce(Self::and)
    }

    /// Number of nodes set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_set(self, node: usize) -> bool {
        node < MASK_WIDTH && self.0 & (1u64 << node) != 0
    }

    /// Set node IDs in ascending order.
    pub fn bits(self) -> Vec<usize> {
        (0..MASK_WIDTH).filter(|&n| self.is_set(n)).collect()
    }

    /// True if `self` covers fewer nodes than `other`, or the same number
    /// of nodes with a smaller numeric value.
    pub fn is_narrower_than(self, other: Self) -> bool {
        match self.count().cmp(&other.count()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => self.0 < other.0,
            std::cmp::Ordering::Greater => false,
        }
    }
}

impl TryFrom<Vec<usize>> for BitMask {
    type Error = BitMaskError;

    fn try_from(nodes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(&nodes)
    }
}

impl From<BitMask> for Vec<usize> {
    fn from(mask: BitMask) -> Self {
        mask.bits()
    }
}

impl fmt::Display for BitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.bits().into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "]")
    }
}
