//! Topology hints and the ordering used to rank them.
//!
//! A resource provider (CPU manager, device manager, ...) proposes one or
//! more [`TopologyHint`]s for a workload. Hints are ranked by:
//! - **Preference**: a preferred hint beats a non-preferred one
//! - **Width**: fewer NUMA nodes beats more
//! - **Numeric value**: a numerically smaller mask wins remaining ties

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitmask::BitMask;

/// Hints proposed by a group of providers, keyed by provider name.
///
/// Every entry contributes one hint list to the cross product, so a device
/// provider may report two resource classes in the same group.
pub type ProviderHintSet = HashMap<String, Vec<TopologyHint>>;

/// A candidate NUMA affinity for a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopologyHint {
    /// NUMA nodes the provider considers acceptable.
    pub affinity: BitMask,
    /// The provider considers this affinity ideal, not merely acceptable.
    #[serde(default)]
    pub preferred: bool,
}

impl TopologyHint {
    pub fn new(affinity: BitMask, preferred: bool) -> Self {
        Self {
            affinity,
            preferred,
        }
    }

    /// True if no NUMA node satisfies this hint.
    pub fn is_infeasible(&self) -> bool {
        self.affinity.is_empty()
    }

    /// Rank two hints; `Greater` means `self` is the better placement.
    ///
    /// `Equal` is returned only for identical hints.
    pub fn compare_quality(&self, other: &Self) -> Ordering {
        self.preferred.cmp(&other.preferred).then_with(|| {
            if self.affinity == other.affinity {
                Ordering::Equal
            } else if self.affinity.is_narrower_than(other.affinity) {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        })
    }

    /// Strictly better than `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.compare_quality(other) == Ordering::Greater
    }
}

impl fmt::Display for TopologyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{affinity: {}, preferred: {}}}",
            self.affinity, self.preferred
        )
    }
}
