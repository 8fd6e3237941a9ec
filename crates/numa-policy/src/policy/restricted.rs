//! The `restricted` merge policy.
//!
//! Every combination of one hint per provider list is merged by ANDing the
//! affinity masks (and the node's own NUMA set) and the preferred flags.
//! Combinations with an empty mask are discarded. The best surviving combination wins by:
//! 1. Preferred over non-preferred
//! 2. Fewer NUMA nodes
//! 3. Numerically smaller mask
//!
//! The search is seeded with the default hint (every known node, not
//! preferred), which is also what gets returned when nothing is admitted.

use tracing::{debug, trace, warn};

use crate::bitmask::BitMask;
use crate::candidates::{CrossProduct, candidate_count, hint_lists};
use crate::error::PolicyResult;
use crate::hint::{ProviderHintSet, TopologyHint};
use crate::policy::{Admission, Policy};

/// Restricted policy bound to the NUMA nodes of one node.
#[derive(Debug, Clone)]
pub struct RestrictedPolicy {
    default_hint: TopologyHint,
}

impl RestrictedPolicy {
    pub const NAME: &'static str = "restricted";

    /// Build the policy for a node exposing `numa_nodes`.
    pub fn new(numa_nodes: &[usize]) -> PolicyResult<Self> {
        let affinity = BitMask::new(numa_nodes)?;
        Ok(Self {
            default_hint: TopologyHint::new(affinity, false),
        })
    }

    /// The full-coverage, non-preferred hint the search starts from.
    pub fn default_hint(&self) -> TopologyHint {
        self.default_hint
    }

    /// NUMA node IDs this policy was built for.
    pub fn numa_nodes(&self) -> Vec<usize> {
        self.default_hint.affinity.bits()
    }
}

impl Policy for RestrictedPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn predicate(&self, providers_hints: &[ProviderHintSet]) -> Admission {
        merge_restricted(self.default_hint, providers_hints)
    }
}

/// Merge one combination: AND of the masks, AND of the preferred flags.
///
/// The affinity is clipped to `default`, so nodes the machine does not have
/// never survive the merge. An empty combination places no constraint and
/// merges to `default` marked preferred.
fn merge_combination(combination: &[&TopologyHint], default: BitMask) -> TopologyHint {
    let masks = std::iter::once(default).chain(combination.iter().map(|h| h.affinity));
    let affinity = BitMask::and_all(masks).unwrap_or(default);
    let preferred = combination.iter().all(|h| h.preferred);
    TopologyHint::new(affinity, preferred)
}

/// Run the restricted merge over every provider group.
pub fn merge_restricted(default_hint: TopologyHint, providers_hints: &[ProviderHintSet]) -> Admission {
    let named = hint_lists(providers_hints);
    for (provider, hints) in &named {
        if hints.is_empty() {
            warn!(provider, "provider offered no topology hints, nothing can be admitted");
        }
    }

    let lists: Vec<&[TopologyHint]> = named.iter().map(|(_, hints)| *hints).collect();
    debug!(
        providers = lists.len(),
        candidates = candidate_count(&lists),
        "merging topology hints"
    );

    let mut best = default_hint;
    let mut admitted = false;
    let mut evaluated = 0usize;
    let mut discarded = 0usize;

    for combination in CrossProduct::new(lists) {
        evaluated += 1;
        let merged = merge_combination(&combination, default_hint.affinity);

        if merged.is_infeasible() {
            discarded += 1;
            trace!(preferred = merged.preferred, "discarded combination with no common NUMA node");
            continue;
        }

        admitted = true;
        if merged.is_better_than(&best) {
            trace!(
                affinity = %merged.affinity,
                preferred = merged.preferred,
                replaced = %best.affinity,
                "new best hint"
            );
            best = merged;
        }
    }

    if admitted {
        debug!(
            affinity = %best.affinity,
            preferred = best.preferred,
            evaluated,
            discarded,
            "topology hints merged"
        );
    } else {
        warn!(
            evaluated,
            discarded,
            "no NUMA node satisfies every provider"
        );
    }

    Admission {
        hint: best,
        admitted,
        evaluated,
        discarded,
    }
}
