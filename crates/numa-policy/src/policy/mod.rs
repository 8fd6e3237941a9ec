//! Topology merge policies.
//!
//! A [`Policy`] turns the hints proposed by every resource provider into one
//! [`Admission`]: the best merged hint and whether the workload fits the
//! node at all. Policies hold no per-request state and can be shared across
//! threads.

pub mod restricted;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::hint::{ProviderHintSet, TopologyHint};

pub use restricted::{RestrictedPolicy, merge_restricted};

/// Verdict of a single merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// The selected hint. Carries no actionable affinity when not admitted.
    pub hint: TopologyHint,
    /// At least one combination of provider hints shares a NUMA node.
    pub admitted: bool,
    /// Combinations evaluated.
    pub evaluated: usize,
    /// Combinations discarded for an empty intersection.
    pub discarded: usize,
}

impl Admission {
    /// Split into the `(best hint, admitted)` pair.
    pub fn into_parts(self) -> (TopologyHint, bool) {
        (self.hint, self.admitted)
    }
}

/// A topology merge policy.
pub trait Policy: Send + Sync {
    /// Policy name as it appears in configuration.
    fn name(&self) -> &'static str;

    /// Merge the hints of every provider group into one verdict.
    fn predicate(&self, providers_hints: &[ProviderHintSet]) -> Admission;
}

/// Supported policy names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Reject placements where no NUMA node satisfies every provider.
    #[default]
    Restricted,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Restricted => "restricted",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "restricted" => Ok(PolicyKind::Restricted),
            other => Err(PolicyError::UnsupportedPolicy(other.to_string())),
        }
    }
}

/// Build a policy of the given kind over `numa_nodes`.
pub fn build_policy(kind: PolicyKind, numa_nodes: &[usize]) -> PolicyResult<Box<dyn Policy>> {
    match kind {
        PolicyKind::Restricted => Ok(Box::new(RestrictedPolicy::new(numa_nodes)?)),
    }
}
