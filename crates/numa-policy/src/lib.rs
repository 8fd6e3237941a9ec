//! numa-policy — NUMA topology hint merging for workload placement.
//!
//! Resource providers (CPU manager, device manager, ...) each propose
//! candidate NUMA affinities for a workload. This crate merges those
//! proposals into a single recommended hint plus a feasibility verdict
//! that a scheduler turns into a node filter decision. It does NOT
//! discover hardware topology or compute provider hints.
//!
//! # Components
//!
//! - **`bitmask`** — Fixed-width NUMA node set with numeric ordering
//! - **`hint`** — Topology hints and their ranking
//! - **`candidates`** — Lazy cross product over provider hint lists
//! - **`policy`** — The `Policy` seam and the `restricted` merge policy
//! - **`config`** — TOML policy configuration

pub mod bitmask;
pub mod candidates;
pub mod config;
pub mod error;
pub mod hint;
pub mod policy;

pub use bitmask::{BitMask, BitMaskError, MASK_WIDTH};
pub use candidates::{CrossProduct, candidate_count, hint_lists};
pub use config::PolicyConfig;
pub use error::{PolicyError, PolicyResult};
pub use hint::{ProviderHintSet, TopologyHint};
pub use policy::{Admission, Policy, PolicyKind, RestrictedPolicy, build_policy};
