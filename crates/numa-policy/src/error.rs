//! Error types for topology policy construction.
//!
//! Merging never fails: an infeasible request is reported through
//! [`Admission::admitted`](crate::policy::Admission::admitted). These errors
//! cover building a policy from its configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::bitmask::BitMaskError;

/// Result type alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors that can occur while configuring a topology policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid NUMA node set: {0}")]
    InvalidNumaNode(#[from] BitMaskError),

    #[error("unsupported topology policy: {0}")]
    UnsupportedPolicy(String),

    #[error("no NUMA nodes configured")]
    NoNumaNodes,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
