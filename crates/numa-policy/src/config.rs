//! Topology policy configuration (TOML).
//!
//! ```toml
//! policy = "restricted"
//! numa_nodes = [0, 1]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::policy::{Policy, PolicyKind, build_policy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Merge policy to run. Defaults to `restricted`.
    #[serde(default)]
    pub policy: PolicyKind,
    /// NUMA node IDs of the node being evaluated.
    pub numa_nodes: Vec<usize>,
}

impl PolicyConfig {
    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PolicyResult<Self> {
        let config: PolicyConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> PolicyResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Restricted policy over nodes `0..count`.
    pub fn with_node_count(count: usize) -> Self {
        Self {
            policy: PolicyKind::Restricted,
            numa_nodes: (0..count).collect(),
        }
    }

    /// Reject configurations no workload could ever be admitted under.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.numa_nodes.is_empty() {
            return Err(PolicyError::NoNumaNodes);
        }
        Ok(())
    }

    /// Validate and build the configured policy.
    pub fn build_policy(&self) -> PolicyResult<Box<dyn Policy>> {
        self.validate()?;
        build_policy(self.policy, &self.numa_nodes)
    }
}
