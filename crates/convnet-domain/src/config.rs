//! Configuration for network construction
//!
//! Controls which records are considered and how aggressively the finished
//! graph is pruned. The supporter threshold is a fixed constant
//! ([`crate::filter::MIN_SUPPORTERS`]) and is not part of this configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a network build
///
/// # Examples
///
/// ```
/// use convnet_domain::NetworkConfig;
///
/// let config = NetworkConfig::default();
/// assert!(!config.prune_low_degree);
///
/// let config = NetworkConfig::strict();
/// assert!(config.prune_low_degree);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Drop persons with total degree ≤ 1 after isolated-node removal
    /// Default: false
    #[serde(default)]
    pub prune_low_degree: bool,

    /// Convention ids to include; empty means every convention
    /// Default: empty
    #[serde(default)]
    pub conventions: Vec<String>,

    /// Include records scraped as motions, not only amendments
    /// Default: true
    #[serde(default = "default_include_motions")]
    pub include_motions: bool,
}

fn default_include_motions() -> bool {
    true
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            prune_low_degree: false,
            conventions: Vec::new(),
            include_motions: true,
        }
    }
}

impl NetworkConfig {
    /// Strict configuration: amendments only, low-degree persons pruned
    ///
    /// Suitable for rendering dense conventions where one-off supporters
    /// drown out the structure.
    pub fn strict() -> Self {
        Self {
            prune_low_degree: true,
            conventions: Vec::new(),
            include_motions: false,
        }
    }

    /// Restrict the build to the given conventions
    pub fn with_conventions<I, S>(mut self, conventions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conventions = conventions.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self.conventions.iter().find(|c| c.trim().is_empty()) {
            return Err(format!("convention ids must not be blank (got '{}')", blank));
        }
        Ok(())
    }
}
