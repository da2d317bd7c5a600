use serde::{Deserialize, Serialize};

use crate::scheme::NamingScheme;

/// Parameters that shape the pseudonyms of one map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub scheme: NamingScheme,
    /// Offset added to the position for numbered schemes.
    pub start_at: u32,
    /// When set, the deduplicated names are shuffled deterministically
    /// before labels are assigned, so labels do not follow upload order.
    pub seed: Option<u32>,
}

impl NamingConfig {
    pub fn with_scheme(mut self, scheme: NamingScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_start_at(mut self, start_at: u32) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            scheme: NamingScheme::default(),
            start_at: 1,
            seed: None,
        }
    }
}
