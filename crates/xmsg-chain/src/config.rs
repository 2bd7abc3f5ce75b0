//! # Chain Configuration

use serde::{Deserialize, Serialize};
use xmsg_types::ChainSelector;

/// Static parameters of one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Selector identifying this chain to the router network.
    pub selector: ChainSelector,
    /// Height of the last block before the first call.
    pub genesis_block: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            selector: 0,
            genesis_block: 0,
        }
    }
}

impl ChainConfig {
    /// Config for the given selector starting at genesis.
    #[must_use]
    pub fn with_selector(selector: ChainSelector) -> Self {
        Self {
            selector,
            ..Default::default()
        }
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
