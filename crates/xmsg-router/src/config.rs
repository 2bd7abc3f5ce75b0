//! # Router Configuration

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xmsg_types::ChainAddress;

/// Router deployment parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Address the router is deployed at.
    pub address: ChainAddress,
    /// Account allowed to register additional verifiers.
    pub owner: ChainAddress,
}

impl RouterConfig {
    /// Config for a router at `address` administered by `owner`.
    #[must_use]
    pub fn new(address: ChainAddress, owner: ChainAddress) -> Self {
        Self { address, owner }
    }

    /// Parses a JSON config.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Flat fee schedule for [`FixedFeeCollector`](crate::FixedFeeCollector).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedFeeConfig {
    /// Vault address that receives fees.
    pub address: ChainAddress,
    /// Fee charged to every sender without an override.
    pub fee: U256,
    /// Per-sender fees.
    pub overrides: BTreeMap<ChainAddress, U256>,
}

impl Default for FixedFeeConfig {
    fn default() -> Self {
        Self {
            address: ChainAddress::ZERO,
            fee: U256::from(DEFAULT_FEE_WEI),
            overrides: BTreeMap::new(),
        }
    }
}

/// Default flat fee (0.001 of a 18-decimal native unit).
pub const DEFAULT_FEE_WEI: u64 = 1_000_000_000_000_000;

impl FixedFeeConfig {
    /// Flat `fee` collected at `address`.
    #[must_use]
    pub fn new(address: ChainAddress, fee: U256) -> Self {
        Self {
            address,
            fee,
            overrides: BTreeMap::new(),
        }
    }

    /// Adds a per-sender fee.
    #[must_use]
    pub fn with_override(mut self, sender: ChainAddress, fee: U256) -> Self {
        self.overrides.insert(sender, fee);
        self
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
