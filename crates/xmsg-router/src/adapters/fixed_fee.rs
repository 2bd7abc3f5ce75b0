//! Fixed Fee Collector
//!
//! Implements `FeeCollector` with a flat fee and optional per-sender
//! overrides. Fees are held on the chain ledger at the collector's address.

use crate::config::FixedFeeConfig;
use crate::domain::FeeError;
use crate::ports::outbound::FeeCollector;
use primitive_types::U256;
use std::sync::Arc;
use tracing::{debug, warn};
use xmsg_chain::{CallContext, Chain};
use xmsg_types::ChainAddress;

/// Flat-fee backend.
#[derive(Debug)]
pub struct FixedFeeCollector {
    chain: Arc<Chain>,
    config: FixedFeeConfig,
}

impl FixedFeeCollector {
    /// Creates a collector on `chain`.
    pub fn new(chain: Arc<Chain>, config: FixedFeeConfig) -> Self {
        Self { chain, config }
    }

    /// Vault address.
    #[must_use]
    pub fn address(&self) -> ChainAddress {
        self.config.address
    }

    /// Total value collected so far.
    #[must_use]
    pub fn collected(&self) -> U256 {
        self.chain.balance_of(&self.config.address)
    }
}

impl FeeCollector for FixedFeeCollector {
    fn fee(&self, sender: &ChainAddress) -> U256 {
        self.config
            .overrides
            .get(sender)
            .copied()
            .unwrap_or(self.config.fee)
    }

    fn pay_fee(&self, ctx: CallContext, payer: &ChainAddress) -> Result<(), FeeError> {
        let required = self.fee(payer);
        if ctx.value < required {
            warn!(%payer, %required, paid = %ctx.value, "fee underpaid");
            return Err(FeeError::InsufficientFee {
                required,
                paid: ctx.value,
            });
        }
        self.chain
            .transfer(ctx.caller, self.config.address, ctx.value)?;
        debug!(%payer, paid = %ctx.value, "fee collected");
        Ok(())
    }
}
