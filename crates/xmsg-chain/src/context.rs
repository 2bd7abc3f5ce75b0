//! # Call Context

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use xmsg_types::ChainAddress;

/// Who is calling and how much native value is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Immediate caller.
    pub caller: ChainAddress,
    /// Value attached to the call.
    pub value: U256,
}

impl CallContext {
    /// Context with attached value.
    #[must_use]
    pub fn new(caller: ChainAddress, value: U256) -> Self {
        Self { caller, value }
    }

    /// Context without value.
    #[must_use]
    pub fn from_caller(caller: ChainAddress) -> Self {
        Self::new(caller, U256::zero())
    }
}
