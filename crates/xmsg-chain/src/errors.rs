//! # Error Types

use primitive_types::U256;
use thiserror::Error;
use xmsg_types::ChainAddress;

/// Errors raised by the chain environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Account cannot cover a value transfer.
    #[error("insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Account being debited.
        account: ChainAddress,
        /// Amount requested.
        required: U256,
        /// Amount held.
        available: U256,
    },

    /// Credit would overflow the account balance.
    #[error("balance overflow for {0}")]
    BalanceOverflow(ChainAddress),
}
