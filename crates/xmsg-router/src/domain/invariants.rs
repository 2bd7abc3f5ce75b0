//! # Domain Invariants
//!
//! Checks every inbound and outbound call must pass.

use crate::domain::errors::RouterError;
use primitive_types::U256;
use xmsg_types::{ChainSelector, Message};

/// Invariant: Fee paid.
///
/// `paid` must cover the fee quoted for this call. Exact payment passes.
pub fn invariant_sufficient_fee(required: U256, paid: U256) -> Result<(), RouterError> {
    if paid < required {
        return Err(RouterError::InsufficientFee { required, paid });
    }
    Ok(())
}

/// Invariant: Payload binding.
///
/// keccak256(data) must equal `message.hashed_data`, so a payload cannot be
/// swapped under a verified message.
pub fn invariant_payload_bound(message: &Message, data: &[u8]) -> Result<(), RouterError> {
    if !message.binds(data) {
        return Err(RouterError::PayloadMismatch(message.hash()));
    }
    Ok(())
}

/// Invariant: Message is delivered on the chain it targets.
pub fn invariant_destination_matches(
    message: &Message,
    chain: ChainSelector,
) -> Result<(), RouterError> {
    if message.destination_chain_selector != chain {
        return Err(RouterError::WrongDestination {
            expected: chain,
            got: message.destination_chain_selector,
        });
    }
    Ok(())
}
