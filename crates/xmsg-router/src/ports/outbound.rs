//! # Outbound Ports
//!
//! Capabilities the router consumes: proof verification, fee handling and the
//! receiving application.

use crate::domain::FeeError;
use primitive_types::U256;
use xmsg_chain::CallContext;
use xmsg_types::{ChainAddress, Message};

/// Error returned by a receiving application.
pub type ReceiverError = Box<dyn std::error::Error + Send + Sync>;

/// Proof verifier - outbound port.
///
/// Inputs are untrusted. Implementations return `false` for anything they
/// cannot parse.
pub trait Verifier: Send + Sync {
    /// Checks `proof` for a single message and its payload.
    fn verify_message(&self, message: &Message, data: &[u8], proof_meta: u64, proof: &[u8])
        -> bool;

    /// Checks `proof` for a batch of messages.
    fn verify_messages(&self, messages: &[Message], proof_meta: u64, proof: &[u8]) -> bool;
}

/// Fee backend - outbound port.
pub trait FeeCollector: Send + Sync {
    /// Fee `sender` owes for one router call.
    fn fee(&self, sender: &ChainAddress) -> U256;

    /// Takes `ctx.value` from `ctx.caller` as the fee owed by `payer`.
    ///
    /// Fails if the value is below `fee(payer)`; excess is kept.
    fn pay_fee(&self, ctx: CallContext, payer: &ChainAddress) -> Result<(), FeeError>;
}

/// Receiving application - outbound port.
pub trait MessageReceiver: Send + Sync {
    /// Handles a verified message. `ctx.caller` is the delivering router.
    fn receive_message(
        &self,
        ctx: CallContext,
        message: &Message,
        data: &[u8],
    ) -> Result<(), ReceiverError>;
}
