//! # Inbound Ports
//!
//! What applications and relays can ask of a router.

use crate::domain::RouterError;
use crate::ports::outbound::MessageReceiver;
use primitive_types::U256;
use std::sync::{Arc, Weak};
use xmsg_chain::{CallContext, Chain};
use xmsg_types::{ChainAddress, ChainSelector, Message, MessageHash};

/// Router API - inbound port.
pub trait RouterApi: Send + Sync {
    /// Address of the router contract.
    fn address(&self) -> ChainAddress;

    /// Selector of the chain the router runs on.
    fn chain_selector(&self) -> ChainSelector;

    /// Chain environment the router is deployed on.
    fn chain(&self) -> &Arc<Chain>;

    /// Fee `sender` must attach to its next call. Quoted fresh every time.
    fn fee(&self, sender: &ChainAddress) -> U256;

    /// Sends `data` to `receiver` on `destination_chain_selector`.
    ///
    /// The sender of the built message is `ctx.caller`.
    fn send_message(
        &self,
        ctx: CallContext,
        destination_chain_selector: ChainSelector,
        receiver: ChainAddress,
        data: &[u8],
    ) -> Result<MessageHash, RouterError>;

    /// Verifies `message` with the verifier selected by `proof_meta` and
    /// dispatches it to its receiver, at most once per message hash.
    fn deliver_and_execute_message(
        &self,
        ctx: CallContext,
        message: &Message,
        data: &[u8],
        proof_meta: u64,
        proof: &[u8],
    ) -> Result<(), RouterError>;

    /// Verifies a batch of messages under one proof and records them as
    /// delivered without executing them.
    fn deliver_messages(
        &self,
        ctx: CallContext,
        messages: &[Message],
        proof_meta: u64,
        proof: &[u8],
    ) -> Result<(), RouterError>;

    /// Executes a message previously recorded by [`Self::deliver_messages`].
    fn execute_message(
        &self,
        ctx: CallContext,
        message: &Message,
        data: &[u8],
    ) -> Result<(), RouterError>;

    /// Makes `receiver` reachable at `address`.
    fn register_receiver(&self, address: ChainAddress, receiver: Weak<dyn MessageReceiver>);

    /// Whether the message has been verified (by either delivery path).
    ///
    /// Both queries wait for any call in progress on the chain, so a caller
    /// on another thread never observes a mark that is later rolled back.
    fn is_delivered(&self, hash: &MessageHash) -> bool;

    /// Whether the message has been dispatched to its receiver.
    fn is_executed(&self, hash: &MessageHash) -> bool;
}
