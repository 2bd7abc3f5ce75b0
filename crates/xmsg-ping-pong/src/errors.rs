//! # PingPong Errors

use crate::payload::PayloadError;
use thiserror::Error;
use xmsg_chain::ChainError;
use xmsg_router::RouterError;
use xmsg_types::{ChainAddress, ChainSelector};

/// Application error types.
#[derive(Debug, Error)]
pub enum PingPongError {
    /// Payload tag is neither "ping" nor "pong".
    #[error("invalid message type: {0:?}")]
    InvalidMessageType(String),

    /// Sender is not the registered peer for the source chain.
    #[error("invalid message sender {sender} from chain {chain_selector}")]
    InvalidMessageSender {
        /// Source chain of the message.
        chain_selector: ChainSelector,
        /// Sender carried by the message.
        sender: ChainAddress,
    },

    /// Payload is not an ABI-encoded `(string, string)`.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    /// `set_peers` called with sequences of different lengths.
    #[error("invalid length: {selectors} selectors, {peers} peers")]
    InvalidLength {
        /// Number of selectors.
        selectors: usize,
        /// Number of peer addresses.
        peers: usize,
    },

    /// Caller is not the application owner.
    #[error("unauthorized caller: {0}")]
    Unauthorized(ChainAddress),

    /// `receive_message` called by something other than the router.
    #[error("caller {0} is not the router")]
    RouterUnauthorized(ChainAddress),

    /// No peer registered for the destination chain.
    #[error("no peer registered for chain {0}")]
    UnknownPeer(ChainSelector),

    /// Router rejected an outbound send.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// Ledger failure while moving value.
    #[error(transparent)]
    Chain(#[from] ChainError),
}
