//! # PingPong Notifications

use serde::{Deserialize, Serialize};
use xmsg_types::{ChainSelector, MessageHash};

/// Event emitted by a [`PingPong`](crate::PingPong) application.
///
/// Outbound events carry the destination chain, inbound events the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PingPongEvent {
    /// Ping handed to the router.
    PingSent {
        /// Destination chain.
        chain_selector: ChainSelector,
        /// Hash of the outbound message.
        message_hash: MessageHash,
    },
    /// Pong handed to the router in reply to a ping.
    PongSent {
        /// Destination chain.
        chain_selector: ChainSelector,
        /// Hash of the outbound message.
        message_hash: MessageHash,
    },
    /// Ping delivered from a peer.
    PingReceived {
        /// Source chain.
        chain_selector: ChainSelector,
        /// Hash of the inbound message.
        message_hash: MessageHash,
    },
    /// Pong delivered from a peer.
    PongReceived {
        /// Source chain.
        chain_selector: ChainSelector,
        /// Hash of the inbound message.
        message_hash: MessageHash,
    },
}

impl PingPongEvent {
    /// Hash of the message this event refers to.
    #[must_use]
    pub fn message_hash(&self) -> MessageHash {
        match self {
            Self::PingSent { message_hash, .. }
            | Self::PongSent { message_hash, .. }
            | Self::PingReceived { message_hash, .. }
            | Self::PongReceived { message_hash, .. } => *message_hash,
        }
    }
}
