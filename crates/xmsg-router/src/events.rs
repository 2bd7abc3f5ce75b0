//! # Router Notifications
//!
//! Events the router emits on its chain's notification log. Relays watch
//! [`RouterEvent::MessageSent`] on the source chain and submit the carried
//! message and payload to the destination router.

use serde::{Deserialize, Serialize};
use xmsg_types::{ChainSelector, Message, MessageHash};

/// Router event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterEvent {
    /// Outbound message accepted.
    MessageSent {
        /// Target chain.
        destination_chain_selector: ChainSelector,
        /// Hash of `message`.
        message_hash: MessageHash,
        /// Full message record.
        message: Message,
        /// Payload committed to by `message.hashed_data`.
        data: Vec<u8>,
    },
    /// Inbound message verified through the batch path.
    MessageDelivered {
        /// Hash of the delivered message.
        message_hash: MessageHash,
    },
    /// Inbound message dispatched to its receiver.
    MessageExecuted {
        /// Hash of the executed message.
        message_hash: MessageHash,
    },
    /// Verifier registered at `index`.
    VerifierAdded {
        /// Proof metadata value that selects the verifier.
        index: u64,
    },
}

impl RouterEvent {
    /// Hash of the message this event refers to.
    #[must_use]
    pub fn message_hash(&self) -> Option<MessageHash> {
        match self {
            Self::MessageSent { message_hash, .. }
            | Self::MessageDelivered { message_hash }
            | Self::MessageExecuted { message_hash } => Some(*message_hash),
            Self::VerifierAdded { .. } => None,
        }
    }
}
