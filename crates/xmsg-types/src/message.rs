//! # Message
//!
//! The unit of cross-chain communication.

use crate::address::ChainAddress;
use crate::hashing::{hash_data, hash_message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identifier of a logical chain.
pub type ChainSelector = u64;

/// Keccak-256 hash of a canonically encoded [`Message`].
///
/// Used as the message identifier for replay tracking and event correlation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct MessageHash(pub [u8; 32]);

impl MessageHash {
    /// Creates a hash from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}..{}", hex::encode(&self.0[..4]), hex::encode(&self.0[30..]))
    }
}

impl From<[u8; 32]> for MessageHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A cross-chain message.
///
/// The payload itself travels next to the message; only its hash is part of
/// the record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Height at which the message is effective on the source chain.
    pub block_number: u64,
    /// Origin chain.
    pub source_chain_selector: ChainSelector,
    /// Originating application.
    pub sender: ChainAddress,
    /// Target chain.
    pub destination_chain_selector: ChainSelector,
    /// Target application.
    pub receiver: ChainAddress,
    /// Keccak-256 of the payload.
    pub hashed_data: [u8; 32],
}

impl Message {
    /// Builds a message, hashing `data` into `hashed_data`.
    #[must_use]
    pub fn new(
        block_number: u64,
        source_chain_selector: ChainSelector,
        sender: ChainAddress,
        destination_chain_selector: ChainSelector,
        receiver: ChainAddress,
        data: &[u8],
    ) -> Self {
        Self {
            block_number,
            source_chain_selector,
            sender,
            destination_chain_selector,
            receiver,
            hashed_data: hash_data(data),
        }
    }

    /// Canonical hash of this message.
    #[must_use]
    pub fn hash(&self) -> MessageHash {
        hash_message(self)
    }

    /// Returns true if `data` is the payload this message commits to.
    #[must_use]
    pub fn binds(&self, data: &[u8]) -> bool {
        hash_data(data) == self.hashed_data
    }
}
