//! # Canonical Message Hashing
//!
//! A [`Message`] is encoded as eight big-endian 32-byte words:
//!
//! ```text
//! word 0  block_number
//! word 1  source_chain_selector
//! word 2  sender.lower
//! word 3  sender.upper
//! word 4  destination_chain_selector
//! word 5  receiver.lower
//! word 6  receiver.upper
//! word 7  hashed_data
//! ```
//!
//! This is exactly `abi.encode(message)` for the Solidity tuple
//! `(uint256, uint256, (bytes32, bytes32), uint256, (bytes32, bytes32), bytes32)`.
//! Every field is fixed-width, so no two field tuples share an encoding. The
//! message hash is Keccak-256 over those 256 bytes.

use crate::message::{Message, MessageHash};
use sha3::{Digest, Keccak256};

/// Width of the canonical encoding.
pub const ENCODED_MESSAGE_LEN: usize = 8 * 32;

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Content hash of a message payload.
#[must_use]
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Canonical fixed-width encoding of a message.
#[must_use]
pub fn encode_message(message: &Message) -> [u8; ENCODED_MESSAGE_LEN] {
    let words: [[u8; 32]; 8] = [
        u64_word(message.block_number),
        u64_word(message.source_chain_selector),
        message.sender.lower,
        message.sender.upper,
        u64_word(message.destination_chain_selector),
        message.receiver.lower,
        message.receiver.upper,
        message.hashed_data,
    ];

    let mut out = [0u8; ENCODED_MESSAGE_LEN];
    for (chunk, word) in out.chunks_exact_mut(32).zip(words.iter()) {
        chunk.copy_from_slice(word);
    }
    out
}

/// Canonical hash of a message.
#[must_use]
pub fn hash_message(message: &Message) -> MessageHash {
    MessageHash(keccak256(&encode_message(message)))
}
