//! # Shared Types Crate
//!
//! Value types shared by the router, the chain environment and applications.
//!
//! ## Design Principles
//!
//! - **Chain-agnostic addressing**: [`ChainAddress`] is two 32-byte words wide
//!   so addresses of any chain family fit without truncation.
//! - **Canonical hashing**: a [`Message`] is hashed over a fixed-width
//!   encoding of its six fields, see [`hashing`]. The encoding is the Solidity
//!   ABI encoding of the message tuple so off-chain relays can reproduce it.

pub mod address;
pub mod errors;
pub mod hashing;
pub mod message;

pub use address::ChainAddress;
pub use errors::AddressError;
pub use hashing::{encode_message, hash_data, hash_message, keccak256, ENCODED_MESSAGE_LEN};
pub use message::{ChainSelector, Message, MessageHash};
