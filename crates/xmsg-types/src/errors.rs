//! # Error Types

use thiserror::Error;

/// Errors raised when building a [`ChainAddress`](crate::ChainAddress) from
/// a foreign representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input was not valid hex.
    #[error("invalid hex address: {0}")]
    InvalidHex(String),

    /// Input does not fit into 64 bytes.
    #[error("address too wide: {len} bytes > 64")]
    TooWide {
        /// Number of bytes supplied.
        len: usize,
    },

    /// Input was expected to have an exact width.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte width.
        expected: usize,
        /// Received byte width.
        got: usize,
    },
}
