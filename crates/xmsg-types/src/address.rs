//! # Chain Address
//!
//! A 64-byte address wide enough for every supported chain family.
//!
//! The address is stored as two 32-byte words, `lower` then `upper`. Native
//! addresses of 32 bytes or less live right-aligned in `lower` with `upper`
//! zeroed, so an EVM address `0xabcd..` becomes
//! `lower = 0x000000000000000000000000abcd..`, `upper = 0`.

use crate::errors::AddressError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of one address word.
pub const WORD_LEN: usize = 32;

/// Width of a full [`ChainAddress`].
pub const ADDRESS_LEN: usize = 2 * WORD_LEN;

/// Chain-agnostic, fixed-width address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChainAddress {
    /// First word.
    pub lower: [u8; WORD_LEN],
    /// Second word.
    pub upper: [u8; WORD_LEN],
}

impl ChainAddress {
    /// The zero address.
    pub const ZERO: Self = Self {
        lower: [0u8; WORD_LEN],
        upper: [0u8; WORD_LEN],
    };

    /// Creates an address from its two words.
    #[must_use]
    pub const fn new(lower: [u8; WORD_LEN], upper: [u8; WORD_LEN]) -> Self {
        Self { lower, upper }
    }

    /// Wraps a 20-byte EVM address.
    #[must_use]
    pub fn from_evm_address(address: [u8; 20]) -> Self {
        let mut lower = [0u8; WORD_LEN];
        lower[WORD_LEN - 20..].copy_from_slice(&address);
        Self {
            lower,
            upper: [0u8; WORD_LEN],
        }
    }

    /// Parses a `0x`-prefixed (or bare) 20-byte EVM address.
    pub fn from_evm_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = decode_hex(s)?;
        let address: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength {
                expected: 20,
                got: bytes.len(),
            })?;
        Ok(Self::from_evm_address(address))
    }

    /// Wraps a 32-byte address (e.g. an ed25519 public key).
    #[must_use]
    pub fn from_bytes32(address: [u8; WORD_LEN]) -> Self {
        Self {
            lower: address,
            upper: [0u8; WORD_LEN],
        }
    }

    /// Builds an address from raw bytes.
    ///
    /// Up to 32 bytes are right-aligned in `lower`. Exactly 64 bytes are split
    /// across both words. Any other width is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        match bytes.len() {
            len if len <= WORD_LEN => {
                let mut lower = [0u8; WORD_LEN];
                lower[WORD_LEN - len..].copy_from_slice(bytes);
                Ok(Self {
                    lower,
                    upper: [0u8; WORD_LEN],
                })
            }
            ADDRESS_LEN => {
                let mut lower = [0u8; WORD_LEN];
                let mut upper = [0u8; WORD_LEN];
                lower.copy_from_slice(&bytes[..WORD_LEN]);
                upper.copy_from_slice(&bytes[WORD_LEN..]);
                Ok(Self { lower, upper })
            }
            len if len > ADDRESS_LEN => Err(AddressError::TooWide { len }),
            len => Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                got: len,
            }),
        }
    }

    /// Parses a hex string of any width accepted by [`Self::from_bytes`].
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Returns the EVM address if this address only uses the low 20 bytes.
    #[must_use]
    pub fn to_evm_address(&self) -> Option<[u8; 20]> {
        if self.upper != [0u8; WORD_LEN] || self.lower[..WORD_LEN - 20] != [0u8; WORD_LEN - 20] {
            return None;
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.lower[WORD_LEN - 20..]);
        Some(out)
    }

    /// Returns the full 64-byte representation (`lower` then `upper`).
    #[must_use]
    pub fn as_bytes(&self) -> [u8; ADDRESS_LEN] {
        let mut out = [0u8; ADDRESS_LEN];
        out[..WORD_LEN].copy_from_slice(&self.lower);
        out[WORD_LEN..].copy_from_slice(&self.upper);
        out
    }

    /// Returns true for the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, AddressError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| AddressError::InvalidHex(e.to_string()))
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}{}", hex::encode(self.lower), hex::encode(self.upper))
    }
}

impl fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_evm_address() {
            Some(evm) => write!(f, "ChainAddress(0x{})", hex::encode(evm)),
            None => write!(f, "ChainAddress({self})"),
        }
    }
}

impl FromStr for ChainAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for ChainAddress {
    fn from(address: [u8; 20]) -> Self {
        Self::from_evm_address(address)
    }
}

impl Serialize for ChainAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
