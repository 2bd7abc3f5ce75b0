//! # Payload Codec
//!
//! PingPong payloads are the Solidity ABI encoding of `(string tag, string text)`:
//!
//! ```text
//! word 0        offset of tag  (from start of payload)
//! word 1        offset of text
//! at offset     length word, then UTF-8 bytes zero-padded to 32
//! ```
//!
//! Decoding accepts any in-bounds offsets, not just the canonical layout.

use std::fmt;
use thiserror::Error;

const WORD: usize = 32;

/// Payload decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Payload shorter than the two head words.
    #[error("payload too short: {0} bytes")]
    TooShort(usize),

    /// A head offset points outside the payload.
    #[error("string offset {offset} out of bounds for {len}-byte payload")]
    OffsetOutOfBounds {
        /// Offset read from the head.
        offset: usize,
        /// Payload length.
        len: usize,
    },

    /// A length word runs past the end of the payload.
    #[error("string of {declared} bytes at offset {offset} overruns payload")]
    LengthOutOfBounds {
        /// Offset of the string.
        offset: usize,
        /// Declared length.
        declared: usize,
    },

    /// A word does not fit a `usize`.
    #[error("word at {0} is too large")]
    WordOverflow(usize),

    /// String bytes are not UTF-8.
    #[error("string at offset {0} is not valid UTF-8")]
    InvalidUtf8(usize),
}

/// The two message types the application understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Request; answered with a pong.
    Ping,
    /// Reply; terminal.
    Pong,
}

impl MessageKind {
    /// Payload tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Pong => "pong",
        }
    }

    /// Parses a payload tag. Matching is exact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ping" => Some(Self::Ping),
            "pong" => Some(Self::Pong),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// ABI-encodes `(tag, text)`.
#[must_use]
pub fn encode_payload(tag: &str, text: &str) -> Vec<u8> {
    let tag_len = padded_len(tag.len());
    let text_offset = 2 * WORD + WORD + tag_len;

    let mut out = Vec::with_capacity(text_offset + WORD + padded_len(text.len()));
    out.extend_from_slice(&word(2 * WORD));
    out.extend_from_slice(&word(text_offset));
    append_string(&mut out, tag);
    append_string(&mut out, text);
    out
}

/// Decodes an ABI-encoded `(string, string)`.
pub fn decode_payload(data: &[u8]) -> Result<(String, String), PayloadError> {
    if data.len() < 2 * WORD {
        return Err(PayloadError::TooShort(data.len()));
    }
    let tag = read_string(data, read_word(data, 0)?)?;
    let text = read_string(data, read_word(data, WORD)?)?;
    Ok((tag, text))
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn word(value: usize) -> [u8; WORD] {
    let mut out = [0u8; WORD];
    out[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    out
}

fn append_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&word(s.len()));
    out.extend_from_slice(s.as_bytes());
    out.resize(out.len() + padded_len(s.len()) - s.len(), 0);
}

/// Reads the big-endian word at `at`; the caller guarantees it is in bounds.
fn read_word(data: &[u8], at: usize) -> Result<usize, PayloadError> {
    let bytes = &data[at..at + WORD];
    let (high, low) = bytes.split_at(WORD - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(PayloadError::WordOverflow(at));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(buf)).map_err(|_| PayloadError::WordOverflow(at))
}

fn read_string(data: &[u8], offset: usize) -> Result<String, PayloadError> {
    let len_end = offset
        .checked_add(WORD)
        .filter(|end| *end <= data.len())
        .ok_or(PayloadError::OffsetOutOfBounds {
            offset,
            len: data.len(),
        })?;
    let declared = read_word(data, offset)?;
    let end = len_end
        .checked_add(declared)
        .filter(|end| *end <= data.len())
        .ok_or(PayloadError::LengthOutOfBounds { offset, declared })?;

    String::from_utf8(data[len_end..end].to_vec()).map_err(|_| PayloadError::InvalidUtf8(offset))
}
