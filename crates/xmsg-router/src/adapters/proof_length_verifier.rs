//! Proof Length Verifier
//!
//! Implements `Verifier` by checking only that a proof is long enough. Stands
//! in for a real proof system on development chains and in tests.

use crate::ports::outbound::Verifier;
use tracing::debug;
use xmsg_types::Message;

/// Accepts any proof of at least `min_len` bytes.
#[derive(Clone, Copy, Debug)]
pub struct ProofLengthVerifier {
    min_len: usize,
}

impl ProofLengthVerifier {
    /// Verifier requiring `min_len` proof bytes (at least one).
    #[must_use]
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len: min_len.max(1),
        }
    }

    /// Required proof length.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    fn check(&self, proof: &[u8]) -> bool {
        let ok = proof.len() >= self.min_len;
        debug!(proof_len = proof.len(), min_len = self.min_len, ok, "proof length check");
        ok
    }
}

impl Default for ProofLengthVerifier {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Verifier for ProofLengthVerifier {
    fn verify_message(
        &self,
        _message: &Message,
        _data: &[u8],
        _proof_meta: u64,
        proof: &[u8],
    ) -> bool {
        self.check(proof)
    }

    fn verify_messages(&self, messages: &[Message], _proof_meta: u64, proof: &[u8]) -> bool {
        !messages.is_empty() && self.check(proof)
    }
}
