//! # Adapters Layer (Hexagonal Architecture)
//!
//! Reference implementations of the outbound ports.

mod fixed_fee;
mod proof_length_verifier;

pub use fixed_fee::FixedFeeCollector;
pub use proof_length_verifier::ProofLengthVerifier;
