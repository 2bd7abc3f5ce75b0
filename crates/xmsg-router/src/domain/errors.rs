//! # Domain Errors
//!
//! Error types for the router and its fee backend.

use crate::ports::ReceiverError;
use primitive_types::U256;
use thiserror::Error;
use xmsg_chain::ChainError;
use xmsg_types::{ChainAddress, ChainSelector, MessageHash};

/// Errors raised by a fee backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// Payment below the quoted fee.
    #[error("insufficient fee: required {required}, paid {paid}")]
    InsufficientFee {
        /// Quoted fee.
        required: U256,
        /// Supplied payment.
        paid: U256,
    },

    /// Moving the payment failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Router error types.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Payment below the quoted fee.
    #[error("insufficient fee: required {required}, paid {paid}")]
    InsufficientFee {
        /// Quoted fee.
        required: U256,
        /// Supplied payment.
        paid: U256,
    },

    /// Payload hash differs from `Message.hashed_data`.
    #[error("payload does not match hashed data of message {0:?}")]
    PayloadMismatch(MessageHash),

    /// Message targets another chain.
    #[error("message for chain {got} delivered to chain {expected}")]
    WrongDestination {
        /// This router's chain.
        expected: ChainSelector,
        /// Message destination.
        got: ChainSelector,
    },

    /// Message was already executed.
    #[error("message already executed: {0:?}")]
    AlreadyExecuted(MessageHash),

    /// `execute_message` on a message that was never delivered.
    #[error("message not delivered: {0:?}")]
    NotDelivered(MessageHash),

    /// Proof metadata names no registered verifier.
    #[error("unknown verifier index: {0}")]
    UnknownVerifier(u64),

    /// Verifier rejected the proof.
    #[error("verification failed for message {0:?}")]
    VerificationFailed(MessageHash),

    /// Verifier rejected a batch proof.
    #[error("verification failed for batch of {count} messages")]
    BatchVerificationFailed {
        /// Messages in the batch.
        count: usize,
    },

    /// Receiving application rejected the message.
    #[error("receiver rejected message: {0}")]
    ReceiverFailed(#[source] ReceiverError),

    /// Call reverted without a reason (receiver is not an application).
    #[error("execution reverted")]
    Reverted,

    /// Caller may not perform an administrative operation.
    #[error("unauthorized caller: {0}")]
    Unauthorized(ChainAddress),

    /// Router was constructed without a verifier.
    #[error("router requires at least one verifier")]
    NoVerifiers,

    /// Invalid router configuration.
    #[error("invalid router config: {0}")]
    InvalidConfig(String),

    /// Ledger failure while moving value.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl RouterError {
    /// The receiving application's error, if it has type `E`.
    #[must_use]
    pub fn receiver_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::ReceiverFailed(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<FeeError> for RouterError {
    fn from(err: FeeError) -> Self {
        match err {
            FeeError::InsufficientFee { required, paid } => {
                Self::InsufficientFee { required, paid }
            }
            FeeError::Chain(e) => Self::Chain(e),
        }
    }
}
