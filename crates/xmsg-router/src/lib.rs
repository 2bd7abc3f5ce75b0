//! # Cross-Chain Message Router
//!
//! Per-chain router that accepts outbound messages, charges the protocol fee,
//! and on the destination chain verifies and delivers each message to its
//! receiving application exactly once.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Delivery Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | Fee paid | `domain/invariants.rs` - `invariant_sufficient_fee()`, quoted per call |
//! | Payload binding | `domain/invariants.rs` - `invariant_payload_bound()` |
//! | Exactly-once | executed set checked before verification, marked before dispatch |
//! | No partial state | every entry point runs inside `Chain::atomic` |
//!
//! ## Module Structure
//!
//! ```text
//! xmsg-router/
//! ├── domain/          # errors, invariants
//! ├── ports/           # RouterApi (inbound), Verifier / FeeCollector / MessageReceiver (outbound)
//! ├── adapters/        # ProofLengthVerifier, FixedFeeCollector
//! ├── config.rs        # RouterConfig
//! ├── events.rs        # RouterEvent notifications
//! └── service.rs       # Router
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{FixedFeeCollector, ProofLengthVerifier};
pub use config::{FixedFeeConfig, RouterConfig};
pub use domain::{
    invariant_destination_matches, invariant_payload_bound, invariant_sufficient_fee, FeeError,
    RouterError,
};
pub use events::RouterEvent;
pub use ports::{FeeCollector, MessageReceiver, ReceiverError, RouterApi, Verifier};
pub use service::Router;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
