//! # Chain Execution Environment
//!
//! Everything a contract on one chain needs from its host: a serialized,
//! all-or-nothing call model, a native-value ledger and an append-only
//! notification log.
//!
//! ## Execution Model
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | Serializable ordering | outermost [`Chain::atomic`] holds a re-entrant execution lock |
//! | Nested calls | same thread re-enters the lock, each level takes a journal checkpoint |
//! | No partial state on failure | [`Journal`] undo entries replayed back to the checkpoint |
//! | Block height | a committed outermost call advances [`Chain::latest_block`] by one |
//!
//! State owned by contracts (delivery records, peer tables, fee vaults) stays
//! with the contract; each write registers its undo with
//! [`Chain::record_undo`].

pub mod chain;
pub mod config;
pub mod context;
pub mod errors;
pub mod journal;
pub mod ledger;
pub mod notifications;

pub use chain::Chain;
pub use config::ChainConfig;
pub use context::CallContext;
pub use errors::ChainError;
pub use journal::{Checkpoint, Journal};
pub use ledger::Ledger;
pub use notifications::{Notification, NotificationLog};

/// Native value amount.
pub use primitive_types::U256;
