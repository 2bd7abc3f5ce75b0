//! # Domain Module
//!
//! Error taxonomy and delivery invariants.

pub mod errors;
pub mod invariants;

pub use errors::*;
pub use invariants::*;
