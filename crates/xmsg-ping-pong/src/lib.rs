//! # PingPong
//!
//! Reference application for the xmsg router. A "ping" delivered from a
//! registered peer is answered with a "pong" carrying the same text, sent
//! back through the router from inside the same delivery.
//!
//! ## Receive Flow
//!
//! ```text
//! router ──receive_message──→ sender ≠ peer      → InvalidMessageSender
//!                              │
//!                           decode (tag, text)
//!                   tag ∉ {ping, pong} → InvalidMessageType
//!                              │
//!              ping: PingReceived, send pong, PongSent
//!              pong: PongReceived
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! xmsg-ping-pong/
//! ├── errors.rs     # PingPongError
//! ├── payload.rs    # ABI (string, string) codec
//! ├── peers.rs      # PeerRegistry
//! ├── events.rs     # PingPongEvent
//! └── service.rs    # PingPong
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod events;
pub mod payload;
pub mod peers;
pub mod service;

// Re-exports
pub use errors::PingPongError;
pub use events::PingPongEvent;
pub use payload::{decode_payload, encode_payload, MessageKind, PayloadError};
pub use peers::PeerRegistry;
pub use service::PingPong;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
