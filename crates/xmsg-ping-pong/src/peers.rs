//! # Peer Registry
//!
//! Chain selector → the one counterpart address trusted on that chain.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use xmsg_chain::Chain;
use xmsg_types::{ChainAddress, ChainSelector};

/// Per-application peer table. Writes are journaled on the owning chain.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: Arc<RwLock<HashMap<ChainSelector, ChainAddress>>>,
}

impl PeerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered peer for `chain_selector`.
    #[must_use]
    pub fn get(&self, chain_selector: ChainSelector) -> Option<ChainAddress> {
        self.peers.read().get(&chain_selector).copied()
    }

    /// Whether `sender` is the registered peer for `chain_selector`.
    #[must_use]
    pub fn is_peer(&self, chain_selector: ChainSelector, sender: &ChainAddress) -> bool {
        self.get(chain_selector).as_ref() == Some(sender)
    }

    /// Number of registered chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    /// Whether no peer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.read().is_empty()
    }

    /// Writes `(selector, peer)` pairs in order; later pairs win.
    ///
    /// Callers check that both slices have the same length.
    pub(crate) fn insert_all(
        &self,
        chain: &Chain,
        selectors: &[ChainSelector],
        peers: &[ChainAddress],
    ) {
        for (&selector, &peer) in selectors.iter().zip(peers) {
            let previous = self.peers.write().insert(selector, peer);
            let table = self.peers.clone();
            chain.record_undo(move || {
                let mut table = table.write();
                match previous {
                    Some(old) => table.insert(selector, old),
                    None => table.remove(&selector),
                };
            });
            debug!(selector, %peer, "peer set");
        }
    }
}
