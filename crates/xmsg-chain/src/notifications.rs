//! # Notification Log
//!
//! Append-only record of everything contracts emit. This is the only channel
//! off-chain observers (relays, test harnesses) read.

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use xmsg_types::ChainAddress;

/// One emitted event.
#[derive(Clone)]
pub struct Notification {
    /// Contract that emitted the event.
    pub emitter: ChainAddress,
    /// Block the emitting call executed in.
    pub block_number: u64,
    /// `Debug` rendering of the event, for logs and diagnostics.
    pub summary: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Notification {
    /// Returns the event if it has type `E`.
    #[must_use]
    pub fn downcast_ref<E: 'static>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// Returns true if the event has type `E`.
    #[must_use]
    pub fn is<E: 'static>(&self) -> bool {
        self.payload.is::<E>()
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("emitter", &self.emitter)
            .field("block_number", &self.block_number)
            .field("event", &self.summary)
            .finish()
    }
}

/// Shared, append-only list of notifications.
#[derive(Clone, Default)]
pub struct NotificationLog {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, returning its index.
    pub(crate) fn push<E>(&self, emitter: ChainAddress, block_number: u64, event: E) -> usize
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        let mut entries = self.entries.write();
        entries.push(Notification {
            emitter,
            block_number,
            summary: format!("{event:?}"),
            payload: Arc::new(event),
        });
        entries.len() - 1
    }

    /// Drops every entry from `len` on.
    pub(crate) fn truncate(&self, len: usize) {
        self.entries.write().truncate(len);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all entries.
    #[must_use]
    pub fn all(&self) -> Vec<Notification> {
        self.entries.read().clone()
    }

    /// Events of type `E` emitted by `emitter`, starting at log index `from`.
    #[must_use]
    pub fn events_from<E>(&self, emitter: &ChainAddress, from: usize) -> Vec<E>
    where
        E: Clone + 'static,
    {
        self.entries
            .read()
            .iter()
            .skip(from)
            .filter(|n| n.emitter == *emitter)
            .filter_map(|n| n.downcast_ref::<E>().cloned())
            .collect()
    }
}

impl fmt::Debug for NotificationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.read().iter()).finish()
    }
}
