//! # Undo Journal
//!
//! Records how to undo every state write made during a call. Reverting to a
//! checkpoint replays undo entries newest first, so entries may assume the
//! state they observed when they were recorded.

use parking_lot::Mutex;
use tracing::debug;

type Undo = Box<dyn FnOnce() + Send>;

/// Position in the journal to revert to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Ordered list of pending undo entries.
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<Undo>>,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.lock().len())
    }

    /// Registers an undo entry.
    pub fn record(&self, undo: impl FnOnce() + Send + 'static) {
        self.entries.lock().push(Box::new(undo));
    }

    /// Undoes every entry recorded after `checkpoint`.
    pub fn revert_to(&self, checkpoint: Checkpoint) {
        let mut reverted = 0usize;
        loop {
            // Undo entries lock contract state, so never run them under our lock.
            let undo = {
                let mut entries = self.entries.lock();
                if entries.len() <= checkpoint.0 {
                    break;
                }
                entries.pop()
            };
            if let Some(undo) = undo {
                undo();
                reverted += 1;
            }
        }
        debug!(reverted, checkpoint = checkpoint.0, "journal reverted");
    }

    /// Drops all entries, making every recorded write permanent.
    pub fn commit(&self) {
        self.entries.lock().clear();
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal").field("pending", &self.len()).finish()
    }
}
