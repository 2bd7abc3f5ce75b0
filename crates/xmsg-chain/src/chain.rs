//! # Chain
//!
//! Host environment for the contracts deployed on one chain.

use crate::config::ChainConfig;
use crate::errors::ChainError;
use crate::journal::{Checkpoint, Journal};
use crate::ledger::Ledger;
use crate::notifications::{Notification, NotificationLog};
use parking_lot::ReentrantMutex;
use primitive_types::U256;
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};
use xmsg_types::{ChainAddress, ChainSelector};

/// One chain: call serialization, journal, ledger and notification log.
pub struct Chain {
    config: ChainConfig,
    latest_block: AtomicU64,
    /// Held for the whole outermost call; the cell is the current call depth.
    execution: ReentrantMutex<Cell<usize>>,
    journal: Journal,
    ledger: Ledger,
    log: NotificationLog,
}

impl Chain {
    /// Creates a chain at its genesis block.
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        Self {
            latest_block: AtomicU64::new(config.genesis_block),
            config,
            execution: ReentrantMutex::new(Cell::new(0)),
            journal: Journal::new(),
            ledger: Ledger::new(),
            log: NotificationLog::new(),
        }
    }

    /// Chain selector.
    #[must_use]
    pub fn selector(&self) -> ChainSelector {
        self.config.selector
    }

    /// Chain configuration.
    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Height of the last committed block.
    #[must_use]
    pub fn latest_block(&self) -> u64 {
        self.latest_block.load(Ordering::SeqCst)
    }

    /// Height of the block the current call executes in.
    #[must_use]
    pub fn current_block(&self) -> u64 {
        self.latest_block() + 1
    }

    /// Current call depth (zero outside any call).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.execution.lock().get()
    }

    /// Runs `call` as one atomic unit.
    ///
    /// On `Err` every journaled write made inside `call`, nested calls
    /// included, is undone before the error is returned. A successful
    /// outermost call commits its writes and mines its block.
    ///
    /// A panic inside `call` is treated like an error: the journal is rewound
    /// and the depth restored while the panic unwinds through this frame.
    pub fn atomic<T, E>(&self, call: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let depth = self.execution.lock();
        let level = depth.get();
        let checkpoint = self.journal.checkpoint();
        depth.set(level + 1);

        let mut frame = CallFrame {
            journal: &self.journal,
            depth: &*depth,
            level,
            checkpoint,
            unwinding: true,
        };
        let result = call();
        frame.unwinding = false;
        drop(frame);

        depth.set(level);
        match (&result, level) {
            (Ok(_), 0) => {
                self.journal.commit();
                let block = self.latest_block.fetch_add(1, Ordering::SeqCst) + 1;
                trace!(chain = self.config.selector, block, "call committed");
            }
            (Ok(_), _) => {}
            (Err(_), _) => {
                self.journal.revert_to(checkpoint);
                debug!(chain = self.config.selector, depth = level, "call reverted");
            }
        }
        result
    }

    /// Runs `read` under the execution lock.
    ///
    /// From another thread this waits for any call in progress, so `read`
    /// only observes committed state. Inside a call it sees that call's writes.
    pub fn view<T>(&self, read: impl FnOnce() -> T) -> T {
        let _serial = self.execution.lock();
        read()
    }

    /// Registers how to undo a write made by the current call.
    ///
    /// Outside a call writes are permanent and nothing is recorded. Contracts
    /// must only write their own state from inside [`Self::atomic`].
    pub fn record_undo(&self, undo: impl FnOnce() + Send + 'static) {
        let depth = self.execution.lock();
        if depth.get() > 0 {
            self.journal.record(undo);
        }
    }

    // -------------------------------------------------------------------------
    // Native value
    // -------------------------------------------------------------------------

    /// Balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: &ChainAddress) -> U256 {
        self.view(|| self.ledger.balance_of(account))
    }

    /// Credits new value to `account` (genesis allocations, faucets).
    pub fn mint(&self, account: ChainAddress, amount: U256) -> Result<(), ChainError> {
        let _serial = self.execution.lock();
        let balance = self
            .ledger
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(ChainError::BalanceOverflow(account))?;
        let previous = self.ledger.set(account, balance);
        let ledger = self.ledger.clone();
        self.record_undo(move || {
            ledger.set(account, previous);
        });
        debug!(%account, %amount, "minted");
        Ok(())
    }

    /// Moves `amount` from `from` to `to`.
    pub fn transfer(
        &self,
        from: ChainAddress,
        to: ChainAddress,
        amount: U256,
    ) -> Result<(), ChainError> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let _serial = self.execution.lock();
        let (debited, credited) = self.ledger.plan_transfer(&from, &to, amount)?;
        let previous_from = self.ledger.set(from, debited);
        let previous_to = self.ledger.set(to, credited);
        let ledger = self.ledger.clone();
        self.record_undo(move || {
            ledger.set(to, previous_to);
            ledger.set(from, previous_from);
        });
        trace!(%from, %to, %amount, "value transferred");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Emits an event from `emitter`.
    pub fn emit<E>(&self, emitter: ChainAddress, event: E)
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        let _serial = self.execution.lock();
        let index = self.log.push(emitter, self.current_block(), event);
        let log = self.log.clone();
        self.record_undo(move || log.truncate(index));
    }

    /// Events of type `E` emitted by `emitter`, oldest first.
    #[must_use]
    pub fn events<E: Clone + 'static>(&self, emitter: &ChainAddress) -> Vec<E> {
        self.view(|| self.log.events_from(emitter, 0))
    }

    /// Events of type `E` emitted by `emitter` from log index `from` on.
    #[must_use]
    pub fn events_since<E: Clone + 'static>(&self, emitter: &ChainAddress, from: usize) -> Vec<E> {
        self.view(|| self.log.events_from(emitter, from))
    }

    /// Every notification, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.view(|| self.log.all())
    }

    /// Number of notifications emitted so far (a cursor for [`Self::events_since`]).
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.view(|| self.log.len())
    }
}

/// Rewinds an in-progress call if it is dropped without completing.
struct CallFrame<'a> {
    journal: &'a Journal,
    depth: &'a Cell<usize>,
    level: usize,
    checkpoint: Checkpoint,
    unwinding: bool,
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        if self.unwinding {
            self.journal.revert_to(self.checkpoint);
            self.depth.set(self.level);
            warn!(depth = self.level, "call panicked, reverted");
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("selector", &self.config.selector)
            .field("latest_block", &self.latest_block())
            .field("notifications", &self.log.len())
            .finish()
    }
}
