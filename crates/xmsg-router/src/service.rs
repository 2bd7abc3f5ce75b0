//! # Router Service
//!
//! The router state machine.
//!
//! ## Outbound (`send_message`)
//!
//! 1. Quote the fee for the caller and reject underpayment
//! 2. Forward the full payment to the fee backend
//! 3. Build the message at the current block, hash it, emit `MessageSent`
//!
//! ## Inbound (`deliver_and_execute_message`)
//!
//! 1. Fee, as above
//! 2. Payload binding and destination check
//! 3. Replay check against the executed set
//! 4. Proof verification
//! 5. Mark executed
//! 6. Dispatch to the receiver (which may call back into `send_message`)
//!
//! Each entry point runs inside [`Chain::atomic`], so a failure at any step,
//! including inside the receiver, leaves no trace.

use crate::config::RouterConfig;
use crate::domain::{
    invariant_destination_matches, invariant_payload_bound, invariant_sufficient_fee, RouterError,
};
use crate::events::RouterEvent;
use crate::ports::inbound::RouterApi;
use crate::ports::outbound::{FeeCollector, MessageReceiver, Verifier};
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tracing::{debug, info, instrument, warn};
use xmsg_chain::{CallContext, Chain};
use xmsg_types::{ChainAddress, ChainSelector, Message, MessageHash};

type HashRecord = Arc<RwLock<HashSet<MessageHash>>>;

/// Cross-chain message router deployed on one chain.
pub struct Router {
    config: RouterConfig,
    chain: Arc<Chain>,
    /// Indexed by proof metadata.
    verifiers: Arc<RwLock<Vec<Arc<dyn Verifier>>>>,
    fees: Arc<dyn FeeCollector>,
    /// Messages whose proof has been accepted.
    delivered: HashRecord,
    /// Messages dispatched to their receiver. Grows monotonically.
    executed: HashRecord,
    receivers: RwLock<HashMap<ChainAddress, Weak<dyn MessageReceiver>>>,
}

impl Router {
    /// Deploys a router on `chain`.
    pub fn deploy(
        chain: Arc<Chain>,
        config: RouterConfig,
        verifiers: Vec<Arc<dyn Verifier>>,
        fees: Arc<dyn FeeCollector>,
    ) -> Result<Arc<Self>, RouterError> {
        if verifiers.is_empty() {
            return Err(RouterError::NoVerifiers);
        }
        if config.address.is_zero() {
            return Err(RouterError::InvalidConfig(
                "router address must not be zero".to_string(),
            ));
        }

        info!(
            chain = chain.selector(),
            address = %config.address,
            verifiers = verifiers.len(),
            "Router deployed"
        );

        Ok(Arc::new(Self {
            config,
            chain,
            verifiers: Arc::new(RwLock::new(verifiers)),
            fees,
            delivered: Arc::default(),
            executed: Arc::default(),
            receivers: RwLock::new(HashMap::new()),
        }))
    }

    /// Router configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Number of registered verifiers.
    #[must_use]
    pub fn verifier_count(&self) -> usize {
        self.verifiers.read().len()
    }

    /// Registers another verifier; returns the proof metadata that selects it.
    ///
    /// Only the configured owner may call this.
    pub fn add_verifier(
        &self,
        ctx: CallContext,
        verifier: Arc<dyn Verifier>,
    ) -> Result<u64, RouterError> {
        self.chain.atomic(|| {
            if ctx.caller != self.config.owner {
                return Err(RouterError::Unauthorized(ctx.caller));
            }
            let index = {
                let mut verifiers = self.verifiers.write();
                verifiers.push(verifier);
                verifiers.len() - 1
            };
            let verifiers = self.verifiers.clone();
            self.chain.record_undo(move || {
                verifiers.write().pop();
            });
            let index = index as u64;
            self.chain
                .emit(self.config.address, RouterEvent::VerifierAdded { index });
            info!(index, "Verifier added");
            Ok(index)
        })
    }

    // -------------------------------------------------------------------------
    // Internal steps
    // -------------------------------------------------------------------------

    /// Quotes, checks and forwards the fee attached to `ctx`.
    fn collect_fee(&self, ctx: &CallContext) -> Result<(), RouterError> {
        let required = self.fees.fee(&ctx.caller);
        invariant_sufficient_fee(required, ctx.value)?;
        self.chain
            .transfer(ctx.caller, self.config.address, ctx.value)?;
        self.fees
            .pay_fee(CallContext::new(self.config.address, ctx.value), &ctx.caller)?;
        Ok(())
    }

    fn verifier(&self, proof_meta: u64) -> Result<Arc<dyn Verifier>, RouterError> {
        usize::try_from(proof_meta)
            .ok()
            .and_then(|i| self.verifiers.read().get(i).cloned())
            .ok_or(RouterError::UnknownVerifier(proof_meta))
    }

    /// Runs a verifier call; a panicking verifier counts as a rejection.
    fn run_verifier(&self, check: impl FnOnce() -> bool) -> bool {
        match catch_unwind(AssertUnwindSafe(check)) {
            Ok(accepted) => accepted,
            Err(_) => {
                warn!(chain = self.chain.selector(), "verifier panicked, rejecting proof");
                false
            }
        }
    }

    fn mark(&self, record: &HashRecord, hash: MessageHash) {
        if record.write().insert(hash) {
            let record = record.clone();
            self.chain.record_undo(move || {
                record.write().remove(&hash);
            });
        }
    }

    /// Common inbound checks for a single message.
    fn check_inbound(&self, message: &Message, data: &[u8]) -> Result<MessageHash, RouterError> {
        invariant_payload_bound(message, data)?;
        invariant_destination_matches(message, self.chain.selector())?;
        let hash = message.hash();
        if self.is_executed(&hash) {
            warn!(message_hash = ?hash, "Rejected replayed message");
            return Err(RouterError::AlreadyExecuted(hash));
        }
        Ok(hash)
    }

    /// Marks `message` executed and hands it to its receiver.
    fn execute(&self, message: &Message, hash: MessageHash, data: &[u8]) -> Result<(), RouterError> {
        // Marked before dispatch so a re-entrant delivery of the same message fails.
        self.mark(&self.delivered, hash);
        self.mark(&self.executed, hash);

        let receiver = self
            .receivers
            .read()
            .get(&message.receiver)
            .and_then(Weak::upgrade);
        let Some(receiver) = receiver else {
            debug!(receiver = %message.receiver, "no application at receiver address");
            return Err(RouterError::Reverted);
        };

        receiver
            .receive_message(
                CallContext::from_caller(self.config.address),
                message,
                data,
            )
            .map_err(RouterError::ReceiverFailed)?;

        self.chain.emit(
            self.config.address,
            RouterEvent::MessageExecuted { message_hash: hash },
        );
        info!(
            message_hash = ?hash,
            source = message.source_chain_selector,
            receiver = %message.receiver,
            "Message executed"
        );
        Ok(())
    }
}

impl RouterApi for Router {
    fn address(&self) -> ChainAddress {
        self.config.address
    }

    fn chain_selector(&self) -> ChainSelector {
        self.chain.selector()
    }

    fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    fn fee(&self, sender: &ChainAddress) -> U256 {
        self.fees.fee(sender)
    }

    #[instrument(skip_all, fields(chain = self.chain.selector(), destination = destination_chain_selector))]
    fn send_message(
        &self,
        ctx: CallContext,
        destination_chain_selector: ChainSelector,
        receiver: ChainAddress,
        data: &[u8],
    ) -> Result<MessageHash, RouterError> {
        self.chain.atomic(|| {
            self.collect_fee(&ctx)?;

            let message = Message::new(
                self.chain.current_block(),
                self.chain.selector(),
                ctx.caller,
                destination_chain_selector,
                receiver,
                data,
            );
            let message_hash = message.hash();

            info!(
                message_hash = ?message_hash,
                sender = %ctx.caller,
                block = message.block_number,
                "Message sent"
            );
            self.chain.emit(
                self.config.address,
                RouterEvent::MessageSent {
                    destination_chain_selector,
                    message_hash,
                    message,
                    data: data.to_vec(),
                },
            );
            Ok(message_hash)
        })
    }

    #[instrument(skip_all, fields(chain = self.chain.selector(), proof_meta = proof_meta))]
    fn deliver_and_execute_message(
        &self,
        ctx: CallContext,
        message: &Message,
        data: &[u8],
        proof_meta: u64,
        proof: &[u8],
    ) -> Result<(), RouterError> {
        self.chain.atomic(|| {
            self.collect_fee(&ctx)?;
            let hash = self.check_inbound(message, data)?;

            let verifier = self.verifier(proof_meta)?;
            if !self.run_verifier(|| verifier.verify_message(message, data, proof_meta, proof)) {
                warn!(message_hash = ?hash, "Proof rejected");
                return Err(RouterError::VerificationFailed(hash));
            }

            self.execute(message, hash, data)
        })
    }

    #[instrument(skip_all, fields(chain = self.chain.selector(), proof_meta = proof_meta, count = messages.len()))]
    fn deliver_messages(
        &self,
        ctx: CallContext,
        messages: &[Message],
        proof_meta: u64,
        proof: &[u8],
    ) -> Result<(), RouterError> {
        self.chain.atomic(|| {
            self.collect_fee(&ctx)?;
            for message in messages {
                invariant_destination_matches(message, self.chain.selector())?;
            }

            let verifier = self.verifier(proof_meta)?;
            if !self.run_verifier(|| verifier.verify_messages(messages, proof_meta, proof)) {
                warn!(count = messages.len(), "Batch proof rejected");
                return Err(RouterError::BatchVerificationFailed {
                    count: messages.len(),
                });
            }

            for message in messages {
                let message_hash = message.hash();
                if self.is_delivered(&message_hash) {
                    debug!(message_hash = ?message_hash, "already delivered, skipping");
                    continue;
                }
                self.mark(&self.delivered, message_hash);
                self.chain.emit(
                    self.config.address,
                    RouterEvent::MessageDelivered { message_hash },
                );
            }
            Ok(())
        })
    }

    #[instrument(skip_all, fields(chain = self.chain.selector()))]
    fn execute_message(
        &self,
        _ctx: CallContext,
        message: &Message,
        data: &[u8],
    ) -> Result<(), RouterError> {
        self.chain.atomic(|| {
            let hash = self.check_inbound(message, data)?;
            if !self.is_delivered(&hash) {
                return Err(RouterError::NotDelivered(hash));
            }
            self.execute(message, hash, data)
        })
    }

    fn register_receiver(&self, address: ChainAddress, receiver: Weak<dyn MessageReceiver>) {
        let mut receivers = self.receivers.write();
        receivers.retain(|_, r| r.strong_count() > 0);
        receivers.insert(address, receiver);
        debug!(%address, registered = receivers.len(), "receiver registered");
    }

    fn is_delivered(&self, hash: &MessageHash) -> bool {
        self.chain.view(|| self.delivered.read().contains(hash))
    }

    fn is_executed(&self, hash: &MessageHash) -> bool {
        self.chain.view(|| self.executed.read().contains(hash))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("address", &self.config.address)
            .field("chain", &self.chain.selector())
            .field("verifiers", &self.verifier_count())
            .field("executed", &self.executed.read().len())
            .finish()
    }
}
