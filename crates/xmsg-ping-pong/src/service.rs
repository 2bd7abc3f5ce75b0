//! # PingPong Service

use crate::errors::PingPongError;
use crate::events::PingPongEvent;
use crate::payload::{decode_payload, encode_payload, MessageKind};
use crate::peers::PeerRegistry;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{info, warn};
use xmsg_chain::{CallContext, Chain};
use xmsg_router::{MessageReceiver, ReceiverError, RouterApi};
use xmsg_types::{ChainAddress, ChainSelector, Message, MessageHash};

/// PingPong application deployed next to a router.
pub struct PingPong {
    address: ChainAddress,
    owner: ChainAddress,
    router: Arc<dyn RouterApi>,
    peers: PeerRegistry,
}

impl PingPong {
    /// Deploys the application at `address` and registers it with `router`.
    pub fn deploy(router: Arc<dyn RouterApi>, address: ChainAddress, owner: ChainAddress) -> Arc<Self> {
        let app = Arc::new(Self {
            address,
            owner,
            router,
            peers: PeerRegistry::new(),
        });
        let receiver: Weak<dyn MessageReceiver> = Arc::downgrade(&app) as Weak<dyn MessageReceiver>;
        app.router.register_receiver(address, receiver);
        info!(
            chain = app.router.chain_selector(),
            %address,
            router = %app.router.address(),
            "PingPong deployed"
        );
        app
    }

    /// Application address.
    #[must_use]
    pub fn address(&self) -> ChainAddress {
        self.address
    }

    /// Application owner.
    #[must_use]
    pub fn owner(&self) -> ChainAddress {
        self.owner
    }

    /// Router the application sends through.
    #[must_use]
    pub fn router(&self) -> &Arc<dyn RouterApi> {
        &self.router
    }

    /// Selector of the chain the application runs on.
    #[must_use]
    pub fn chain_selector(&self) -> ChainSelector {
        self.router.chain_selector()
    }

    fn chain(&self) -> &Arc<Chain> {
        self.router.chain()
    }

    /// Registered peer for `chain_selector`.
    #[must_use]
    pub fn peer(&self, chain_selector: ChainSelector) -> Option<ChainAddress> {
        self.peers.get(chain_selector)
    }

    /// Peer table.
    #[must_use]
    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    /// Sets the peer for each selector, pairwise. Owner only.
    pub fn set_peers(
        &self,
        caller: ChainAddress,
        selectors: &[ChainSelector],
        peers: &[ChainAddress],
    ) -> Result<(), PingPongError> {
        self.chain().atomic(|| {
            if caller != self.owner {
                return Err(PingPongError::Unauthorized(caller));
            }
            if selectors.len() != peers.len() {
                return Err(PingPongError::InvalidLength {
                    selectors: selectors.len(),
                    peers: peers.len(),
                });
            }
            self.peers.insert_all(self.chain(), selectors, peers);
            Ok(())
        })
    }

    /// Sends a "ping" with `text` to the peer on `destination_chain_selector`.
    ///
    /// `ctx.value` is forwarded to the router as the fee.
    pub fn send_ping(
        &self,
        ctx: CallContext,
        destination_chain_selector: ChainSelector,
        text: &str,
    ) -> Result<MessageHash, PingPongError> {
        self.chain().atomic(|| {
            let peer = self
                .peer(destination_chain_selector)
                .ok_or(PingPongError::UnknownPeer(destination_chain_selector))?;

            self.chain().transfer(ctx.caller, self.address, ctx.value)?;
            let message_hash = self.router.send_message(
                CallContext::new(self.address, ctx.value),
                destination_chain_selector,
                peer,
                &encode_payload(MessageKind::Ping.tag(), text),
            )?;

            self.chain().emit(
                self.address,
                PingPongEvent::PingSent {
                    chain_selector: destination_chain_selector,
                    message_hash,
                },
            );
            info!(destination = destination_chain_selector, message_hash = ?message_hash, "Ping sent");
            Ok(message_hash)
        })
    }

    fn handle(&self, ctx: CallContext, message: &Message, data: &[u8]) -> Result<(), PingPongError> {
        if ctx.caller != self.router.address() {
            return Err(PingPongError::RouterUnauthorized(ctx.caller));
        }

        // Peer check precedes decoding.
        let source = message.source_chain_selector;
        if !self.peers.is_peer(source, &message.sender) {
            warn!(source, sender = %message.sender, "message from unregistered sender");
            return Err(PingPongError::InvalidMessageSender {
                chain_selector: source,
                sender: message.sender,
            });
        }

        let (tag, text) = decode_payload(data)?;
        let kind = MessageKind::from_tag(&tag).ok_or(PingPongError::InvalidMessageType(tag))?;

        let inbound = message.hash();
        match kind {
            MessageKind::Ping => {
                self.chain().emit(
                    self.address,
                    PingPongEvent::PingReceived {
                        chain_selector: source,
                        message_hash: inbound,
                    },
                );

                let fee = self.router.fee(&self.address);
                let message_hash = self.router.send_message(
                    CallContext::new(self.address, fee),
                    source,
                    message.sender,
                    &encode_payload(MessageKind::Pong.tag(), &text),
                )?;

                self.chain().emit(
                    self.address,
                    PingPongEvent::PongSent {
                        chain_selector: source,
                        message_hash,
                    },
                );
                info!(source, ping = ?inbound, pong = ?message_hash, "Ping answered");
            }
            MessageKind::Pong => {
                self.chain().emit(
                    self.address,
                    PingPongEvent::PongReceived {
                        chain_selector: source,
                        message_hash: inbound,
                    },
                );
                info!(source, message_hash = ?inbound, "Pong received");
            }
        }
        Ok(())
    }
}

impl MessageReceiver for PingPong {
    fn receive_message(
        &self,
        ctx: CallContext,
        message: &Message,
        data: &[u8],
    ) -> Result<(), ReceiverError> {
        self.chain()
            .atomic(|| self.handle(ctx, message, data))
            .map_err(Into::into)
    }
}

impl fmt::Debug for PingPong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingPong")
            .field("address", &self.address)
            .field("owner", &self.owner)
            .field("chain", &self.chain_selector())
            .field("peers", &self.peers)
            .finish()
    }
}
