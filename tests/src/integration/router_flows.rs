//! # Router Flows
//!
//! Router behaviour independent of the application: serialized concurrent
//! sends, the batch delivery path, verifier administration and config loading.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use primitive_types::U256;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;
    use xmsg_chain::{CallContext, ChainConfig};
    use xmsg_ping_pong::{encode_payload, PingPongEvent};
    use xmsg_router::{
        FeeCollector, FixedFeeConfig, ProofLengthVerifier, RouterApi, RouterConfig, RouterError,
        RouterEvent,
    };
    use xmsg_types::{ChainAddress, Message};

    #[test]
    fn test_concurrent_sends_are_serialized() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let fee = c0.owner_fee();
        let start = c0.chain.latest_block();
        const SENDERS: usize = 8;
        const PER_SENDER: usize = 4;

        let hashes: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..SENDERS)
                .map(|_| {
                    scope.spawn(|| {
                        (0..PER_SENDER)
                            .map(|_| {
                                c0.router
                                    .send_message(
                                        CallContext::new(evm(OWNER), fee),
                                        CHAIN_2,
                                        evm(PEER1),
                                        b"same payload",
                                    )
                                    .unwrap()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let total = SENDERS * PER_SENDER;
        let unique: HashSet<_> = hashes.iter().copied().collect();
        assert_eq!(unique.len(), total);

        // One block per committed send, no gaps, no duplicates.
        let mut blocks: Vec<u64> = c0.sent().iter().map(|(m, _)| m.block_number).collect();
        blocks.sort_unstable();
        let expected: Vec<u64> = (start + 1..=start + total as u64).collect();
        assert_eq!(blocks, expected);
        assert_eq!(c0.fees.collected(), fee * U256::from(total));
    }

    #[test]
    fn test_batch_delivery_then_execute() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let payloads: Vec<Vec<u8>> = ["a", "b", "c"]
            .iter()
            .map(|t| encode_payload("pong", t))
            .collect();
        let messages: Vec<Message> = payloads
            .iter()
            .enumerate()
            .map(|(i, data)| {
                Message::new(10 + i as u64, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), data)
            })
            .collect();

        c0.router
            .deliver_messages(c0.paid_by_owner(), &messages, 0, &random_proof())
            .unwrap();
        let delivered = c0
            .chain
            .events::<RouterEvent>(&c0.router.address())
            .into_iter()
            .filter(|e| matches!(e, RouterEvent::MessageDelivered { .. }))
            .count();
        assert_eq!(delivered, 3);

        // Redelivering the batch is a no-op for known hashes.
        c0.router
            .deliver_messages(c0.paid_by_owner(), &messages, 0, &random_proof())
            .unwrap();
        assert_eq!(
            c0.chain
                .events::<RouterEvent>(&c0.router.address())
                .iter()
                .filter(|e| matches!(e, RouterEvent::MessageDelivered { .. }))
                .count(),
            3
        );

        for (message, data) in messages.iter().zip(&payloads) {
            c0.router
                .execute_message(CallContext::from_caller(evm(OWNER)), message, data)
                .unwrap();
        }
        assert_eq!(c0.chain.events::<PingPongEvent>(&c0.app.address()).len(), 3);

        let err = c0.deliver(&messages[0], &payloads[0]).unwrap_err();
        assert!(matches!(err, RouterError::AlreadyExecuted(_)));
    }

    #[test]
    fn test_batch_rejects_foreign_destination() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("pong", "x");
        let foreign = Message::new(1, CHAIN_1, evm(PEER1), CHAIN_2, c0.app.address(), &data);

        let err = c0
            .router
            .deliver_messages(c0.paid_by_owner(), &[foreign.clone()], 0, &random_proof())
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::WrongDestination {
                expected: CHAIN_0,
                got: CHAIN_2
            }
        ));
        assert!(!c0.router.is_delivered(&foreign.hash()));
    }

    #[test]
    fn test_short_proof_rejected() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        c0.router
            .add_verifier(
                CallContext::from_caller(evm(ROUTER_OWNER)),
                Arc::new(ProofLengthVerifier::new(64)),
            )
            .unwrap();
        let data = encode_payload("pong", "x");
        let message = Message::new(1, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), &data);

        let err = c0
            .router
            .deliver_and_execute_message(c0.paid_by_owner(), &message, &data, 1, &random_proof())
            .unwrap_err();
        assert!(matches!(err, RouterError::VerificationFailed(_)));

        c0.router
            .deliver_and_execute_message(c0.paid_by_owner(), &message, &data, 1, &[0u8; 64])
            .unwrap();
    }

    #[test]
    fn test_add_verifier_requires_router_owner() {
        let net = Network::deploy();
        let err = net
            .chain0
            .router
            .add_verifier(
                CallContext::from_caller(evm(OWNER)),
                Arc::new(ProofLengthVerifier::default()),
            )
            .unwrap_err();
        assert!(matches!(err, RouterError::Unauthorized(_)));
        assert_eq!(net.chain0.router.verifier_count(), 1);
    }

    #[test]
    fn test_fee_override_quoted_per_sender() {
        init_tracing();
        let chain = Arc::new(xmsg_chain::Chain::new(ChainConfig::with_selector(CHAIN_0)));
        let vault = ChainAddress::from_evm_address([0xFE; 20]);
        let fees = xmsg_router::FixedFeeCollector::new(
            chain.clone(),
            FixedFeeConfig::new(vault, U256::from(1_000)).with_override(evm(OWNER), U256::from(5)),
        );
        assert_eq!(fees.fee(&evm(OWNER)), U256::from(5));
        assert_eq!(fees.fee(&evm(PEER1)), U256::from(1_000));
    }

    #[test]
    fn test_configs_load_from_json() {
        let chain = ChainConfig::from_json(r#"{ "selector": 2, "genesis_block": 100 }"#).unwrap();
        assert_eq!(chain.selector, CHAIN_2);
        assert_eq!(xmsg_chain::Chain::new(chain).current_block(), 101);

        let router = RouterConfig::from_json(&format!(
            r#"{{ "address": "0x00000000000000000000000000000000000000aa", "owner": "{ROUTER_OWNER}" }}"#
        ))
        .unwrap();
        assert_eq!(router.owner, evm(ROUTER_OWNER));
        assert_eq!(router.address, ChainAddress::from_evm_address([
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xAA,
        ]));

        let fees = FixedFeeConfig::from_json(r#"{ "fee": "0x3e8" }"#).unwrap();
        assert_eq!(fees.fee, U256::from(1_000));
        assert!(fees.overrides.is_empty());

        let json = serde_json::to_string(&fees).unwrap();
        assert_eq!(FixedFeeConfig::from_json(&json).unwrap(), fees);
    }
}
