//! # PingPong Flows
//!
//! Send, receive and round-trip scenarios across chains 0, 1 and 2, with
//! every expected hash computed independently from the message fields.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use primitive_types::U256;
    use xmsg_chain::CallContext;
    use xmsg_ping_pong::{encode_payload, PingPongError, PingPongEvent};
    use xmsg_router::{RouterApi, RouterError};
    use xmsg_types::Message;

    // =============================================================================
    // OUTBOUND
    // =============================================================================

    #[test]
    fn test_send_ping() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("ping", "Ping!");
        let expected = Message::new(
            c0.chain.current_block(),
            CHAIN_0,
            c0.app.address(),
            CHAIN_1,
            evm(PEER1),
            &data,
        );

        let fee = c0.owner_fee();
        let vault_before = c0.fees.collected();
        let hash = c0
            .app
            .send_ping(CallContext::new(evm(OWNER), fee), CHAIN_1, "Ping!")
            .unwrap();

        assert_eq!(hash, expected.hash());
        assert_eq!(
            c0.chain.events::<PingPongEvent>(&c0.app.address()),
            vec![PingPongEvent::PingSent {
                chain_selector: CHAIN_1,
                message_hash: expected.hash()
            }]
        );
        assert_eq!(c0.fees.collected() - vault_before, fee);
        assert_eq!(c0.last_sent(), (expected, data));
    }

    #[test]
    fn test_send_ping_insufficient_fee() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let underpaid = c0.owner_fee() - U256::one();

        let err = c0
            .app
            .send_ping(CallContext::new(evm(OWNER), underpaid), CHAIN_1, "Ping!")
            .unwrap_err();
        assert!(matches!(
            err,
            PingPongError::Router(RouterError::InsufficientFee { required, paid })
                if paid == underpaid && required == underpaid + U256::one()
        ));
        assert!(c0.sent().is_empty());
        assert_eq!(c0.chain.balance_of(&evm(OWNER)), U256::from(FUNDING));
    }

    // =============================================================================
    // INBOUND
    // =============================================================================

    #[test]
    fn test_receive_pong_from_peer1() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("pong", "Pong!");
        let message = Message::new(
            c0.chain.current_block(),
            CHAIN_1,
            evm(PEER1),
            CHAIN_0,
            c0.app.address(),
            &data,
        );

        c0.deliver(&message, &data).unwrap();
        assert_eq!(
            c0.chain.events::<PingPongEvent>(&c0.app.address()),
            vec![PingPongEvent::PongReceived {
                chain_selector: CHAIN_1,
                message_hash: message.hash()
            }]
        );
        // A pong is terminal.
        assert!(c0.sent().is_empty());
    }

    #[test]
    fn test_receive_ping_sends_pong() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let text = "Ping from a peer at chain 1";
        let ping_data = encode_payload("ping", text);
        let block = c0.chain.current_block();
        let ping = Message::new(block, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), &ping_data);

        let pong_data = encode_payload("pong", text);
        let pong = Message::new(block, CHAIN_0, c0.app.address(), CHAIN_1, evm(PEER1), &pong_data);

        c0.deliver(&ping, &ping_data).unwrap();

        assert_eq!(
            c0.chain.events::<PingPongEvent>(&c0.app.address()),
            vec![
                PingPongEvent::PingReceived {
                    chain_selector: CHAIN_1,
                    message_hash: ping.hash()
                },
                PingPongEvent::PongSent {
                    chain_selector: CHAIN_1,
                    message_hash: pong.hash()
                },
            ]
        );
        assert_eq!(c0.last_sent(), (pong, pong_data));
    }

    #[test]
    fn test_self_to_self_on_same_chain() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let me = c0.app.address();
        let ping_data = encode_payload("ping", "Ping from self to self");
        let ping = Message::new(c0.chain.current_block(), CHAIN_0, me, CHAIN_0, me, &ping_data);

        let sent = c0
            .app
            .send_ping(c0.paid_by_owner(), CHAIN_0, "Ping from self to self")
            .unwrap();
        assert_eq!(sent, ping.hash());

        let cursor = c0.chain.log_len();
        c0.deliver(&ping, &ping_data).unwrap();
        let events = c0.chain.events_since::<PingPongEvent>(&me, cursor);
        assert_eq!(
            events[0],
            PingPongEvent::PingReceived {
                chain_selector: CHAIN_0,
                message_hash: ping.hash()
            }
        );

        let pong_data = encode_payload("pong", "Pong from self to self");
        let pong = Message::new(c0.chain.current_block(), CHAIN_0, me, CHAIN_0, me, &pong_data);
        let cursor = c0.chain.log_len();
        c0.deliver(&pong, &pong_data).unwrap();
        assert_eq!(
            c0.chain.events_since::<PingPongEvent>(&me, cursor),
            vec![PingPongEvent::PongReceived {
                chain_selector: CHAIN_0,
                message_hash: pong.hash()
            }]
        );
    }

    #[test]
    fn test_chain0_to_chain2() {
        let net = Network::deploy();
        let (c0, c2) = (&net.chain0, &net.chain2);
        let text = "Ping from chain 0 to peer at chain 2";
        let ping_data = encode_payload("ping", text);
        let ping = Message::new(
            c0.chain.current_block(),
            CHAIN_0,
            c0.app.address(),
            CHAIN_2,
            c2.app.address(),
            &ping_data,
        );

        let sent = c0.app.send_ping(c0.paid_by_owner(), CHAIN_2, text).unwrap();
        assert_eq!(sent, ping.hash());

        c2.deliver(&ping, &ping_data).unwrap();
        assert_eq!(
            c2.chain.events::<PingPongEvent>(&c2.app.address())[0],
            PingPongEvent::PingReceived {
                chain_selector: CHAIN_0,
                message_hash: ping.hash()
            }
        );

        let pong_data = encode_payload("pong", "Pong from chain 2 to chain 0");
        let pong = Message::new(
            c0.chain.current_block(),
            CHAIN_2,
            c2.app.address(),
            CHAIN_0,
            c0.app.address(),
            &pong_data,
        );
        let cursor = c0.chain.log_len();
        c0.deliver(&pong, &pong_data).unwrap();
        assert_eq!(
            c0.chain.events_since::<PingPongEvent>(&c0.app.address(), cursor),
            vec![PingPongEvent::PongReceived {
                chain_selector: CHAIN_2,
                message_hash: pong.hash()
            }]
        );
    }

    #[test]
    fn test_round_trip_relays_emitted_pong() {
        let net = Network::deploy();
        let (c0, c2) = (&net.chain0, &net.chain2);

        c0.app
            .send_ping(c0.paid_by_owner(), CHAIN_2, "there and back")
            .unwrap();
        let (ping, ping_data) = c0.last_sent();
        c2.deliver(&ping, &ping_data).unwrap();

        // Relay what chain 2 emitted, byte for byte.
        let (pong, pong_data) = c2.last_sent();
        assert_eq!(pong.destination_chain_selector, CHAIN_0);
        c0.deliver(&pong, &pong_data).unwrap();

        let pong_sent = c2
            .chain
            .events::<PingPongEvent>(&c2.app.address())
            .into_iter()
            .find(|e| matches!(e, PingPongEvent::PongSent { .. }))
            .unwrap();
        let pong_received = c0
            .chain
            .events::<PingPongEvent>(&c0.app.address())
            .into_iter()
            .find(|e| matches!(e, PingPongEvent::PongReceived { .. }))
            .unwrap();
        assert_eq!(pong_sent.message_hash(), pong.hash());
        assert_eq!(pong_received.message_hash(), pong.hash());
        assert_eq!(
            xmsg_ping_pong::decode_payload(&pong_data).unwrap().1,
            "there and back"
        );
    }

    // =============================================================================
    // REJECTIONS
    // =============================================================================

    #[test]
    fn test_invalid_message_type() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("invalid", "Invalid");
        let message = Message::new(1, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), &data);

        let err = c0.deliver(&message, &data).unwrap_err();
        assert!(matches!(
            err.receiver_error::<PingPongError>(),
            Some(PingPongError::InvalidMessageType(_))
        ));
    }

    #[test]
    fn test_wrong_peer() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("invalid", "Invalid");
        let message = Message::new(1, CHAIN_1, evm(PEER2), CHAIN_0, c0.app.address(), &data);

        let err = c0.deliver(&message, &data).unwrap_err();
        assert!(matches!(
            err.receiver_error::<PingPongError>(),
            Some(PingPongError::InvalidMessageSender { chain_selector: CHAIN_1, sender })
                if *sender == evm(PEER2)
        ));
    }

    #[test]
    fn test_invalid_receiver_reverts_without_reason() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("invalid", "Invalid");
        let message = Message::new(1, CHAIN_1, evm(PEER1), CHAIN_0, evm(INVALID_RECEIVER), &data);

        let err = c0.deliver(&message, &data).unwrap_err();
        assert!(matches!(err, RouterError::Reverted));
        assert!(err.receiver_error::<PingPongError>().is_none());
    }

    #[test]
    fn test_replay_rejected_with_fresh_proof() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("pong", "once");
        let message = Message::new(7, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), &data);

        c0.deliver(&message, &data).unwrap();
        for _ in 0..2 {
            let err = c0.deliver(&message, &data).unwrap_err();
            assert!(matches!(err, RouterError::AlreadyExecuted(h) if h == message.hash()));
        }
        assert_eq!(c0.chain.events::<PingPongEvent>(&c0.app.address()).len(), 1);
    }

    #[test]
    fn test_payload_substitution_rejected() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let committed = encode_payload("pong", "genuine");
        let message = Message::new(7, CHAIN_1, evm(PEER1), CHAIN_0, c0.app.address(), &committed);

        let err = c0
            .deliver(&message, &encode_payload("pong", "forged"))
            .unwrap_err();
        assert!(matches!(err, RouterError::PayloadMismatch(_)));
        assert!(!c0.is_executed(&message.hash()));
    }

    #[test]
    fn test_rejected_delivery_leaves_no_trace() {
        let net = Network::deploy();
        let c0 = &net.chain0;
        let data = encode_payload("ping", "nope");
        let message = Message::new(1, CHAIN_1, evm(PEER2), CHAIN_0, c0.app.address(), &data);

        let owner_before = c0.chain.balance_of(&evm(OWNER));
        let vault_before = c0.fees.collected();
        let log_before = c0.chain.log_len();
        let block_before = c0.chain.latest_block();

        c0.deliver(&message, &data).unwrap_err();

        assert_eq!(c0.chain.balance_of(&evm(OWNER)), owner_before);
        assert_eq!(c0.fees.collected(), vault_before);
        assert_eq!(c0.chain.log_len(), log_before);
        assert_eq!(c0.chain.latest_block(), block_before);
        assert!(!c0.is_executed(&message.hash()));
    }
}
