//! # Integration Test Flows
//!
//! Tests that SC producers, the ledger and SC consumers agree on the
//! payload format when they only share the outer transactions.
//!
//! ## Flows Tested:
//!
//! 1. **Producer → Consumer**: requests posted to a contract are answered by
//!    a state transition that references them by `RequestId`
//! 2. **Mixed ledger scan**: SC transactions are found among plain ones,
//!    concurrently, with consistent statistics
//! 3. **Config mismatch**: a framed producer and an unframed consumer fail
//!    loudly instead of misreading blocks

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use qc_18_sc_transactions::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn contract(seed: u8) -> ScId {
        ScId::new(
            &Address::new(Address::VERSION_ED25519, [seed; 32]),
            &Color([seed; 32]),
        )
    }

    /// Ledger of outer transactions, in order.
    struct Ledger {
        transactions: Vec<InMemoryLedgerTransaction>,
    }

    impl Ledger {
        fn new() -> Self {
            Self {
                transactions: Vec::new(),
            }
        }

        fn next_id(&self) -> TransactionId {
            let mut id = [0u8; 32];
            id[..8].copy_from_slice(&(self.transactions.len() as u64 + 1).to_be_bytes());
            TransactionId(id)
        }

        fn post_plain(&mut self, rng: &mut StdRng) {
            let len = rng.gen_range(0..300);
            let data = (0..len).map(|_| rng.gen()).collect();
            let tx = InMemoryLedgerTransaction::with_payload(self.next_id(), data);
            self.transactions.push(tx);
        }

        fn post_sc(&mut self, service: &ScPayloadService, payload: &ScPayload) -> TransactionId {
            let id = self.next_id();
            let mut tx = InMemoryLedgerTransaction::new(id);
            service.attach(&mut tx, payload).unwrap();
            self.transactions.push(tx);
            id
        }
    }

    // =============================================================================
    // PRODUCER → CONSUMER
    // =============================================================================

    #[test]
    fn test_request_answered_by_state_transition() {
        let service = ScPayloadService::new(ServiceConfig::default()).unwrap();
        let scid = contract(0x0C);
        let mut ledger = Ledger::new();

        // origin state
        let origin = ScPayload::new(Some(StateBlock::new(scid, 0, RequestId::ZERO)), vec![]);
        ledger.post_sc(&service, &origin);

        // a client posts two requests in one transaction
        let request_tx = ledger.post_sc(
            &service,
            &ScPayload::new(None, vec![RequestBlock::new(scid), RequestBlock::new(scid)]),
        );

        // the consumer reads them back and answers the second one
        let requests_view = Transaction::parse(&ledger.transactions[1], service.codec()).unwrap();
        let answered = requests_view.request_id(1).unwrap();
        assert_eq!(answered.transaction_id(), request_tx);

        let next_state = StateBlock::new(scid, 1, answered)
            .with_timestamp(1_700_000_000)
            .with_state_update_hash(HashValue([0x5A; 32]));
        ledger.post_sc(&service, &ScPayload::new(Some(next_state.clone()), vec![]));

        let states: Vec<StateBlock> = ledger
            .transactions
            .iter()
            .filter_map(|tx| service.inspect(tx).unwrap())
            .filter_map(|payload| payload.state_block)
            .collect();
        assert_eq!(states.len(), 2);
        assert!(states[0].is_origin());
        assert!(states[0].is_checkpoint());
        assert_eq!(states[1], next_state);
        assert_eq!(states[1].request_id().index(), 1);
        assert_eq!(states[1].request_id().transaction_id(), request_tx);
    }

    // =============================================================================
    // MIXED LEDGER SCAN
    // =============================================================================

    #[test]
    fn test_concurrent_scan_of_mixed_ledger() {
        let service = Arc::new(ScPayloadService::new(ServiceConfig::default()).unwrap());
        let mut rng = StdRng::seed_from_u64(18);
        let mut ledger = Ledger::new();
        let mut posted = Vec::new();

        for i in 0..200u32 {
            if i % 5 == 0 {
                let requests = (0..rng.gen_range(1..8))
                    .map(|_| RequestBlock::new(contract(rng.gen())))
                    .collect();
                let payload = ScPayload::new(None, requests);
                posted.push((ledger.post_sc(&service, &payload), payload));
            } else {
                ledger.post_plain(&mut rng);
            }
        }

        let ledger = Arc::new(ledger.transactions);
        let found = Arc::new(Mutex::new(Vec::new()));
        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let service = Arc::clone(&service);
                let ledger = Arc::clone(&ledger);
                let found = Arc::clone(&found);
                thread::spawn(move || {
                    for tx in ledger.iter().skip(worker).step_by(4) {
                        if let Some(payload) = service.inspect(tx).unwrap() {
                            found.lock().push((tx.id(), payload));
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let mut found = found.lock().clone();
        found.sort_by_key(|(id, _)| *id);
        assert_eq!(found, posted);

        let stats = service.stats();
        assert_eq!(stats.inspected, 200);
        assert_eq!(stats.decoded, 40);
        assert_eq!(stats.non_sc, 160);
        assert_eq!(stats.encoded, 40);
        assert_eq!(stats.decode_failures, 0);
    }

    // =============================================================================
    // CONFIG MISMATCH
    // =============================================================================

    #[test]
    fn test_framing_mismatch_is_detected() {
        let producer = ScPayloadService::new(ServiceConfig {
            codec: CodecConfig::default()
                .with_request_body_framing(RequestBodyFraming::LengthPrefixed),
            skip_sniff: false,
        })
        .unwrap();
        let consumer = ScPayloadService::new(ServiceConfig::default()).unwrap();

        let mut tx = InMemoryLedgerTransaction::new(TransactionId([7; 32]));
        let payload = ScPayload::new(
            None,
            vec![RequestBlock::with_body(contract(1), b"call".to_vec())],
        );
        producer.attach(&mut tx, &payload).unwrap();

        // same chain-id prefix, so the sniff test still passes
        assert!(looks_like_sc_payload(tx.data_payload()));
        assert_eq!(producer.inspect(&tx).unwrap(), Some(payload));
        assert_eq!(
            consumer.inspect(&tx),
            Err(CodecError::TrailingData { remaining: 6 })
        );
        assert_eq!(consumer.stats().decode_failures, 1);
    }
}
