//! # SC Payload Service
//!
//! Entry point used by the ledger layer. Every outer transaction passes
//! through [`ScPayloadService::inspect`]: the sniff test filters out ordinary
//! traffic before any parsing happens, and only payloads that pass it are
//! decoded.
//!
//! ## Pipeline
//!
//! ```text
//! data payload -> sniff test --no--> Ok(None)         (non_sc += 1)
//!                     |
//!                    yes
//!                     v
//!                 decode_with_report --err--> Err(_)  (decode_failures += 1)
//!                     |
//!                 policies (strict checksum, trailing data)
//!                     v
//!                 Ok(Some(payload))                   (decoded += 1)
//! ```

use crate::codec::{looks_like_sc_payload, PayloadCodec};
use crate::domain::{CodecConfig, ScPayload};
use crate::errors::CodecError;
use crate::ports::inbound::ScPayloadApi;
use crate::ports::outbound::{LedgerTransaction, LedgerTransactionMut};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// SC Payload Service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Codec configuration.
    pub codec: CodecConfig,
    /// Decode every payload without the sniff test (replay, diagnostics).
    pub skip_sniff: bool,
}

/// Statistics for the SC Payload Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Outer transactions passed to `inspect`.
    pub inspected: u64,
    /// Payloads that failed the sniff test.
    pub non_sc: u64,
    /// Payloads decoded successfully.
    pub decoded: u64,
    /// Payloads that looked like SC data but did not decode.
    pub decode_failures: u64,
    /// Decoded payloads with bytes after the last block, tolerated or not.
    pub trailing_data_seen: u64,
    /// Payloads written by `attach`.
    pub encoded: u64,
}

/// Sniff-then-decode pipeline with statistics.
#[derive(Debug)]
pub struct ScPayloadService {
    config: ServiceConfig,
    codec: PayloadCodec,
    stats: RwLock<ServiceStats>,
}

impl ScPayloadService {
    /// Create a new service. Fails if the codec configuration is invalid.
    pub fn new(config: ServiceConfig) -> Result<Self, CodecError> {
        let codec = PayloadCodec::new(config.codec.clone())?;
        Ok(Self {
            config,
            codec,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    /// Service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Codec used for every payload.
    pub fn codec(&self) -> &PayloadCodec {
        &self.codec
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Counts one inspected payload and its outcome under one write guard.
    fn record(&self, outcome: Outcome, trailing: bool) {
        let mut stats = self.stats.write();
        stats.inspected += 1;
        match outcome {
            Outcome::NonSc => stats.non_sc += 1,
            Outcome::Decoded => stats.decoded += 1,
            Outcome::Failed => stats.decode_failures += 1,
        }
        if trailing {
            stats.trailing_data_seen += 1;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    NonSc,
    Decoded,
    Failed,
}

impl ScPayloadApi for ScPayloadService {
    #[instrument(skip_all, fields(tx = %outer.id()))]
    fn inspect<L: LedgerTransaction + ?Sized>(
        &self,
        outer: &L,
    ) -> Result<Option<ScPayload>, CodecError> {
        let data = outer.data_payload();

        if !self.config.skip_sniff && !looks_like_sc_payload(data) {
            self.record(Outcome::NonSc, false);
            debug!(len = data.len(), "not an SC payload");
            return Ok(None);
        }

        let report = match self.codec.decode_with_report(data) {
            Ok(report) => report,
            Err(err) => {
                self.record(Outcome::Failed, false);
                warn!(error = %err, "SC payload failed to decode");
                return Err(err);
            }
        };

        let trailing = report.trailing_bytes;
        match self.codec.accept(report) {
            Ok(payload) => {
                self.record(Outcome::Decoded, trailing > 0);
                if trailing > 0 {
                    warn!(trailing, "tolerated trailing data after SC payload");
                }
                debug!(
                    has_state = payload.state_block.is_some(),
                    requests = payload.request_blocks.len(),
                    scid = %payload.first_scid().map(|id| id.short()).unwrap_or_default(),
                    "decoded SC payload"
                );
                Ok(Some(payload))
            }
            Err(err) => {
                self.record(Outcome::Failed, trailing > 0);
                warn!(error = %err, "SC payload failed to decode");
                Err(err)
            }
        }
    }

    #[instrument(skip_all, fields(tx = %outer.id()))]
    fn attach<L: LedgerTransactionMut + ?Sized>(
        &self,
        outer: &mut L,
        payload: &ScPayload,
    ) -> Result<usize, CodecError> {
        let bytes = self.codec.encode(payload)?;
        let len = bytes.len();
        outer.set_data_payload(bytes);

        self.stats.write().encoded += 1;
        debug!(
            len,
            requests = payload.request_blocks.len(),
            "attached SC payload"
        );
        Ok(len)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedgerTransaction;
    use crate::domain::{
        RequestBlock, RequestId, ScId, StateBlock, TrailingDataPolicy, TransactionId,
    };
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn sample_payload() -> ScPayload {
        ScPayload::new(
            Some(StateBlock::new(ScId([4; 65]), 1, RequestId::ZERO)),
            vec![RequestBlock::new(ScId([4; 65]))],
        )
    }

    fn service(config: ServiceConfig) -> ScPayloadService {
        init_tracing();
        ScPayloadService::new(config).unwrap()
    }

    #[test]
    fn test_attach_then_inspect() {
        let svc = service(ServiceConfig::default());
        let mut tx = InMemoryLedgerTransaction::new(TransactionId([1; 32]));

        let written = svc.attach(&mut tx, &sample_payload()).unwrap();
        assert_eq!(written, 182);
        assert_eq!(tx.data_payload().len(), 182);

        assert_eq!(svc.inspect(&tx).unwrap(), Some(sample_payload()));

        let stats = svc.stats();
        assert_eq!(stats.encoded, 1);
        assert_eq!(stats.inspected, 1);
        assert_eq!(stats.decoded, 1);
        assert_eq!(stats.non_sc, 0);
    }

    #[test]
    fn test_non_sc_traffic_is_skipped() {
        let svc = service(ServiceConfig::default());
        let tx = InMemoryLedgerTransaction::with_payload(TransactionId::default(), vec![0x42; 128]);

        assert_eq!(svc.inspect(&tx).unwrap(), None);
        assert_eq!(svc.inspect(&InMemoryLedgerTransaction::default()).unwrap(), None);

        let stats = svc.stats();
        assert_eq!(stats.inspected, 2);
        assert_eq!(stats.non_sc, 2);
        assert_eq!(stats.decode_failures, 0);
    }

    #[test]
    fn test_skip_sniff_decodes_everything() {
        let svc = service(ServiceConfig {
            skip_sniff: true,
            ..ServiceConfig::default()
        });
        let tx = InMemoryLedgerTransaction::with_payload(TransactionId::default(), vec![0x01; 10]);

        assert!(matches!(
            svc.inspect(&tx),
            Err(CodecError::TruncatedData { .. })
        ));
        assert_eq!(svc.stats().decode_failures, 1);
        assert_eq!(svc.stats().non_sc, 0);
    }

    #[test]
    fn test_trailing_data_counted_and_policy_applied() {
        let mut bytes = PayloadCodec::default().encode(&sample_payload()).unwrap();
        bytes.extend_from_slice(&[0xEE; 3]);
        let tx = InMemoryLedgerTransaction::with_payload(TransactionId::default(), bytes);

        let strict = service(ServiceConfig::default());
        assert_eq!(
            strict.inspect(&tx),
            Err(CodecError::TrailingData { remaining: 3 })
        );
        assert_eq!(strict.stats().trailing_data_seen, 1);
        assert_eq!(strict.stats().decode_failures, 1);

        let lenient = service(ServiceConfig {
            codec: CodecConfig::default().with_trailing_data(TrailingDataPolicy::Allow),
            skip_sniff: false,
        });
        assert_eq!(lenient.inspect(&tx).unwrap(), Some(sample_payload()));
        assert_eq!(lenient.stats().trailing_data_seen, 1);
        assert_eq!(lenient.stats().decoded, 1);
    }

    #[test]
    fn test_stats_snapshot_is_consistent_under_concurrency() {
        let svc = service(ServiceConfig::default());
        let mut sc_tx = InMemoryLedgerTransaction::new(TransactionId([2; 32]));
        svc.attach(&mut sc_tx, &sample_payload()).unwrap();
        let mut broken = sc_tx.data_payload().to_vec();
        broken.truncate(100);
        let txs = vec![
            sc_tx,
            InMemoryLedgerTransaction::with_payload(TransactionId::default(), vec![0x42; 90]),
            InMemoryLedgerTransaction::with_payload(TransactionId::default(), broken),
        ];

        let consistent = |stats: &ServiceStats| {
            stats.inspected == stats.non_sc + stats.decoded + stats.decode_failures
        };
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..500 {
                        for tx in &txs {
                            let _ = svc.inspect(tx);
                        }
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..2_000 {
                    let stats = svc.stats();
                    assert!(consistent(&stats), "{stats:?}");
                }
            });
        });

        let stats = svc.stats();
        assert!(consistent(&stats));
        assert_eq!(stats.inspected, 6_000);
        assert_eq!(stats.decoded, 2_000);
        assert_eq!(stats.non_sc, 2_000);
        assert_eq!(stats.decode_failures, 2_000);
    }

    #[test]
    fn test_attach_failure_leaves_slot_untouched() {
        let svc = service(ServiceConfig::default());
        let mut tx = InMemoryLedgerTransaction::with_payload(TransactionId::default(), vec![9, 9]);

        assert_eq!(
            svc.attach(&mut tx, &ScPayload::default()),
            Err(CodecError::EmptyPayload)
        );
        assert_eq!(tx.data_payload(), &[9, 9]);
        assert_eq!(svc.stats().encoded, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ServiceConfig {
            codec: CodecConfig {
                max_request_body_len: usize::MAX,
                ..CodecConfig::default()
            },
            skip_sniff: false,
        };
        assert!(matches!(
            ScPayloadService::new(config),
            Err(CodecError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_service_config_from_json() {
        let config: ServiceConfig = serde_json::from_str(
            r#"{"codec":{"trailing_data":"allow"},"skip_sniff":true}"#,
        )
        .unwrap();
        assert!(config.skip_sniff);
        assert_eq!(config.codec.trailing_data, TrailingDataPolicy::Allow);
        assert!(!config.codec.strict_checksum);
    }
}
