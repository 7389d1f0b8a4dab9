//! # SC Transactions Benchmarks
//!
//! Performance of the hot paths every outer transaction goes through:
//!
//! | Path | Runs for | Target |
//! |------|----------|--------|
//! | Sniff test | every outer transaction | < 1μs, no allocation |
//! | Encode | SC producers | linear in block count |
//! | Decode | SC traffic only | linear in block count |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_sc_transactions::codec;
use qc_18_sc_transactions::prelude::*;
use rand::Rng;
use std::time::Duration;

// ============================================================================
// FIXTURES
// ============================================================================

fn random_scid(rng: &mut impl Rng) -> ScId {
    let mut bytes = [0u8; 65];
    rng.fill(&mut bytes[..]);
    ScId(bytes)
}

fn random_payload(rng: &mut impl Rng, requests: usize) -> ScPayload {
    let mut tx = [0u8; 32];
    let mut hash = [0u8; 32];
    rng.fill(&mut tx);
    rng.fill(&mut hash);

    let request_id = RequestId::new(&TransactionId(tx), rng.gen());
    let state = StateBlock::new(random_scid(rng), rng.gen(), request_id)
        .with_timestamp(rng.gen_range(0..i64::MAX))
        .with_state_update_hash(HashValue(hash));
    let blocks = (0..requests).map(|_| RequestBlock::new(random_scid(rng))).collect();
    ScPayload::new(Some(state), blocks)
}

// ============================================================================
// SNIFF TEST
// Runs on every outer transaction, SC or not
// ============================================================================

fn bench_sniff_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-sniff");
    group.measurement_time(Duration::from_secs(5));
    let mut rng = rand::thread_rng();

    let sc_bytes = codec::encode(&random_payload(&mut rng, 4)).unwrap_or_default();
    let plain: Vec<u8> = (0..sc_bytes.len()).map(|_| rng.gen()).collect();

    group.bench_function("sc_payload", |b| {
        b.iter(|| black_box(looks_like_sc_payload(black_box(&sc_bytes))))
    });
    group.bench_function("random_payload", |b| {
        b.iter(|| black_box(looks_like_sc_payload(black_box(&plain))))
    });
    group.bench_function("short_payload", |b| {
        b.iter(|| black_box(looks_like_sc_payload(black_box(&plain[..32]))))
    });

    group.finish();
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-codec");
    let mut rng = rand::thread_rng();
    let codec = PayloadCodec::default();

    for requests in [0usize, 1, 16, 127] {
        let payload = random_payload(&mut rng, requests);
        let bytes = codec.encode(&payload).unwrap_or_default();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", requests), &payload, |b, p| {
            b.iter(|| black_box(codec.encode(p)))
        });
        group.bench_with_input(BenchmarkId::new("decode", requests), &bytes, |b, data| {
            b.iter(|| black_box(codec.decode(data)))
        });
    }

    group.finish();
}

// ============================================================================
// SERVICE PIPELINE
// ============================================================================

fn bench_service_inspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-service");
    let mut rng = rand::thread_rng();
    let Ok(service) = ScPayloadService::new(ServiceConfig::default()) else {
        return;
    };

    let mut sc_tx = InMemoryLedgerTransaction::new(TransactionId([1; 32]));
    let _ = service.attach(&mut sc_tx, &random_payload(&mut rng, 8));
    let plain_tx = InMemoryLedgerTransaction::with_payload(
        TransactionId([2; 32]),
        (0..512).map(|_| rng.gen()).collect(),
    );

    group.bench_function("inspect_sc", |b| {
        b.iter(|| black_box(service.inspect(&sc_tx)))
    });
    group.bench_function("inspect_plain", |b| {
        b.iter(|| black_box(service.inspect(&plain_tx)))
    });

    group.finish();
}

criterion_group!(benches, bench_sniff_test, bench_encode_decode, bench_service_inspect);

criterion_main!(benches);
