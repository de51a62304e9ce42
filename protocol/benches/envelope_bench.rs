// Envelope-layer benchmarks.
//
// Covers nonce and tx-id derivation, payload signing, proposal creation, and
// transaction assembly at various endorsement counts.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quill_protocol::crypto::SoftwareCsp;
use quill_protocol::envelope::{build_payload, sign, NonceSource};
use quill_protocol::identity::{LocalIdentity, SigningIdentity};
use quill_protocol::messages::{HeaderType, SmartContractInvocationSpec};
use quill_protocol::proposal::create_proposal_from_invocation_spec;
use quill_protocol::transaction::{assemble_transaction, endorse};

fn nonces() -> NonceSource {
    NonceSource::new(Arc::new(SoftwareCsp::default()))
}

fn bench_tx_id(c: &mut Criterion) {
    let source = nonces();
    let creator = LocalIdentity::generate("Org1MSP").serialize_identity().unwrap();
    let nonce = source.generate_nonce().unwrap();

    c.bench_function("nonce/generate", |b| {
        b.iter(|| source.generate_nonce().unwrap());
    });
    c.bench_function("nonce/compute_tx_id", |b| {
        b.iter(|| source.compute_tx_id(&creator, &nonce).unwrap());
    });
}

fn bench_sign_payload(c: &mut Criterion) {
    let source = nonces();
    let identity = LocalIdentity::generate("Org1MSP");
    let payload = build_payload(
        HeaderType::EndorserTransaction,
        0,
        "bench",
        Some(&identity),
        None,
        0,
        &source,
    )
    .unwrap();

    c.bench_function("envelope/sign", |b| {
        b.iter(|| sign(&payload, Some(&identity)).unwrap());
    });
}

fn bench_create_proposal(c: &mut Criterion) {
    let source = nonces();
    let creator = LocalIdentity::generate("ClientMSP").serialize_identity().unwrap();
    let spec = SmartContractInvocationSpec::invoke("asset", ["transfer", "a", "b", "10"]);

    c.bench_function("proposal/create", |b| {
        b.iter(|| {
            create_proposal_from_invocation_spec(
                HeaderType::EndorserTransaction,
                "bench",
                &spec,
                &creator,
                &source,
            )
            .unwrap()
        });
    });
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/assemble");
    let source = nonces();
    let client = LocalIdentity::generate("ClientMSP");
    let spec = SmartContractInvocationSpec::invoke("asset", ["transfer", "a", "b", "10"]);
    let proposal = create_proposal_from_invocation_spec(
        HeaderType::EndorserTransaction,
        "bench",
        &spec,
        &client.serialize_identity().unwrap(),
        &source,
    )
    .unwrap();

    for endorsers in [1usize, 4, 16] {
        let responses: Vec<_> = (0..endorsers)
            .map(|i| endorse(&LocalIdentity::generate(format!("Org{}MSP", i)), b"rw-set").unwrap())
            .collect();

        group.throughput(Throughput::Elements(endorsers as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(endorsers),
            &responses,
            |b, responses| {
                b.iter(|| assemble_transaction(&proposal, &client, responses).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tx_id,
    bench_sign_payload,
    bench_create_proposal,
    bench_assemble
);
criterion_main!(benches);
