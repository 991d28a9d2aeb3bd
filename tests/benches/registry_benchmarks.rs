//! # Token Registry Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | tcr-01 Typed Data | ownership-transfer and permit digests |
//! | tcr-02 Signatures | public-key recovery |
//! | tcr-05 Registry | full signed admission, batch voting |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{Address, U256};
use std::time::Duration;
use tcr_01_typed_data::PermitMessage;
use tcr_02_signature_verification::recover_signer;
use tcr_05_token_registry::prelude::*;
use tcr_tests::fixtures::{key, World};

fn bench_digests(c: &mut Criterion) {
    let world = World::new();
    let digests = world.signer.digests();
    let identity = key(1).address();
    let sponsor = world.sponsor_address();
    let permit = PermitMessage {
        holder: world.payer.address(),
        spender: world.registry.config().registry_address,
        nonce: U256::zero(),
        expiry: U256::zero(),
        allowed: true,
    };

    let mut group = c.benchmark_group("tcr-01-typed-data");
    group.bench_function("ownership_transfer_digest", |b| {
        b.iter(|| black_box(digests.ownership_transfer(&identity, &sponsor, U256::one())))
    });
    group.bench_function("permit_digest", |b| {
        b.iter(|| black_box(digests.permit(&permit)))
    });
    group.finish();
}

fn bench_recovery(c: &mut Criterion) {
    let signer = key(1);
    let digest = shared_types::keccak256(b"benchmark digest");
    let signature = signer.sign_digest(&digest).unwrap();

    let mut group = c.benchmark_group("tcr-02-signature-verification");
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(recover_signer(&digest, &signature)))
    });
    group.finish();
}

fn bench_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("tcr-05-token-registry");
    group.sample_size(20);
    group.bench_function("signed_admission", |b| {
        b.iter_batched(
            || {
                let world = World::new();
                let request = world.admission(&key(1));
                (world, request)
            },
            |(mut world, request)| {
                black_box(world.registry.admit_with_authorizations(request).unwrap())
            },
            criterion::BatchSize::SmallInput,
        )
    });

    for size in [4u8, 16] {
        let seeds: Vec<u8> = (1..=size + 2).collect();
        let choices = vec![VoteChoice::Yes; usize::from(size)];

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("vote_batch", size), &seeds, |b, seeds| {
            b.iter_batched(
                || {
                    let mut world = World::new();
                    let members = world.admit_all(seeds);
                    let sponsor = world.sponsor_address();
                    let id = world
                        .registry
                        .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
                        .unwrap();
                    let voters: Vec<Address> = members[2..].to_vec();
                    (world, sponsor, id, voters)
                },
                |(mut world, sponsor, id, voters)| {
                    world
                        .registry
                        .submit_votes_batch(&sponsor, id, &choices, &voters)
                        .unwrap();
                    black_box(world)
                },
                criterion::BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_digests, bench_recovery, bench_admission);
criterion_main!(benches);
