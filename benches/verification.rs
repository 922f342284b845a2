use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_client::core::hash::{hash_concat, HashAlgorithm};
use merkle_client::transport::{encode_frame, read_frames};
use merkle_client::{verify, HashValue};
use std::io::Cursor;

fn build_proof(depth: usize, algorithm: HashAlgorithm) -> (Vec<HashValue>, HashValue) {
    let siblings: Vec<HashValue> = (0..depth)
        .map(|i| algorithm_hash(algorithm, &format!("sibling-{}", i)))
        .collect();
    let mut acc = HashValue::from("tx-bench");
    for sibling in &siblings {
        acc = hash_concat(&algorithm, acc.as_str(), sibling.as_str());
    }
    (siblings, acc)
}

fn algorithm_hash(algorithm: HashAlgorithm, data: &str) -> HashValue {
    use merkle_client::NodeHasher;
    algorithm.hash(data.as_bytes())
}

fn verification_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    // Typical tree depths, from small datasets to a few million leaves
    let depths = vec![4, 16, 32, 64];

    for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha256] {
        for &depth in &depths {
            let (siblings, root) = build_proof(depth, algorithm);

            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), depth),
                &siblings,
                |b, siblings| {
                    b.iter(|| verify(black_box("tx-bench"), black_box(siblings), &root, &algorithm))
                },
            );
        }
    }

    group.finish();
}

fn framing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_frames");

    for depth in [4, 16, 64] {
        let (siblings, _) = build_proof(depth, HashAlgorithm::Md5);
        let wire: Vec<u8> = siblings
            .iter()
            .flat_map(|s| encode_frame(s.as_str(), 256).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::new("frames", depth), &wire, |b, wire| {
            b.iter(|| read_frames(&mut Cursor::new(black_box(wire)), 256).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, verification_benchmark, framing_benchmark);
criterion_main!(benches);
