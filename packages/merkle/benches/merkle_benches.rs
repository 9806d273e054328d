use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle::Sha256Tree;
use rand::RngCore;
use sha2::Sha256;

fn make_items(count: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let mut item = vec![0u8; 32];
            rng.fill_bytes(&mut item);
            item
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in [5usize, 64, 1024] {
        let items = make_items(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| Sha256Tree::build(black_box(items)).unwrap());
        });
    }
    group.finish();
}

fn bench_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove");
    for size in [64usize, 1024] {
        let items = make_items(size);
        let tree = Sha256Tree::build(&items).unwrap();
        let target = items[size / 2].clone();
        group.bench_with_input(BenchmarkId::from_parameter(size), &target, |b, target| {
            b.iter(|| tree.prove(black_box(target)).unwrap());
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    for size in [64usize, 1024] {
        let items = make_items(size);
        let tree = Sha256Tree::build(&items).unwrap();
        let target = items[size / 2].clone();
        let proof = tree.prove(&target).unwrap();
        let root = tree.root_hash().to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(size), &proof, |b, proof| {
            b.iter(|| proof.verify::<Sha256>(black_box(&target), black_box(&root)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_prove, bench_verify);
criterion_main!(benches);
