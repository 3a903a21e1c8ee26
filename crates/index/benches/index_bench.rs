use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use index::{IndexConfig, SimhashIndex};
use simhash::Fingerprint;

fn sample_fingerprint(id: u64) -> Fingerprint {
    // splitmix-style scramble so fractions spread across buckets
    let mut z = id.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    Fingerprint::new(z ^ (z >> 31))
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");

    group.bench_function("store_single", |b| {
        let index = SimhashIndex::new(IndexConfig::default()).expect("index");
        let fp = sample_fingerprint(1);
        b.iter(|| index.store(black_box(fp)))
    });

    for size in [1_000u64, 10_000, 100_000].iter() {
        let index = SimhashIndex::new(IndexConfig::default()).expect("index");
        for id in 0..*size {
            index.store(sample_fingerprint(id));
        }
        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("is_duplicate_{size}"), |b| {
            let query = sample_fingerprint(size + 1);
            b.iter(|| index.is_duplicate(black_box(query)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
