use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use simdup::SimhashEngine;

const WORDS: &[&str] = &[
    "river", "stone", "market", "signal", "harbor", "lantern", "orbit", "meadow", "cipher",
    "ledger", "summit", "thread", "valley", "beacon", "canvas", "timber",
];

fn synthetic_line(id: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(id * 7 + i * 13 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn fingerprint_bench(c: &mut Criterion) {
    let engine = SimhashEngine::new(4, 3).expect("engine");
    let line = synthetic_line(1, 200);

    c.bench_function("fingerprint_text_200_tokens", |b| {
        b.iter(|| {
            let fp = engine.fingerprint_text(black_box(&line)).expect("fingerprint");
            black_box(fp);
        });
    });
}

fn process_bench(c: &mut Criterion) {
    let corpus: Vec<String> = (0..1_000).map(|id| synthetic_line(id, 40)).collect();

    let mut group = c.benchmark_group("process_text");
    group.throughput(Throughput::Elements(corpus.len() as u64));
    group.bench_function("corpus_1000_lines", |b| {
        b.iter(|| {
            let engine = SimhashEngine::new(4, 3).expect("engine");
            for line in &corpus {
                black_box(engine.process_text(line).expect("process"));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, fingerprint_bench, process_bench);
criterion_main!(benches);
