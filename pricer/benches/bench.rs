use criterion::{Criterion, criterion_group, criterion_main};
use pricer::{Options, aggregate, report};

const CITIES: [&str; 8] = [
    "Casablanca", "Rabat", "Tangier", "Fes", "Agadir", "Oujda", "Kenitra", "Tetouan",
];

fn dataset(lines: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(lines * 32);
    for i in 0..lines {
        let line = format!(
            "{},product_{},{}.{:02}\n",
            CITIES[i % CITIES.len()],
            (i * 31) % 97,
            (i * 17) % 100,
            (i * 7) % 100
        );
        data.extend_from_slice(line.as_bytes());
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let data = dataset(1_000_000);
    let opts = Options {
        block_size: 1 << 20,
        ..Options::default()
    };
    c.bench_function("aggregate_1m", |b| {
        b.iter(|| {
            let global = aggregate(&data, &opts).unwrap_or_else(|e| panic!("{e}"));
            report::render(&global, opts.top)
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_benchmark,
);

criterion_main!(benches);
