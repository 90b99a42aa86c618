use criterion::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

use ranch::{Interval, PointSet, RangeSearch, RangeSearchConfig, TreeVariant};

fn random_points(cardinality: usize, dimensionality: usize, seed: u64) -> PointSet<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..cardinality)
        .map(|_| (0..dimensionality).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();
    PointSet::new(points).unwrap()
}

fn range_search(c: &mut Criterion) {
    let seed = 42;
    let (cardinality, dimensionality) = (100_000, 10);
    let data = random_points(cardinality, dimensionality, seed);

    let num_queries = 100;
    let queries = random_points(num_queries, dimensionality, seed + 1);

    let interval = Interval::new(0.0, 0.25).unwrap();

    let mut group = c.benchmark_group("range-search");
    group
        .sample_size(30)
        .sampling_mode(SamplingMode::Flat)
        .throughput(Throughput::Elements(num_queries as u64));

    for variant in [TreeVariant::Kd, TreeVariant::Ball, TreeVariant::Vp, TreeVariant::Rp] {
        let single = RangeSearch::build(
            data.clone(),
            &RangeSearchConfig {
                tree_variant: variant,
                single_mode: true,
                seed: Some(seed),
                ..RangeSearchConfig::default()
            },
        )
        .unwrap();
        let dual = RangeSearch::build(
            data.clone(),
            &RangeSearchConfig {
                tree_variant: variant,
                seed: Some(seed),
                ..RangeSearchConfig::default()
            },
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("single", variant), &single, |b, model| {
            b.iter_with_large_drop(|| model.search(Some(&queries), &interval));
        });
        group.bench_with_input(BenchmarkId::new("dual", variant), &dual, |b, model| {
            b.iter_with_large_drop(|| model.search(Some(&queries), &interval));
        });
    }

    let naive = RangeSearch::build(
        data,
        &RangeSearchConfig {
            naive: true,
            ..RangeSearchConfig::default()
        },
    )
    .unwrap();
    group.sample_size(10);
    group.bench_with_input(BenchmarkId::new("naive", "linear"), &naive, |b, model| {
        b.iter_with_large_drop(|| model.search(Some(&queries), &interval));
    });

    group.finish();
}

criterion_group!(benches, range_search);
criterion_main!(benches);
