use crate::synthetic_data::generate_dataset;
use criterion::{black_box, Criterion};
use intellicage_performance::prelude::*;

pub fn bench_intervisit_histogram(c: &mut Criterion) {
    let dataset = generate_dataset(20, 2, 30);
    let bins = LogBins::intervisit();
    let mut group = c.benchmark_group("intervisit_histogram");

    group.bench_function("select_and_bin", |b| {
        b.iter(|| {
            let selected = select_corner(black_box(dataset.visits()), 1, 1);
            bins.histogram(to_seconds(intervisit_intervals(&selected)))
        })
    });

    group.bench_function("intervals_only", |b| {
        b.iter(|| intervisit_intervals(black_box(dataset.visits())).count())
    });

    group.finish();
}
