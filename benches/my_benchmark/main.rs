// Available modules
mod intervals;
mod performance;
mod synthetic_data;

// Used Modules
use criterion::{criterion_group, criterion_main, Criterion};
use intervals::*;
use performance::*;

#[cfg(unix)]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    bench_compute_matrix(c);
    bench_summarize(c);
    bench_intervisit_histogram(c);
}

#[cfg(unix)]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(unix))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
