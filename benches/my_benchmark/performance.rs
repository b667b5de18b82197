use crate::synthetic_data::{generate_dataset, generate_phases};
use criterion::{black_box, Criterion};
use intellicage_performance::prelude::*;

pub fn bench_compute_matrix(c: &mut Criterion) {
    let phases = generate_phases(8);
    let mut group = c.benchmark_group("compute_matrix");

    for subject_count in [10, 50] {
        let dataset = generate_dataset(subject_count, phases.len(), 120);
        let subjects = dataset.subjects();

        for measure in [
            PerformanceMeasure::CornerPreference,
            PerformanceMeasure::FirstNosepokeSide,
        ] {
            group.bench_function(format!("{:?}/{}", measure, subject_count), |b| {
                b.iter(|| {
                    measure_matrix(
                        black_box(&dataset),
                        black_box(&subjects),
                        black_box(&phases),
                        black_box(measure),
                    )
                })
            });
        }
    }

    group.finish();
}

pub fn bench_summarize(c: &mut Criterion) {
    let phases = generate_phases(8);
    let dataset = generate_dataset(50, phases.len(), 120);
    let matrix = measure_matrix(
        &dataset,
        &dataset.subjects(),
        &phases,
        PerformanceMeasure::CornerPreference,
    )
    .unwrap();

    let mut group = c.benchmark_group("summarize");
    for error_bar in [ErrorBar::Sem, ErrorBar::Ci95] {
        group.bench_function(format!("{:?}", error_bar), |b| {
            b.iter(|| summarize(black_box(&matrix), black_box(error_bar)))
        });
    }

    group.finish();
}
