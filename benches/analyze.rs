//! Benchmarks for document analysis.
//!
//! Benchmark targets:
//! - Detector construction (regex compilation): <50ms
//! - Analysis of a 4 KB paper: <1ms
//! - Analysis of a ~1 MB document: <100ms

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use medscan::MedicalDetector;
use medscan::discovery::{extract_snippet, fingerprint};

const PARAGRAPH: &str = "Abstract. Cellular senescence and mitochondrial dysfunction \
    accumulate with aging. We evaluated rapamycin (sirolimus) and dasatinib plus \
    quercetin in a randomized controlled trial starting 2023-04-01. Methods and results \
    follow; see doi:10.1038/s41586-020-1234-5 and PMID: 31415926 for the original cohort study. \
    Our findings suggest NAD+ precursors such as nicotinamide riboside improve healthspan. ";

const FILLER: &str = "The committee reviewed the quarterly budget and parking allocations \
    for the northern campus without further discussion of the agenda items. ";

fn document(repeat: usize, paragraph: &str) -> String {
    paragraph.repeat(repeat)
}

fn bench_detector_construction(c: &mut Criterion) {
    c.bench_function("detector_builtin", |b| {
        b.iter(|| MedicalDetector::with_builtin_taxonomy().unwrap());
    });
}

fn bench_analyze(c: &mut Criterion) {
    let detector = MedicalDetector::with_builtin_taxonomy().unwrap();
    let mut group = c.benchmark_group("analyze");
    group.measurement_time(Duration::from_secs(5));

    for repeat in [1, 10, 2000] {
        let relevant = document(repeat, PARAGRAPH);
        group.throughput(Throughput::Bytes(relevant.len() as u64));
        group.bench_with_input(BenchmarkId::new("relevant", repeat), &relevant, |b, text| {
            b.iter(|| detector.analyze(black_box(text)));
        });

        let unrelated = document(repeat, FILLER);
        group.throughput(Throughput::Bytes(unrelated.len() as u64));
        group.bench_with_input(BenchmarkId::new("unrelated", repeat), &unrelated, |b, text| {
            b.iter(|| detector.analyze(black_box(text)));
        });
    }

    group.finish();
}

fn bench_record_helpers(c: &mut Criterion) {
    let detector = MedicalDetector::with_builtin_taxonomy().unwrap();
    let text = document(20, PARAGRAPH);
    let mut group = c.benchmark_group("record_helpers");

    group.bench_function("explain", |b| {
        b.iter(|| detector.explain(black_box(&text)));
    });
    group.bench_function("snippet", |b| {
        b.iter(|| extract_snippet(black_box(&text), detector.first_match(&text), 240));
    });
    group.bench_function("fingerprint", |b| {
        b.iter(|| fingerprint(black_box(&text)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_detector_construction,
    bench_analyze,
    bench_record_helpers
);
criterion_main!(benches);
