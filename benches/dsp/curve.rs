//! Benchmarks for segment synthesis.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavegain::dsp::curve::{synthesize, CurveKind, Segment};

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/curve");

    // 240 bpm at 48kHz: the default cycle, split at the default peak
    let cycle_samples = 12_000;
    let mut segment = vec![0.0f32; cycle_samples / 2];

    for kind in CurveKind::ALL {
        group.bench_with_input(
            BenchmarkId::new("leading", kind.name()),
            &kind,
            |b, &kind| {
                b.iter(|| {
                    synthesize(
                        black_box(kind),
                        Segment::Leading,
                        black_box(0.75),
                        cycle_samples,
                        black_box(&mut segment),
                    );
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("trailing", kind.name()),
            &kind,
            |b, &kind| {
                b.iter(|| {
                    synthesize(
                        black_box(kind),
                        Segment::Trailing,
                        black_box(-0.75),
                        cycle_samples,
                        black_box(&mut segment),
                    );
                })
            },
        );
    }

    group.finish();
}
