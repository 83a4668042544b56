//! Benchmarks for EnvelopeTrack rebuilds and playback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavegain::dsp::{CurveKind, EnvelopeTrack};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/rebuild");

    // slowest and fastest host speeds
    for bpm in [60.0f32, 480.0] {
        let cycle = 60.0 / bpm;
        let mut track = EnvelopeTrack::new(SAMPLE_RATE);

        // alternate depths so every call validates and refills the table
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("bpm", bpm as u32), &cycle, |b, &cycle| {
            b.iter(|| {
                flip = !flip;
                let depth = if flip { 0.5 } else { -0.5 };
                let _ = track.set_parameters(black_box(depth), cycle, cycle * 0.5);
                track.select_curves(CurveKind::Gaussian, CurveKind::Sine);
            })
        });
    }

    group.finish();
}

pub fn bench_track(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/track");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![1.0f32; size];

        let mut track = EnvelopeTrack::new(SAMPLE_RATE);
        let _ = track.set_parameters(0.5, 0.25, 0.125);
        track.select_curves(CurveKind::Sine, CurveKind::Sine);

        // Per-sample reads
        group.bench_with_input(BenchmarkId::new("next_sample", size), &size, |b, &size| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..size {
                    acc += track.next_sample();
                }
                black_box(acc)
            })
        });

        // Block multiply
        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                track.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
