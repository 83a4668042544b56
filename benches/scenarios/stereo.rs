//! Stereo processing, single-threaded and through the realtime handoff.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavegain::{
    dsp::CurveKind,
    engine::{wave_handoff, ChannelMode, ChannelParams, WaveParams, Waves},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn params() -> WaveParams {
    WaveParams {
        left: ChannelParams {
            depth_db: 9.0,
            speed_bpm: 200.0,
            peak_fraction: 0.35,
            first: CurveKind::Gaussian,
            second: CurveKind::Linear,
        },
        right: ChannelParams {
            depth_db: -6.0,
            speed_bpm: 130.0,
            peak_fraction: 0.6,
            first: CurveKind::Sine,
            second: CurveKind::Gaussian,
        },
        mode: ChannelMode::Stereo,
    }
}

pub fn bench_stereo(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/stereo");
    let params = params();

    for &size in BLOCK_SIZES {
        let mut left = vec![0.5f32; size];
        let mut right = vec![0.5f32; size];
        let mut interleaved = vec![0.5f32; size * 2];

        let mut waves = Waves::new(2, SAMPLE_RATE);
        let _ = waves.apply(&params);
        group.bench_with_input(BenchmarkId::new("planar", size), &size, |b, _| {
            b.iter(|| {
                let _ = waves.process_block(black_box(&mut [&mut left[..], &mut right[..]]));
            })
        });

        group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
            b.iter(|| {
                let _ = waves.process_interleaved(black_box(&mut interleaved), 2);
            })
        });

        // Player side of the handoff, including the per-block poll
        if let Ok((mut controller, mut player)) = wave_handoff(2, SAMPLE_RATE, 4) {
            let _ = controller.apply(&params);
            group.bench_with_input(BenchmarkId::new("handoff", size), &size, |b, _| {
                b.iter(|| {
                    player.poll();
                    let _ = player.process_block(black_box(&mut [&mut left[..], &mut right[..]]));
                })
            });
        }
    }

    group.finish();
}
