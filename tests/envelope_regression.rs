use wavegain::{
    dsp::{CurveKind, EnvelopeTrack},
    engine::{ChannelMode, ChannelParams, WaveParams, Waves},
    Error,
};

const SAMPLE_RATE: f32 = 48_000.0;

#[test]
fn default_stereo_is_transparent() {
    let mut waves = Waves::stereo(SAMPLE_RATE).unwrap();
    let mut left = vec![0.25f32; 2_048];
    let mut right = vec![-0.25f32; 2_048];
    waves
        .process_block(&mut [left.as_mut_slice(), right.as_mut_slice()])
        .unwrap();

    assert!(left.iter().all(|&s| s == 0.25));
    assert!(right.iter().all(|&s| s == -0.25));
}

#[test]
fn tables_stay_within_gain_bounds() {
    for first in CurveKind::ALL {
        for second in CurveKind::ALL {
            for depth in [-1.0f32, -0.4, 0.0, 0.4, 1.0] {
                let mut track = EnvelopeTrack::new(SAMPLE_RATE);
                track.set_parameters(depth, 0.3, 0.12).unwrap();
                track.select_curves(first, second);

                let floor = 1.0 - depth.abs();
                for &value in track.snapshot() {
                    assert!(value.is_finite());
                    assert!(value >= floor - 1e-5, "{first:?}/{second:?} {depth}");
                    assert!(value <= 1.0 + 1e-5, "{first:?}/{second:?} {depth}");
                }
            }
        }
    }
}

#[test]
fn output_repeats_every_cycle() {
    let mut waves = Waves::new(1, SAMPLE_RATE);
    waves
        .apply_channel(
            0,
            &ChannelParams {
                depth_db: 8.0,
                speed_bpm: 240.0,
                peak_fraction: 0.4,
                first: CurveKind::Gaussian,
                second: CurveKind::Sine,
            },
        )
        .unwrap();

    let mut buffer = vec![1.0f32; 36_000];
    waves.process_block(&mut [buffer.as_mut_slice()]).unwrap();

    let (first, rest) = buffer.split_at(12_000);
    assert_eq!(first, &rest[..12_000]);
    assert_eq!(first, &rest[12_000..]);
}

#[test]
fn rejected_update_keeps_playing_previous_table() {
    let mut waves = Waves::stereo(SAMPLE_RATE).unwrap();
    let before = waves.snapshot(0).unwrap();

    let err = waves
        .track_mut(0)
        .unwrap()
        .set_parameters(0.5, 0.25, 0.5)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
    assert_eq!(waves.snapshot(0).unwrap(), before);
}

#[test]
fn mono_mode_links_both_channels() {
    let params = WaveParams {
        left: ChannelParams {
            depth_db: -10.0,
            ..Default::default()
        },
        right: ChannelParams {
            depth_db: 15.0,
            speed_bpm: 100.0,
            ..Default::default()
        },
        mode: ChannelMode::Mono,
    };
    let mut waves = Waves::new(2, SAMPLE_RATE);
    waves.apply(&params).unwrap();

    let mut left = vec![1.0f32; 4_000];
    let mut right = vec![1.0f32; 4_000];
    waves
        .process_block(&mut [left.as_mut_slice(), right.as_mut_slice()])
        .unwrap();
    assert_eq!(left, right);
}

#[cfg(feature = "rtrb")]
#[test]
fn handoff_survives_concurrent_updates() {
    use std::{sync::Arc, thread};
    use wavegain::engine::wave_handoff;

    let (mut controller, mut player) = wave_handoff(2, SAMPLE_RATE, 2).unwrap();
    controller.apply(&WaveParams::default()).unwrap();

    let render = thread::spawn(move || {
        let mut left = [1.0f32; 128];
        let mut right = [1.0f32; 128];
        for _ in 0..2_000 {
            player.poll();
            left.fill(1.0);
            right.fill(1.0);
            player
                .process_block(&mut [&mut left[..], &mut right[..]])
                .unwrap();
            // depth never exceeds 20 dB, so gain stays within [0.1, 1]
            assert!(left
                .iter()
                .chain(right.iter())
                .all(|&g| (0.099..=1.0001).contains(&g)));
        }
        player
    });

    let mut params = WaveParams::default();
    for step in 0..200 {
        params.left.depth_db = (step % 41) as f32 - 20.0;
        params.right.speed_bpm = 60.0 + (step * 7 % 420) as f32;
        params.right.first = CurveKind::ALL[step % 3];
        match controller.apply(&params) {
            Ok(()) | Err(Error::QueueFull) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
        controller.maintain().ok();
    }

    let mut player = render.join().unwrap();

    // drain whatever is still queued, then both sides agree
    for _ in 0..8 {
        controller.maintain().ok();
        player.poll();
    }
    let latest = controller.snapshot(1).unwrap();
    let adopted = player.player(1).unwrap().table();
    assert_eq!(latest.samples(), adopted.samples());
    assert!(Arc::strong_count(&latest) >= 2);
}
