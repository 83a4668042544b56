use crate::{
    dsp::{CurvePair, EnvelopeTrack},
    engine::params::{ChannelParams, WaveParams},
    Error,
};

/// Per-channel envelope tracks applied to a multichannel signal.
///
/// Every channel owns an independent [`EnvelopeTrack`]. This type updates and
/// reads them on the same thread, matching a host that calls
/// `apply` and `process_block` back to back from its render callback. For a
/// render thread that must never allocate, see
/// [`WaveController`](crate::engine::WaveController) /
/// [`WavePlayer`](crate::engine::WavePlayer).
pub struct Waves {
    tracks: Vec<EnvelopeTrack>,
    sample_rate: f32,
}

impl Waves {
    pub fn new(channels: usize, sample_rate: f32) -> Self {
        Self {
            tracks: (0..channels)
                .map(|_| EnvelopeTrack::new(sample_rate))
                .collect(),
            sample_rate,
        }
    }

    /// Stereo pair with default parameters applied.
    pub fn stereo(sample_rate: f32) -> Result<Self, Error> {
        let mut waves = Self::new(2, sample_rate);
        waves.apply(&WaveParams::default())?;
        Ok(waves)
    }

    pub fn num_channels(&self) -> usize {
        self.tracks.len()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change sample rate (and channel count) before playback.
    ///
    /// New channels start unconfigured; existing ones are rebuilt at the new
    /// rate from their stored cycle parameters.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize) -> Result<(), Error> {
        if channels == 0 {
            return Err(Error::InvalidParameter(
                "at least one channel is required".into(),
            ));
        }
        for track in &mut self.tracks {
            track.prepare(sample_rate)?;
        }
        self.tracks
            .resize_with(channels, || EnvelopeTrack::new(sample_rate));
        self.sample_rate = sample_rate;

        log::info!("prepared {channels} channel(s) at {sample_rate} Hz");
        Ok(())
    }

    pub fn track(&self, channel: usize) -> Result<&EnvelopeTrack, Error> {
        let channels = self.tracks.len();
        self.tracks
            .get(channel)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }

    pub fn track_mut(&mut self, channel: usize) -> Result<&mut EnvelopeTrack, Error> {
        let channels = self.tracks.len();
        self.tracks
            .get_mut(channel)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }

    /// Apply one channel's host parameters (clamped first).
    pub fn apply_channel(&mut self, channel: usize, params: &ChannelParams) -> Result<(), Error> {
        let params = params.clamped();
        let shape = params.shape();
        let track = self.track_mut(channel)?;

        track.set_parameters(shape.depth, shape.cycle_seconds, shape.peak_seconds)?;
        let CurvePair { first, second } = params.curves();
        track.select_curves(first, second);
        Ok(())
    }

    /// Apply the full parameter set to every channel.
    ///
    /// Stops at the first channel that rejects its update; earlier channels
    /// keep their new tables, later ones keep their old tables.
    pub fn apply(&mut self, params: &WaveParams) -> Result<(), Error> {
        for channel in 0..self.tracks.len() {
            self.apply_channel(channel, params.for_channel(channel))?;
        }
        Ok(())
    }

    /// Next multiplier for `channel`.
    #[inline]
    pub fn next_sample(&mut self, channel: usize) -> Result<f32, Error> {
        Ok(self.track_mut(channel)?.next_sample())
    }

    /// Multiply each channel slice by its envelope.
    ///
    /// `buffers[n]` is processed by track `n`.
    pub fn process_block(&mut self, buffers: &mut [&mut [f32]]) -> Result<(), Error> {
        let channels = self.tracks.len();
        if buffers.len() > channels {
            return Err(Error::ChannelIndexOutOfRange {
                channel: buffers.len() - 1,
                channels,
            });
        }
        for (track, buffer) in self.tracks.iter_mut().zip(buffers.iter_mut()) {
            track.process(buffer);
        }
        Ok(())
    }

    /// Multiply an interleaved buffer with `channels` samples per frame.
    pub fn process_interleaved(&mut self, data: &mut [f32], channels: usize) -> Result<(), Error> {
        let configured = self.tracks.len();
        if channels == 0 || channels > configured {
            return Err(Error::ChannelIndexOutOfRange {
                channel: channels.saturating_sub(1),
                channels: configured,
            });
        }
        for frame in data.chunks_exact_mut(channels) {
            for (track, sample) in self.tracks.iter_mut().zip(frame.iter_mut()) {
                *sample *= track.next_sample();
            }
        }
        Ok(())
    }

    /// Copy of a channel's table, for display.
    pub fn snapshot(&self, channel: usize) -> Result<Vec<f32>, Error> {
        Ok(self.track(channel)?.snapshot().to_vec())
    }

    /// Rewind every cursor.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::CurveKind, engine::params::ChannelMode};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn params(depth_db: f32, speed_bpm: f32) -> ChannelParams {
        ChannelParams {
            depth_db,
            speed_bpm,
            peak_fraction: 0.5,
            first: CurveKind::Sine,
            second: CurveKind::Sine,
        }
    }

    #[test]
    fn channels_are_independent() {
        let mut waves = Waves::new(2, SAMPLE_RATE);
        waves
            .apply(&WaveParams {
                left: params(6.0, 120.0),
                right: params(-12.0, 240.0),
                mode: ChannelMode::Stereo,
            })
            .unwrap();

        assert_eq!(waves.track(0).unwrap().len(), 24_000);
        assert_eq!(waves.track(1).unwrap().len(), 12_000);
        assert!(waves.track(0).unwrap().depth() > 0.0);
        assert!(waves.track(1).unwrap().depth() < 0.0);
    }

    #[test]
    fn mono_mode_shares_left_parameters() {
        let mut waves = Waves::new(2, SAMPLE_RATE);
        waves
            .apply(&WaveParams {
                left: params(6.0, 120.0),
                right: params(-12.0, 240.0),
                mode: ChannelMode::Mono,
            })
            .unwrap();

        assert_eq!(
            waves.snapshot(0).unwrap(),
            waves.snapshot(1).unwrap()
        );
    }

    #[test]
    fn out_of_range_channel_is_reported() {
        let mut waves = Waves::stereo(SAMPLE_RATE).unwrap();
        assert_eq!(
            waves.next_sample(2),
            Err(Error::ChannelIndexOutOfRange {
                channel: 2,
                channels: 2
            })
        );
        assert!(waves.snapshot(5).is_err());
        assert!(waves.apply_channel(3, &ChannelParams::default()).is_err());
    }

    #[test]
    fn process_block_applies_gain() {
        let mut waves = Waves::new(2, SAMPLE_RATE);
        let mut wave_params = WaveParams::default();
        wave_params.left = params(20.0, 240.0);
        waves.apply(&wave_params).unwrap();

        let mut left = vec![1.0; 12_000];
        let mut right = vec![1.0; 12_000];
        waves
            .process_block(&mut [left.as_mut_slice(), right.as_mut_slice()])
            .unwrap();

        // -20 dB dip bottoms out at the breakpoint
        assert!((left[6_000] - 0.1).abs() < 1e-4);
        // 0 dB default leaves the right channel untouched
        assert!(right.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn process_block_rejects_extra_channels() {
        let mut waves = Waves::stereo(SAMPLE_RATE).unwrap();
        let mut a = [0.0; 4];
        let mut b = [0.0; 4];
        let mut c = [0.0; 4];
        assert!(waves
            .process_block(&mut [&mut a[..], &mut b[..], &mut c[..]])
            .is_err());
    }

    #[test]
    fn interleaved_matches_planar() {
        let mut planar = Waves::stereo(SAMPLE_RATE).unwrap();
        let mut interleaved = Waves::stereo(SAMPLE_RATE).unwrap();
        let wave_params = WaveParams {
            left: params(9.0, 300.0),
            right: params(-4.0, 90.0),
            mode: ChannelMode::Stereo,
        };
        planar.apply(&wave_params).unwrap();
        interleaved.apply(&wave_params).unwrap();

        let mut left = vec![0.5; 256];
        let mut right = vec![-0.5; 256];
        planar
            .process_block(&mut [left.as_mut_slice(), right.as_mut_slice()])
            .unwrap();

        let mut data: Vec<f32> = (0..512).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        interleaved.process_interleaved(&mut data, 2).unwrap();

        for i in 0..256 {
            assert_eq!(data[i * 2], left[i]);
            assert_eq!(data[i * 2 + 1], right[i]);
        }
    }

    #[test]
    fn prepare_adds_channels_and_rescales() {
        let mut waves = Waves::stereo(SAMPLE_RATE).unwrap();
        waves.prepare(96_000.0, 3).unwrap();

        assert_eq!(waves.num_channels(), 3);
        assert_eq!(waves.track(0).unwrap().len(), 24_000);
        assert_eq!(waves.track(2).unwrap().len(), 1);
        assert!(waves.prepare(48_000.0, 0).is_err());
    }
}
