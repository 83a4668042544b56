//! Multichannel controller/player built from per-channel handoffs.

use std::sync::Arc;

use crate::{
    dsp::EnvelopeTable,
    engine::{
        handoff::{track_handoff, TrackController, TrackPlayer},
        params::{ChannelParams, WaveParams},
    },
    Error,
};

/// Default number of tables in flight per channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Control-thread side: one [`TrackController`] per channel.
pub struct WaveController {
    controllers: Vec<TrackController>,
}

/// Render-thread side: one [`TrackPlayer`] per channel.
pub struct WavePlayer {
    players: Vec<TrackPlayer>,
}

/// Create a connected multichannel controller/player pair.
pub fn wave_handoff(
    channels: usize,
    sample_rate: f32,
    capacity: usize,
) -> Result<(WaveController, WavePlayer), Error> {
    if channels == 0 {
        return Err(Error::InvalidParameter(
            "at least one channel is required".into(),
        ));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }

    let (controllers, players): (Vec<_>, Vec<_>) = (0..channels)
        .map(|_| track_handoff(sample_rate, capacity))
        .unzip();
    log::info!("realtime handoff for {channels} channel(s) at {sample_rate} Hz");

    Ok((WaveController { controllers }, WavePlayer { players }))
}

impl WaveController {
    pub fn num_channels(&self) -> usize {
        self.controllers.len()
    }

    pub fn controller(&mut self, channel: usize) -> Result<&mut TrackController, Error> {
        let channels = self.controllers.len();
        self.controllers
            .get_mut(channel)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }

    pub fn apply_channel(&mut self, channel: usize, params: &ChannelParams) -> Result<(), Error> {
        self.controller(channel)?.apply(params)
    }

    /// Apply the full parameter set to every channel.
    ///
    /// Every channel is attempted; the first error is returned.
    pub fn apply(&mut self, params: &WaveParams) -> Result<(), Error> {
        let mut result = Ok(());
        for (channel, controller) in self.controllers.iter_mut().enumerate() {
            let applied = controller.apply(params.for_channel(channel));
            if result.is_ok() {
                result = applied;
            }
        }
        result
    }

    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), Error> {
        for controller in &mut self.controllers {
            controller.prepare(sample_rate)?;
        }
        Ok(())
    }

    /// Retry pending publishes and release retired tables.
    pub fn maintain(&mut self) -> Result<(), Error> {
        let mut result = Ok(());
        for controller in &mut self.controllers {
            controller.collect();
            let flushed = controller.flush();
            if result.is_ok() {
                result = flushed;
            }
        }
        result
    }

    pub fn snapshot(&self, channel: usize) -> Result<Arc<EnvelopeTable>, Error> {
        let channels = self.controllers.len();
        self.controllers
            .get(channel)
            .map(TrackController::snapshot)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }
}

impl WavePlayer {
    pub fn num_channels(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, channel: usize) -> Result<&TrackPlayer, Error> {
        let channels = self.players.len();
        self.players
            .get(channel)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }

    /// Adopt newly published tables on every channel. Call once per block.
    pub fn poll(&mut self) -> bool {
        let mut swapped = false;
        for player in &mut self.players {
            swapped |= player.poll();
        }
        swapped
    }

    #[inline]
    pub fn next_sample(&mut self, channel: usize) -> Result<f32, Error> {
        let channels = self.players.len();
        self.players
            .get_mut(channel)
            .map(TrackPlayer::next_sample)
            .ok_or(Error::ChannelIndexOutOfRange { channel, channels })
    }

    /// Multiply each channel slice by its envelope.
    pub fn process_block(&mut self, buffers: &mut [&mut [f32]]) -> Result<(), Error> {
        let channels = self.players.len();
        if buffers.len() > channels {
            return Err(Error::ChannelIndexOutOfRange {
                channel: buffers.len() - 1,
                channels,
            });
        }
        for (player, buffer) in self.players.iter_mut().zip(buffers.iter_mut()) {
            player.process(buffer);
        }
        Ok(())
    }

    /// Multiply an interleaved buffer with `channels` samples per frame.
    pub fn process_interleaved(&mut self, data: &mut [f32], channels: usize) -> Result<(), Error> {
        let configured = self.players.len();
        if channels == 0 || channels > configured {
            return Err(Error::ChannelIndexOutOfRange {
                channel: channels.saturating_sub(1),
                channels: configured,
            });
        }
        for frame in data.chunks_exact_mut(channels) {
            for (player, sample) in self.players.iter_mut().zip(frame.iter_mut()) {
                *sample *= player.next_sample();
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }
}
