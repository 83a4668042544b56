//! Host-facing parameters with their ranges, defaults and conversions.
//!
//! A host (plugin wrapper, UI, automation) works in musical units: depth in dB,
//! speed in bpm, peak time as a fraction of the cycle and integer curve
//! selectors. [`ChannelParams::shape`] turns those into the linear depth and
//! second-based times that [`EnvelopeTrack`](crate::dsp::EnvelopeTrack)
//! expects. Hosts are expected to call [`ChannelParams::clamped`] first so
//! out-of-range automation never reaches the core.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{
    convert::{bpm_to_seconds, db_to_depth},
    CurveKind, CurvePair,
};

/// Range and default of one continuous host parameter.
#[derive(Debug, Clone)]
pub struct FloatRange {
    pub name: &'static str,
    pub unit: &'static str,
    pub range: RangeInclusive<f32>,
    pub default: f32,
}

impl FloatRange {
    /// Clamp into range. Non-finite input falls back to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(*self.range.start(), *self.range.end())
        } else {
            self.default
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        self.range.contains(&value)
    }

    /// Display string with unit, e.g. `"240 bpm"`.
    pub fn display(&self, value: f32) -> String {
        if self.unit.is_empty() {
            format!("{value:.2}")
        } else {
            format!("{value:.1} {}", self.unit)
        }
    }
}

pub const DEPTH_DB: FloatRange = FloatRange {
    name: "Depth",
    unit: "dB",
    range: -20.0..=20.0,
    default: 0.0,
};

pub const PEAK_TIME: FloatRange = FloatRange {
    name: "Peak Time",
    unit: "",
    range: 0.2..=0.8,
    default: 0.5,
};

pub const SPEED_BPM: FloatRange = FloatRange {
    name: "Speed",
    unit: "bpm",
    range: 60.0..=480.0,
    default: 240.0,
};

/// How the right channel gets its parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Every channel follows the first channel's parameters.
    Mono,
    /// Each channel has its own parameters.
    #[default]
    Stereo,
}

/// Parameters for one channel, in host units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    /// Depth in dB; the sign picks dip (+) or bump (-).
    pub depth_db: f32,
    /// Cycles per minute.
    pub speed_bpm: f32,
    /// Breakpoint position as a fraction of the cycle.
    pub peak_fraction: f32,
    pub first: CurveKind,
    pub second: CurveKind,
}

/// Inputs for [`EnvelopeTrack::set_parameters`](crate::dsp::EnvelopeTrack::set_parameters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub depth: f32,
    pub cycle_seconds: f32,
    pub peak_seconds: f32,
}

impl ChannelParams {
    /// Copy with every continuous value pulled into its host range.
    pub fn clamped(&self) -> Self {
        Self {
            depth_db: DEPTH_DB.clamp(self.depth_db),
            speed_bpm: SPEED_BPM.clamp(self.speed_bpm),
            peak_fraction: PEAK_TIME.clamp(self.peak_fraction),
            ..*self
        }
    }

    /// Convert to linear depth and seconds.
    pub fn shape(&self) -> ShapeParams {
        let cycle_seconds = bpm_to_seconds(self.speed_bpm);
        ShapeParams {
            depth: db_to_depth(self.depth_db),
            cycle_seconds,
            peak_seconds: self.peak_fraction * cycle_seconds,
        }
    }

    pub fn curves(&self) -> CurvePair {
        CurvePair::new(self.first, self.second)
    }
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            depth_db: DEPTH_DB.default,
            speed_bpm: SPEED_BPM.default,
            peak_fraction: PEAK_TIME.default,
            first: CurveKind::Linear,
            second: CurveKind::Linear,
        }
    }
}

/// Complete stereo parameter set, as persisted by the host.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveParams {
    pub left: ChannelParams,
    pub right: ChannelParams,
    pub mode: ChannelMode,
}

impl WaveParams {
    /// Effective parameters for `channel`, honoring the channel mode.
    ///
    /// Channel 0 reads `left`, every other channel reads `right` in stereo
    /// mode and `left` in mono mode.
    pub fn for_channel(&self, channel: usize) -> &ChannelParams {
        match (self.mode, channel) {
            (_, 0) | (ChannelMode::Mono, _) => &self.left,
            (ChannelMode::Stereo, _) => &self.right,
        }
    }

    pub fn clamped(&self) -> Self {
        Self {
            left: self.left.clamped(),
            right: self.right.clamped(),
            mode: self.mode,
        }
    }
}
