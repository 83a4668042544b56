//! Cycle geometry and full-table rendering.

use crate::{
    dsp::{
        convert::{seconds_to_sample, table_length},
        curve::{synthesize, CurveKind, Segment},
    },
    Error,
};

/// Curve families for the two segments of a cycle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurvePair {
    pub first: CurveKind,
    pub second: CurveKind,
}

impl CurvePair {
    pub fn new(first: CurveKind, second: CurveKind) -> Self {
        Self { first, second }
    }

    /// Build from the two host selectors (1 = linear, 2 = sine, 3 = gaussian).
    pub fn from_selectors(first: i32, second: i32) -> Result<Self, Error> {
        Ok(Self {
            first: CurveKind::from_selector(first)?,
            second: CurveKind::from_selector(second)?,
        })
    }
}

/// Validated sample geometry of one modulation cycle.
///
/// Holds the time-domain inputs next to the derived sample counts so the
/// layout can be recomputed when the sample rate changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    depth: f32,
    cycle_seconds: f32,
    peak_seconds: f32,
    sample_rate: f32,
    len: usize,
    peak_sample: usize,
}

impl SegmentLayout {
    /// Validate the inputs and derive table length and breakpoint.
    ///
    /// Rejects non-finite values, a non-positive cycle or sample rate, a peak
    /// outside `[0, cycle_seconds]`, and `|depth| > 1` (the floor would go
    /// negative and flip the signal's phase).
    pub fn new(
        depth: f32,
        cycle_seconds: f32,
        peak_seconds: f32,
        sample_rate: f32,
    ) -> Result<Self, Error> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        if !cycle_seconds.is_finite() || cycle_seconds <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "cycle length must be positive, got {cycle_seconds} s"
            )));
        }
        if !peak_seconds.is_finite() || !(0.0..=cycle_seconds).contains(&peak_seconds) {
            return Err(Error::InvalidParameter(format!(
                "peak time {peak_seconds} s outside cycle [0, {cycle_seconds}] s"
            )));
        }
        if !depth.is_finite() || depth.abs() > 1.0 {
            return Err(Error::InvalidParameter(format!(
                "depth must be within [-1, 1], got {depth}"
            )));
        }

        let len = table_length(cycle_seconds, sample_rate);
        let peak_sample = seconds_to_sample(peak_seconds, sample_rate).min(len);

        Ok(Self {
            depth,
            cycle_seconds,
            peak_seconds,
            sample_rate,
            len,
            peak_sample,
        })
    }

    /// Same cycle at a different sample rate.
    pub fn with_sample_rate(&self, sample_rate: f32) -> Result<Self, Error> {
        Self::new(
            self.depth,
            self.cycle_seconds,
            self.peak_seconds,
            sample_rate,
        )
    }

    /// Table length in samples (always >= 1).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn peak_sample(&self) -> usize {
        self.peak_sample
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn cycle_seconds(&self) -> f32 {
        self.cycle_seconds
    }

    pub fn peak_seconds(&self) -> f32 {
        self.peak_seconds
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Lowest gain the cycle reaches.
    pub fn floor(&self) -> f32 {
        1.0 - self.depth.abs()
    }

    /// Render both segments into `out`, which must be exactly `len()` long.
    pub fn render(&self, curves: CurvePair, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.len);

        let (leading, trailing) = out.split_at_mut(self.peak_sample);
        synthesize(curves.first, Segment::Leading, self.depth, self.len, leading);
        synthesize(curves.second, Segment::Trailing, self.depth, self.len, trailing);
    }

    /// Allocate and render a complete table.
    pub fn build(&self, curves: CurvePair) -> EnvelopeTable {
        let mut samples = vec![0.0; self.len].into_boxed_slice();
        self.render(curves, &mut samples);
        EnvelopeTable {
            samples,
            layout: Some(*self),
            curves,
        }
    }
}

/// A finished, immutable envelope table.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeTable {
    samples: Box<[f32]>,
    layout: Option<SegmentLayout>,
    curves: CurvePair,
}

impl EnvelopeTable {
    pub(crate) fn from_parts(
        samples: Box<[f32]>,
        layout: Option<SegmentLayout>,
        curves: CurvePair,
    ) -> Self {
        Self {
            samples,
            layout,
            curves,
        }
    }

    /// Placeholder table used before any parameters arrive: one slot of 0.0.
    pub fn silent() -> Self {
        Self {
            samples: vec![0.0].into_boxed_slice(),
            layout: None,
            curves: CurvePair::default(),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Value at `index`, wrapping modulo the table length.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.samples[index % self.samples.len()]
    }

    /// Layout the table was rendered from, `None` for the silent placeholder.
    pub fn layout(&self) -> Option<&SegmentLayout> {
        self.layout.as_ref()
    }

    pub fn curves(&self) -> CurvePair {
        self.curves
    }
}

impl Default for EnvelopeTable {
    fn default() -> Self {
        Self::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_counts() {
        let layout = SegmentLayout::new(0.5, 0.5, 0.25, 48_000.0).unwrap();
        assert_eq!(layout.len(), 24_000);
        assert_eq!(layout.peak_sample(), 12_000);
        assert!((layout.floor() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_layout_rejects_bad_cycle() {
        assert!(SegmentLayout::new(0.5, 0.0, 0.0, 48_000.0).is_err());
        assert!(SegmentLayout::new(0.5, -1.0, 0.0, 48_000.0).is_err());
        assert!(SegmentLayout::new(0.5, f32::NAN, 0.0, 48_000.0).is_err());
    }

    #[test]
    fn test_layout_rejects_peak_outside_cycle() {
        assert!(SegmentLayout::new(0.5, 1.0, 1.5, 48_000.0).is_err());
        assert!(SegmentLayout::new(0.5, 1.0, -0.1, 48_000.0).is_err());
    }

    #[test]
    fn test_layout_rejects_bad_depth_and_rate() {
        assert!(SegmentLayout::new(1.5, 1.0, 0.5, 48_000.0).is_err());
        assert!(SegmentLayout::new(f32::INFINITY, 1.0, 0.5, 48_000.0).is_err());
        assert!(SegmentLayout::new(0.5, 1.0, 0.5, 0.0).is_err());
    }

    #[test]
    fn test_tiny_cycle_collapses_to_one_slot() {
        let layout = SegmentLayout::new(0.5, 1e-7, 1e-7, 48_000.0).unwrap();
        assert_eq!(layout.len(), 1);
        assert!(layout.peak_sample() <= 1);
        let table = layout.build(CurvePair::default());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_peak_at_end_leaves_trailing_empty() {
        let layout = SegmentLayout::new(0.5, 0.01, 0.01, 1_000.0).unwrap();
        assert_eq!(layout.peak_sample(), layout.len());

        let table = layout.build(CurvePair::new(CurveKind::Sine, CurveKind::Gaussian));
        assert_eq!(table.len(), 10);
        assert_eq!(table.samples()[0], 1.0);
    }

    #[test]
    fn test_sample_rate_change_rescales() {
        let layout = SegmentLayout::new(0.3, 0.5, 0.1, 48_000.0).unwrap();
        let resampled = layout.with_sample_rate(96_000.0).unwrap();
        assert_eq!(resampled.len(), 48_000);
        assert_eq!(resampled.peak_sample(), 9_600);
        assert_eq!(resampled.depth(), 0.3);
    }

    #[test]
    fn test_silent_table() {
        let table = EnvelopeTable::silent();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(7), 0.0);
        assert!(table.layout().is_none());
    }

    #[test]
    fn test_curve_pair_from_selectors() {
        let pair = CurvePair::from_selectors(2, 3).unwrap();
        assert_eq!(pair, CurvePair::new(CurveKind::Sine, CurveKind::Gaussian));
        assert!(CurvePair::from_selectors(1, 9).is_err());
    }
}
