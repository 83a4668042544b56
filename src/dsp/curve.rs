//! Segment shapes for the envelope table.

use std::f32::consts::PI;

use crate::Error;

/*
Curve Synthesis
===============

A modulation cycle is split at the breakpoint into two segments. Each segment
is filled with one shape family, chosen independently.

Vocabulary
----------

  segment       A contiguous run of table slots. The LEADING segment runs from
                the start of the cycle up to the breakpoint, the TRAILING
                segment from the breakpoint to the end of the cycle.

  edge level    The gain at the start and end of the cycle.

  breakpoint    The gain at the peak sample, where the two segments meet.
  level

  excursion     How far a slot has travelled from the edge level toward the
                breakpoint level, normalized to [0, 1]:
                  0.0 → edge level
                  1.0 → breakpoint level


The Shape: Signed Depth
-----------------------

Positive depth dips (edge = 1, breakpoint = 1 - depth):

    1.0 ─╲           ╱─
          ╲         ╱
           ╲       ╱
    floor   ╲_____╱
          leading trailing

Negative depth bumps (edge = 1 - |depth|, breakpoint = 1):

    1.0      ╱‾‾‾‾‾╲
            ╱       ╲
           ╱         ╲
    floor ╱           ╲

Both cases collapse into one rule, so no shape has to look at the sign:

    level = 1 + min(depth, 0) - excursion × depth

    depth = +0.5:  excursion 0 → 1.0,  excursion 1 → 0.5
    depth = -0.5:  excursion 0 → 0.5,  excursion 1 → 1.0
    depth =  0.0:  always 1.0 (flat passthrough)


The Families
------------

For slot j of a segment W slots wide:

LINEAR
    leading:   e = j / W
    trailing:  e = 1 - j / W
    Constant slope. Sharp corner at the breakpoint, but no jump.

SINE (half-cosine)
    leading:   e = (1 - cos(π·j / W)) / 2
    trailing:  e = (1 + cos(π·j / W)) / 2
    The trailing half is the leading half shifted by π, so the slope is zero
    on both sides of the breakpoint. Smooth ease-in / ease-out.

GAUSSIAN
    e = exp(-x² / w²),  w = 0.1 × cycle length in samples
    leading:   x = j - W   (distance to the breakpoint)
    trailing:  x = j
    A narrow notch (or spike) sitting on the breakpoint. The width is tied to
    the whole cycle, not to the segment, and x is measured from the
    breakpoint rather than the segment center, so a long segment spends most
    of its length near the edge level.


Edge Cases
----------

  W = 0        Nothing is written. The other segment covers the whole cycle.
  depth = 0    Every family produces 1.0.
*/

/// Fraction of the cycle length used as the Gaussian width.
pub const GAUSSIAN_WIDTH_RATIO: f32 = 0.1;

/// Shape family applied to one segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    #[default]
    Linear,
    Sine,
    Gaussian,
}

impl CurveKind {
    pub const ALL: [CurveKind; 3] = [CurveKind::Linear, CurveKind::Sine, CurveKind::Gaussian];

    /// Map a host selector (1 = linear, 2 = sine, 3 = gaussian) to a curve.
    pub fn from_selector(selector: i32) -> Result<Self, Error> {
        match selector {
            1 => Ok(CurveKind::Linear),
            2 => Ok(CurveKind::Sine),
            3 => Ok(CurveKind::Gaussian),
            other => Err(Error::InvalidParameter(format!(
                "unknown curve selector {other} (expected 1, 2 or 3)"
            ))),
        }
    }

    /// Host selector value for this curve.
    pub fn selector(self) -> i32 {
        match self {
            CurveKind::Linear => 1,
            CurveKind::Sine => 2,
            CurveKind::Gaussian => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Linear => "linear",
            CurveKind::Sine => "sine",
            CurveKind::Gaussian => "gaussian",
        }
    }
}

impl TryFrom<i32> for CurveKind {
    type Error = Error;

    fn try_from(selector: i32) -> Result<Self, Self::Error> {
        CurveKind::from_selector(selector)
    }
}

/// Which side of the breakpoint a segment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// `[0, peak)`: travels from the edge level to the breakpoint level.
    Leading,
    /// `[peak, len)`: travels from the breakpoint level back to the edge level.
    Trailing,
}

/// Gain for a normalized excursion under a signed depth.
#[inline]
pub fn level(depth: f32, excursion: f32) -> f32 {
    1.0 + depth.min(0.0) - excursion * depth
}

/// Fill `out` with one segment of the given shape.
///
/// `cycle_samples` is the full table length; only the Gaussian family reads it.
/// An empty `out` is a no-op.
pub fn synthesize(
    kind: CurveKind,
    segment: Segment,
    depth: f32,
    cycle_samples: usize,
    out: &mut [f32],
) {
    if out.is_empty() {
        return;
    }

    match kind {
        CurveKind::Linear => linear(segment, depth, out),
        CurveKind::Sine => sine(segment, depth, out),
        CurveKind::Gaussian => gaussian(segment, depth, cycle_samples, out),
    }
}

fn linear(segment: Segment, depth: f32, out: &mut [f32]) {
    let width = out.len() as f32;
    for (j, slot) in out.iter_mut().enumerate() {
        let ramp = j as f32 / width;
        let excursion = match segment {
            Segment::Leading => ramp,
            Segment::Trailing => 1.0 - ramp,
        };
        *slot = level(depth, excursion);
    }
}

fn sine(segment: Segment, depth: f32, out: &mut [f32]) {
    let width = out.len() as f32;
    for (j, slot) in out.iter_mut().enumerate() {
        let cos = (PI * j as f32 / width).cos();
        let excursion = match segment {
            Segment::Leading => (1.0 - cos) * 0.5,
            Segment::Trailing => (1.0 + cos) * 0.5,
        };
        *slot = level(depth, excursion);
    }
}

fn gaussian(segment: Segment, depth: f32, cycle_samples: usize, out: &mut [f32]) {
    let width = out.len() as f32;
    let w = GAUSSIAN_WIDTH_RATIO * cycle_samples.max(1) as f32;
    let inv_w2 = 1.0 / (w * w);
    for (j, slot) in out.iter_mut().enumerate() {
        let x = match segment {
            Segment::Leading => j as f32 - width,
            Segment::Trailing => j as f32,
        };
        let excursion = (-x * x * inv_w2).exp();
        *slot = level(depth, excursion);
    }
}
