use crate::{
    dsp::{
        curve::CurveKind,
        layout::{CurvePair, EnvelopeTable, SegmentLayout},
    },
    Error,
};

/*
Envelope Track
==============

One channel's modulation state: the table for the current cycle and the
cursor that walks it, one slot per audio sample.

Vocabulary
----------

  table         One full cycle of gain multipliers, precomputed.

  cursor        Index of the next slot to hand out. Advances by one on every
                read and wraps to 0 at the end of the table.

  layout        The sample geometry (length, breakpoint, depth) the table was
                sized for. See `dsp/layout.rs`.


Update Protocol
---------------

Updates come in two steps so that all scalar parameters land before any slot
is rewritten:

    set_parameters(depth, cycle, peak)   validate + resize (no fill)
    select_curves(first, second)         fill both segments

    ┌────────────┐ set_parameters ┌─────────┐ select_curves ┌────────┐
    │ configured │ ─────────────→ │ resized │ ────────────→ │ filled │
    └────────────┘                └─────────┘               └────────┘
          ↑                                                      │
          └──────────────────────────────────────────────────────┘

A rejected update leaves layout, table and cursor exactly as they were.


Resizing and the Cursor
-----------------------

When the table length changes from N1 to N2 the cursor is remapped:

    cursor = cursor mod N2

The phase inside the cycle is not preserved, so a resize mid-cycle can jump
to a different gain. Reads never go out of bounds.


Realtime Notes
--------------

`next_sample`, `get` and `process` never allocate. `set_parameters`,
`select_curves` and `prepare` may, so a realtime host should call them off the
render thread, or use the controller/player pair in `engine::handoff` which
publishes finished tables.
*/

/// Per-channel envelope table with a cyclic read cursor.
#[derive(Debug, Clone)]
pub struct EnvelopeTrack {
    table: Vec<f32>,
    layout: Option<SegmentLayout>,
    curves: CurvePair,
    sample_rate: f32,
    cursor: usize,
}

impl EnvelopeTrack {
    /// Create an unconfigured track: one slot holding 0.0.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            table: vec![0.0],
            layout: None,
            curves: CurvePair::default(),
            sample_rate,
            cursor: 0,
        }
    }

    /// Switch sample rate. A configured track is resized and refilled with the
    /// last selected curves, keeping the cycle's length in seconds.
    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), Error> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            let err = Error::InvalidParameter(format!(
                "sample rate must be positive, got {sample_rate}"
            ));
            log::warn!("rejected sample rate change: {err}");
            return Err(err);
        }

        if let Some(layout) = self.layout {
            let layout = layout.with_sample_rate(sample_rate)?;
            self.apply_layout(layout);
            layout.render(self.curves, &mut self.table);
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    /// Validate and store new cycle parameters, resizing the table.
    ///
    /// * `depth` - signed linear depth in `[-1, 1]`
    /// * `cycle_seconds` - full cycle length, must be positive
    /// * `peak_seconds` - breakpoint offset in `[0, cycle_seconds]`
    ///
    /// The table is not refilled until [`select_curves`](Self::select_curves).
    pub fn set_parameters(
        &mut self,
        depth: f32,
        cycle_seconds: f32,
        peak_seconds: f32,
    ) -> Result<(), Error> {
        let layout = SegmentLayout::new(depth, cycle_seconds, peak_seconds, self.sample_rate)
            .inspect_err(|err| log::warn!("rejected envelope parameters: {err}"))?;

        if self.layout != Some(layout) {
            self.apply_layout(layout);
        }
        Ok(())
    }

    /// Regenerate both segments with the given shapes.
    ///
    /// Before the first successful `set_parameters` this only records the
    /// choice and the table stays silent.
    pub fn select_curves(&mut self, first: CurveKind, second: CurveKind) {
        self.curves = CurvePair::new(first, second);
        if let Some(layout) = &self.layout {
            layout.render(self.curves, &mut self.table);
        }
    }

    /// Table value at the cursor, then advance the cursor by one slot.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = self.table[self.cursor];
        self.cursor += 1;
        if self.cursor >= self.table.len() {
            self.cursor = 0;
        }
        value
    }

    /// Fill `out` with consecutive multipliers.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Multiply `samples` in place by consecutive multipliers.
    pub fn process(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample *= self.next_sample();
        }
    }

    /// Random access with wraparound. Does not move the cursor.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.table[index % self.table.len()]
    }

    /// The whole table, for display.
    pub fn snapshot(&self) -> &[f32] {
        &self.table
    }

    /// Owned copy of the current slots, same values as [`snapshot`](Self::snapshot).
    pub fn to_table(&self) -> EnvelopeTable {
        EnvelopeTable::from_parts(
            self.table.clone().into_boxed_slice(),
            self.layout,
            self.curves,
        )
    }

    /// Rewind the cursor to the start of the cycle.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn peak_sample(&self) -> usize {
        self.layout.map_or(0, |layout| layout.peak_sample())
    }

    pub fn depth(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.depth())
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn curves(&self) -> CurvePair {
        self.curves
    }

    pub fn layout(&self) -> Option<&SegmentLayout> {
        self.layout.as_ref()
    }

    fn apply_layout(&mut self, layout: SegmentLayout) {
        let len = layout.len();
        if len != self.table.len() {
            log::debug!(
                "resizing envelope table {} -> {} samples (peak at {})",
                self.table.len(),
                len,
                layout.peak_sample()
            );
            self.table.resize(len, 0.0);
            self.cursor %= len;
        }
        self.layout = Some(layout);
    }
}
