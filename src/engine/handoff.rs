use std::{mem, sync::Arc};

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    dsp::{CurvePair, EnvelopeTable, SegmentLayout},
    engine::params::ChannelParams,
    Error,
};

/*
Table Handoff
=============

Rebuilding an envelope table allocates, and the render thread must never
allocate, free or wait. So tables are built on the control thread and handed
over whole.

    control thread                               render thread
    ──────────────                               ─────────────
    TrackController                              TrackPlayer
      build table ──→ [ publish queue ] ──→ poll(): adopt newest
      drop retired ←─ [ recycle queue ] ←──        retire previous
                                                 next_sample() per sample

Both queues are single-producer / single-consumer ring buffers (rtrb), so
neither side ever blocks.

Ownership
---------

Tables travel as `Arc<EnvelopeTable>`. The controller keeps a clone of the
newest table for snapshots, the player holds the one it is reading. A table
retired by the player is pushed back to the controller, which drops it, so
the last reference always dies on the control thread.

The player only adopts a new table while the recycle queue has room for the
old one. If the controller stops draining, the player keeps reading its
current table instead of freeing memory itself.

Cursor
------

On adoption the cursor is remapped modulo the new length, same as a resize
on `EnvelopeTrack`. No read ever sees a partially built table.
*/

/// Control-thread half: validates parameters, builds and publishes tables.
pub struct TrackController {
    layout: Option<SegmentLayout>,
    curves: CurvePair,
    sample_rate: f32,
    current: Arc<EnvelopeTable>,
    pending: bool,
    tx: Producer<Arc<EnvelopeTable>>,
    recycle_rx: Consumer<Arc<EnvelopeTable>>,
}

/// Render-thread half: reads the adopted table sample by sample.
pub struct TrackPlayer {
    table: Arc<EnvelopeTable>,
    cursor: usize,
    rx: Consumer<Arc<EnvelopeTable>>,
    recycle_tx: Producer<Arc<EnvelopeTable>>,
}

/// Create a connected controller/player pair.
///
/// `capacity` is the number of tables that can be in flight before the
/// render thread picks them up. Both start with the silent one-slot table.
pub fn track_handoff(sample_rate: f32, capacity: usize) -> (TrackController, TrackPlayer) {
    let capacity = capacity.max(1);
    let (tx, rx) = RingBuffer::new(capacity);
    let (recycle_tx, recycle_rx) = RingBuffer::new(capacity + 1);
    let silent = Arc::new(EnvelopeTable::silent());

    let controller = TrackController {
        layout: None,
        curves: CurvePair::default(),
        sample_rate,
        current: Arc::clone(&silent),
        pending: false,
        tx,
        recycle_rx,
    };
    let player = TrackPlayer {
        table: silent,
        cursor: 0,
        rx,
        recycle_tx,
    };
    (controller, player)
}

impl TrackController {
    /// Validate, build and publish a table for new parameters.
    ///
    /// Identical parameters are a no-op unless a previous publish is still
    /// pending. Invalid input is rejected and nothing is published.
    pub fn update(
        &mut self,
        depth: f32,
        cycle_seconds: f32,
        peak_seconds: f32,
        curves: CurvePair,
    ) -> Result<(), Error> {
        let layout = SegmentLayout::new(depth, cycle_seconds, peak_seconds, self.sample_rate)
            .inspect_err(|err| log::warn!("rejected envelope parameters: {err}"))?;

        if self.layout == Some(layout) && self.curves == curves {
            return self.flush();
        }
        self.rebuild(layout, curves)
    }

    /// Host parameters for this channel, clamped and converted.
    pub fn apply(&mut self, params: &ChannelParams) -> Result<(), Error> {
        let params = params.clamped();
        let shape = params.shape();
        self.update(
            shape.depth,
            shape.cycle_seconds,
            shape.peak_seconds,
            params.curves(),
        )
    }

    /// Rebuild the current cycle at a new sample rate.
    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), Error> {
        let layout = match &self.layout {
            Some(layout) => Some(layout.with_sample_rate(sample_rate)?),
            None if sample_rate.is_finite() && sample_rate > 0.0 => None,
            None => {
                return Err(Error::InvalidParameter(format!(
                    "sample rate must be positive, got {sample_rate}"
                )))
            }
        };
        self.sample_rate = sample_rate;
        match layout {
            Some(layout) => self.rebuild(layout, self.curves),
            None => Ok(()),
        }
    }

    /// Retry a publish that failed with [`Error::QueueFull`].
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.pending {
            self.publish()
        } else {
            Ok(())
        }
    }

    /// Drop tables the player has retired. Returns how many were released.
    pub fn collect(&mut self) -> usize {
        let mut released = 0;
        while let Ok(table) = self.recycle_rx.pop() {
            drop(table);
            released += 1;
        }
        released
    }

    /// Newest built table, published or not.
    pub fn snapshot(&self) -> Arc<EnvelopeTable> {
        Arc::clone(&self.current)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn layout(&self) -> Option<&SegmentLayout> {
        self.layout.as_ref()
    }

    fn rebuild(&mut self, layout: SegmentLayout, curves: CurvePair) -> Result<(), Error> {
        log::debug!(
            "building {} sample table ({:?}/{:?}, peak at {})",
            layout.len(),
            curves.first,
            curves.second,
            layout.peak_sample()
        );
        self.current = Arc::new(layout.build(curves));
        self.layout = Some(layout);
        self.curves = curves;
        self.publish()
    }

    fn publish(&mut self) -> Result<(), Error> {
        self.collect();
        match self.tx.push(Arc::clone(&self.current)) {
            Ok(()) => {
                self.pending = false;
                Ok(())
            }
            Err(_) => {
                log::warn!("envelope handoff queue full, table stays pending");
                self.pending = true;
                Err(Error::QueueFull)
            }
        }
    }
}

impl TrackPlayer {
    /// Adopt the newest published table. Call once per block.
    ///
    /// Returns `true` if the table changed. Never allocates or frees.
    pub fn poll(&mut self) -> bool {
        let mut swapped = false;
        while self.recycle_tx.slots() > 0 {
            let Ok(table) = self.rx.pop() else {
                break;
            };
            let retired = mem::replace(&mut self.table, table);
            // a slot was checked above and this is the only producer
            let _ = self.recycle_tx.push(retired);
            swapped = true;
        }
        if swapped {
            self.cursor %= self.table.len();
        }
        swapped
    }

    /// Table value at the cursor, then advance the cursor by one slot.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let samples = self.table.samples();
        let value = samples[self.cursor];
        self.cursor += 1;
        if self.cursor >= samples.len() {
            self.cursor = 0;
        }
        value
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
        self.table.get(index)
    }

    pub fn table(&self) -> &EnvelopeTable {
        &self.table
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
