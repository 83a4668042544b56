//! Simulated render thread.
//!
//! Stands in for an audio callback: a test tone is rendered block by block at
//! wall-clock pace, multiplied by the envelope through [`WavePlayer`], and a
//! decimated copy of the output goes to the UI. Nothing in the loop allocates.

use std::{
    f32::consts::TAU,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use rtrb::{Consumer, Producer};
use wavegain::{engine::WavePlayer, MAX_BLOCK_SIZE};

use crate::ui::state::{ControlMessage, OutputFrame};

/// Frames per simulated callback.
pub const BLOCK_SIZE: usize = 256;
/// Every n-th output frame is sent to the scope.
pub const SCOPE_DECIMATION: usize = 64;

const TONE_HZ: f32 = 110.0;

/// Handle to the running render thread. Stops the thread when dropped.
pub struct RenderThread {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    pub fn spawn(
        mut player: WavePlayer,
        sample_rate: f32,
        mut control_rx: Consumer<ControlMessage>,
        mut output_tx: Producer<OutputFrame>,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = running.clone();

        let handle = thread::spawn(move || {
            let block = BLOCK_SIZE.min(MAX_BLOCK_SIZE);
            let block_duration = Duration::from_secs_f32(block as f32 / sample_rate);
            let mut left = [0.0f32; BLOCK_SIZE];
            let mut right = [0.0f32; BLOCK_SIZE];
            let mut phase = 0.0f32;
            let mut playing = true;
            let mut frame_count = 0usize;
            let mut deadline = Instant::now();

            while thread_running.load(Ordering::Relaxed) {
                while let Ok(message) = control_rx.pop() {
                    match message {
                        ControlMessage::TogglePlayback => playing = !playing,
                        ControlMessage::Reset => player.reset(),
                    }
                }

                if playing {
                    player.poll();

                    for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                        let tone = (phase * TAU).sin() * 0.5;
                        phase = (phase + TONE_HZ / sample_rate).fract();
                        *l = tone;
                        *r = tone;
                    }
                    // both slices are BLOCK_SIZE long and the player has two channels
                    let _ = player.process_block(&mut [&mut left[..block], &mut right[..block]]);

                    for (l, r) in left.iter().zip(right.iter()) {
                        if frame_count % SCOPE_DECIMATION == 0 {
                            // UI falling behind only thins the scope
                            let _ = output_tx.push(OutputFrame {
                                left: *l,
                                right: *r,
                            });
                        }
                        frame_count = frame_count.wrapping_add(1);
                    }
                }

                deadline += block_duration;
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                } else {
                    deadline = now;
                }
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
