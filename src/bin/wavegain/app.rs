//! Wires the controller, the simulated render thread and the TUI together

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use wavegain::engine::{wave_handoff, WaveParams, DEFAULT_QUEUE_CAPACITY};

use crate::{
    render::{RenderThread, BLOCK_SIZE, SCOPE_DECIMATION},
    ui::UiApp,
};

/// Control messages in flight (play/pause, reset)
const CONTROL_QUEUE_SIZE: usize = 16;

pub fn run(sample_rate: f32) -> EyreResult<()> {
    let (mut controller, player) = wave_handoff(2, sample_rate, DEFAULT_QUEUE_CAPACITY)
        .wrap_err("failed to set up the envelope handoff")?;
    let params = WaveParams::default();
    controller
        .apply(&params)
        .wrap_err("failed to apply default parameters")?;

    // room for a few seconds of decimated output
    let scope_capacity = (sample_rate as usize / SCOPE_DECIMATION).max(BLOCK_SIZE) * 4;
    let (output_tx, output_rx) = RingBuffer::new(scope_capacity);
    let (control_tx, control_rx) = RingBuffer::new(CONTROL_QUEUE_SIZE);

    let render = RenderThread::spawn(player, sample_rate, control_rx, output_tx);

    let mut app = UiApp::new(controller, params, output_rx, control_tx);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    drop(render);
    result
}
