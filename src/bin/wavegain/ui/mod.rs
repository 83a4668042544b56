//! TUI module for wavegain
//!
//! Shows the live parameter set, the envelope tables and the modulated output.

mod envelope;
mod params;
mod scope;
pub mod state;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use wavegain::{
    dsp::CurveKind,
    engine::{
        params::{DEPTH_DB, PEAK_TIME, SPEED_BPM},
        ChannelMode, ChannelParams, WaveController, WaveParams,
    },
    Error,
};

use envelope::render_envelope;
use params::render_params;
use scope::render_scope;
use state::{ControlMessage, Field, OutputFrame};

/// Scope history length in decimated frames
const SCOPE_BUFFER_SIZE: usize = 1024;

const DEPTH_STEP: f32 = 1.0;
const SPEED_STEP: f32 = 10.0;
const PEAK_STEP: f32 = 0.05;

/// UI application state
pub struct UiApp {
    controller: WaveController,
    params: WaveParams,
    /// Channel the arrow keys edit
    channel: usize,
    field: Field,
    output_rx: Consumer<OutputFrame>,
    control_tx: Producer<ControlMessage>,
    output: Vec<OutputFrame>,
    /// Cached table copies for the envelope chart
    tables: [Vec<f32>; 2],
    status: String,
    playing: bool,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        controller: WaveController,
        params: WaveParams,
        output_rx: Consumer<OutputFrame>,
        control_tx: Producer<ControlMessage>,
    ) -> Self {
        let mut app = Self {
            controller,
            params,
            channel: 0,
            field: Field::default(),
            output_rx,
            control_tx,
            output: vec![OutputFrame::default(); SCOPE_BUFFER_SIZE],
            tables: [Vec::new(), Vec::new()],
            status: String::new(),
            playing: true,
            should_quit: false,
        };
        app.refresh_tables();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if let Err(err) = self.controller.maintain() {
                self.status = err.to_string();
            }
            self.poll_output();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_output(&mut self) {
        while let Ok(frame) = self.output_rx.pop() {
            self.output.push(frame);
        }
        if self.output.len() > SCOPE_BUFFER_SIZE {
            let excess = self.output.len() - SCOPE_BUFFER_SIZE;
            self.output.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.control_tx.push(ControlMessage::TogglePlayback).is_ok() {
                    self.playing = !self.playing;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = self.control_tx.push(ControlMessage::Reset);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.params.mode = match self.params.mode {
                    ChannelMode::Mono => ChannelMode::Stereo,
                    ChannelMode::Stereo => ChannelMode::Mono,
                };
                self.channel = 0;
                self.apply();
            }
            KeyCode::Tab => {
                if self.params.mode == ChannelMode::Stereo {
                    self.channel = (self.channel + 1) % 2;
                }
            }
            KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Down => self.field = self.field.next(),
            KeyCode::Left => self.adjust(-1.0),
            KeyCode::Right => self.adjust(1.0),
            _ => {}
        }
    }

    fn adjust(&mut self, direction: f32) {
        let field = self.field;
        let params = self.selected_params();
        match field {
            Field::Depth => params.depth_db = DEPTH_DB.clamp(params.depth_db + direction * DEPTH_STEP),
            Field::Speed => params.speed_bpm = SPEED_BPM.clamp(params.speed_bpm + direction * SPEED_STEP),
            Field::Peak => {
                params.peak_fraction = PEAK_TIME.clamp(params.peak_fraction + direction * PEAK_STEP)
            }
            Field::First => params.first = cycle_curve(params.first, direction),
            Field::Second => params.second = cycle_curve(params.second, direction),
        }
        self.apply();
    }

    fn selected_params(&mut self) -> &mut ChannelParams {
        if self.channel == 0 {
            &mut self.params.left
        } else {
            &mut self.params.right
        }
    }

    fn apply(&mut self) {
        self.status = match self.controller.apply(&self.params) {
            Ok(()) => String::new(),
            // retried by maintain() on the next frame
            Err(Error::QueueFull) => "update queued".to_string(),
            Err(err) => err.to_string(),
        };
        self.refresh_tables();
    }

    fn refresh_tables(&mut self) {
        for (channel, table) in self.tables.iter_mut().enumerate() {
            if let Ok(snapshot) = self.controller.snapshot(channel) {
                table.clear();
                table.extend_from_slice(snapshot.samples());
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // params, envelope, output scope, status, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(8),
                Constraint::Length(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_params(frame, chunks[0], &self.params, self.channel, self.field);
        render_envelope(frame, chunks[1], &self.tables[0], &self.tables[1]);
        render_scope(frame, chunks[2], &self.output);

        let status = if self.playing {
            format!(" ▶ Playing  {}", self.status)
        } else {
            format!(" ⏸ Paused  {}", self.status)
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Green)),
            chunks[3],
        );

        let help = Paragraph::new(
            " [Q] Quit  [↑↓] Field  [←→] Adjust  [Tab] Channel  [M] Mono/Stereo  [Space] Play/Pause  [R] Reset",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}

fn cycle_curve(kind: CurveKind, direction: f32) -> CurveKind {
    let all = CurveKind::ALL;
    let index = all.iter().position(|k| *k == kind).unwrap_or(0);
    let next = if direction > 0.0 {
        (index + 1) % all.len()
    } else {
        (index + all.len() - 1) % all.len()
    };
    all[next]
}
