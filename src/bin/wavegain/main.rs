//! wavegain - terminal preview of the stereo envelope engine
//!
//! Run with: cargo run -- [--print] [--sample-rate 44100] [--log-level debug]

mod app;
mod render;
mod ui;

use arg::{parse_args, Args};
use color_eyre::eyre::{eyre, Result as EyreResult};

use wavegain::{
    dsp::CurveKind,
    engine::{ChannelMode, ChannelParams, WaveParams, Waves},
};

const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

const DEFAULT_LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Warn
};

/// Program arguments.
#[derive(Args, Debug)]
struct Arguments {
    #[arg(short = "p", long = "print")]
    /// Print a table summary for every curve pair instead of starting the TUI.
    print: bool,
    #[arg(short = "r", long = "sample-rate")]
    /// Sample rate in Hz (default: 48000)
    sample_rate: Option<f32>,
    #[arg(short = "l", long = "log-level")]
    /// Set logging level to \"debug\", \"info\", \"warn\" or \"error\".
    /// Only used together with --print.
    log_level: Option<log::Level>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let args = parse_args::<Arguments>();
    let sample_rate = args.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);

    if args.print {
        // the TUI owns the terminal, so only log in print mode
        simple_logger::SimpleLogger::new()
            .with_level(args.log_level.unwrap_or(DEFAULT_LOG_LEVEL).to_level_filter())
            .init()
            .map_err(|err| eyre!("failed to set logger: {err}"))?;
        return print_summary(sample_rate);
    }

    app::run(sample_rate)
}

/// Number of coarse points printed per table.
const PROFILE_POINTS: usize = 16;

fn print_summary(sample_rate: f32) -> EyreResult<()> {
    println!("=== wavegain ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!();

    let mut waves = Waves::new(2, sample_rate);
    for first in CurveKind::ALL {
        for second in CurveKind::ALL {
            let params = WaveParams {
                left: ChannelParams {
                    depth_db: 12.0,
                    first,
                    second,
                    ..Default::default()
                },
                right: ChannelParams {
                    depth_db: -12.0,
                    first,
                    second,
                    ..Default::default()
                },
                mode: ChannelMode::Stereo,
            };
            waves.apply(&params)?;

            println!("{} -> {}", first.name(), second.name());
            for channel in 0..waves.num_channels() {
                let track = waves.track(channel)?;
                let table = track.snapshot();
                let (min, max) = table
                    .iter()
                    .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
                let profile: Vec<String> = (0..PROFILE_POINTS)
                    .map(|i| format!("{:.2}", track.get(i * table.len() / PROFILE_POINTS)))
                    .collect();

                println!(
                    "  ch{channel}: {} samples, peak @ {}, range {:.3}..{:.3}",
                    table.len(),
                    track.peak_sample(),
                    min,
                    max
                );
                println!("       [{}]", profile.join(" "));
            }
            println!();
        }
    }

    Ok(())
}
