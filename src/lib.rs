pub mod dsp; // Curve synthesis, table layout and cyclic playback
pub mod engine; // Channels, host parameters and realtime handoff
mod error;

pub use error::Error;

pub const MAX_BLOCK_SIZE: usize = 2048;
