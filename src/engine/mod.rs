//! Channel management and the realtime table handoff.
//!
//! [`Waves`] is the simple, single-threaded engine: updates and reads happen on
//! the same thread. [`wave_handoff`] splits the same work across a control
//! thread ([`WaveController`]) and a render thread ([`WavePlayer`]) so that the
//! render side never allocates or frees.

pub mod params;
pub mod waves;

#[cfg(feature = "rtrb")]
pub mod handoff;
#[cfg(feature = "rtrb")]
pub mod realtime;

pub use params::{ChannelMode, ChannelParams, WaveParams};
pub use waves::Waves;

#[cfg(feature = "rtrb")]
pub use handoff::{track_handoff, TrackController, TrackPlayer};
#[cfg(feature = "rtrb")]
pub use realtime::{wave_handoff, WaveController, WavePlayer, DEFAULT_QUEUE_CAPACITY};
