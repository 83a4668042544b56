use std::{error, fmt};

/// Errors reported by wavegain.
///
/// Only control-rate operations return errors. The per-sample read path is total.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter update was rejected. The previous table stays in place.
    InvalidParameter(String),
    /// A channel index beyond the configured channel count was used.
    ChannelIndexOutOfRange { channel: usize, channels: usize },
    /// The realtime handoff queue has no free slot for a new table.
    QueueFull,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(str) => write!(f, "Invalid parameter: {str}"),
            Self::ChannelIndexOutOfRange { channel, channels } => {
                write!(f, "Channel {channel} out of range (configured: {channels})")
            }
            Self::QueueFull => write!(f, "Envelope handoff queue is full"),
        }
    }
}
