//! Shared state types for UI communication
//!
//! Everything crossing the render-thread boundary is `Copy` so pushing it
//! never allocates.

/// Commands sent from UI thread to render thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Toggle play/pause
    TogglePlayback,
    /// Rewind every envelope cursor
    Reset,
}

/// One decimated stereo output frame for the scope
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputFrame {
    pub left: f32,
    pub right: f32,
}

/// Which host parameter the arrow keys adjust
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Depth,
    Speed,
    Peak,
    First,
    Second,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Depth,
        Field::Speed,
        Field::Peak,
        Field::First,
        Field::Second,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Depth => "Depth",
            Field::Speed => "Speed",
            Field::Peak => "Peak Time",
            Field::First => "Curve A",
            Field::Second => "Curve B",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
