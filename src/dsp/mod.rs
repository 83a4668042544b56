//! Low-level envelope-table primitives.
//!
//! Everything here is single-threaded and free of I/O. Reading a table
//! (`EnvelopeTrack::next_sample`) is allocation-free and realtime-safe;
//! building one allocates and belongs on a control thread. The `engine`
//! module layers channel management and the realtime handoff on top.

/// Tempo, time and decibel conversions.
pub mod convert;
/// Linear, sine and Gaussian segment shapes.
pub mod curve;
/// Cycle geometry and finished tables.
pub mod layout;
/// Per-channel table with a cyclic read cursor.
pub mod track;

pub use curve::CurveKind;
pub use layout::{CurvePair, EnvelopeTable, SegmentLayout};
pub use track::EnvelopeTrack;
