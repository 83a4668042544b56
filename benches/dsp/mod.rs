//! Benchmarks for single-channel primitives.

mod curve;
mod track;

pub use curve::bench_curve;
pub use track::{bench_rebuild, bench_track};
