//! Benchmarks for full stereo processing.

mod stereo;

pub use stereo::bench_stereo;
