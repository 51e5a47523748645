//! Digital Signal Processing
//!
//! Pure functions for signal processing. No I/O dependencies.

pub mod correlator;

pub use correlator::FourierAccumulator;
