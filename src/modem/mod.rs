//! Modem protocol logic
//!
//! Composes the Signal Conditioner, Symbol Clock/Synchronizer, and
//! Fourier Correlator into a decoder, and provides a matching encoder.

pub mod conditioner;
pub mod decoder;
pub mod encoder;
pub mod synchronizer;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use synchronizer::{DecodeOutcome, DecoderState};
