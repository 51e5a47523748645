//! Decoder — the top-level entry point tying the Signal Conditioner, the
//! Symbol Clock, and the Fourier Correlator into one pipeline.
//!
//! Pipeline: raw samples → [`crate::modem::conditioner::Conditioner`] →
//! [`crate::modem::synchronizer::Synchronizer`] (which owns the
//! [`crate::dsp::correlator::FourierAccumulator`]) → decoded bytes.

use crate::domain::{pcm_i32_to_raw, RawSample};
use crate::modem::synchronizer::{DecodeOutcome, DecoderState, Synchronizer};

/// Decodes a raw sample stream into bytes.
pub struct Decoder {
    sync: Synchronizer,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            sync: Synchronizer::new(),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.sync.state()
    }

    /// Feed one raw (conditioner-scale) sample.
    pub fn decode(&mut self, raw: RawSample) -> DecodeOutcome {
        self.sync.feed(raw)
    }

    /// Feed one signed 32-bit PCM sample, converting to the conditioner's
    /// raw scale first.
    pub fn decode_pcm_i32(&mut self, sample: i32) -> DecodeOutcome {
        self.sync.feed(pcm_i32_to_raw(sample))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
