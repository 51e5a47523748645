//! Encoder — renders a byte stream as the sinusoid-sum waveform the
//! decoder expects.
//!
//! Mirrors the decoder's wire format exactly: preamble, calibration tone,
//! start marker, data bytes, trailer, all built from the same per-bit
//! frequency assignment the Fourier correlator decodes against.

use std::f64::consts::PI;

use crate::domain::{RawSample, SymbolWord, START_MARKER};
use crate::dsp::correlator::FREQUENCY_COUNT;

/// Samples per symbol. Matches the decoder's minimum seed and the
/// amplitude calibration baked into the correlator.
pub const SAMPLE_COUNT: usize = 20;

pub const PREAMBLE_SYMBOLS: usize = 2;
pub const SYNC_SYMBOLS: usize = 8;
pub const TRAILER_SYMBOLS: usize = 2;

/// Raw-scale DC offset and peak swing the synthesized waveform rides on.
/// Chosen comfortably above the conditioner's polarity threshold.
const BASELINE: RawSample = 512;
const HALF_RANGE: f64 = 500.0;

/// Tunable encoder parameters, overridable without recompiling (see the
/// `encode` binary, which reads these from the environment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConfig {
    pub samples_per_symbol: usize,
    pub sync_amplitude: f64,
    pub data_amplitude: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            samples_per_symbol: SAMPLE_COUNT,
            sync_amplitude: 1.0,
            data_amplitude: 0.16,
        }
    }
}

pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            config: EncoderConfig::default(),
        }
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn with_sample_count(samples_per_symbol: usize) -> Self {
        Self {
            config: EncoderConfig {
                samples_per_symbol,
                ..EncoderConfig::default()
            },
        }
    }

    /// Render a full frame: preamble, sync tones, start marker, data
    /// bytes, trailer — as raw-scale samples ready for the decoder.
    pub fn encode(&self, data: &[u8]) -> Vec<RawSample> {
        let mut out = Vec::with_capacity(self.config.samples_per_symbol * (data.len() + 13));

        for _ in 0..PREAMBLE_SYMBOLS {
            out.extend(self.symbol(0, 0.0));
        }
        for _ in 0..SYNC_SYMBOLS {
            out.extend(self.symbol(SymbolWord::SYNC_BIT, self.config.sync_amplitude));
        }
        out.extend(self.symbol(
            SymbolWord::SYNC_BIT | START_MARKER as u16,
            self.config.data_amplitude,
        ));
        for &byte in data {
            out.extend(self.symbol(SymbolWord::SYNC_BIT | byte as u16, self.config.data_amplitude));
        }
        for _ in 0..TRAILER_SYMBOLS {
            out.extend(self.symbol(0, 0.0));
        }

        out
    }

    fn symbol(&self, word: u16, amplitude: f64) -> Vec<RawSample> {
        let n = self.config.samples_per_symbol;
        (0..n)
            .map(|i| {
                let mut composite = 0.0;
                for k in 0..FREQUENCY_COUNT {
                    if word & (1 << k) != 0 {
                        let f = (FREQUENCY_COUNT - k) as f64;
                        composite += (2.0 * PI * f * i as f64 / n as f64).sin();
                    }
                }
                let fsample = (0.5 + composite * amplitude * 0.5).clamp(0.0, 1.0);
                BASELINE + ((fsample - 0.5) * 2.0 * HALF_RANGE).round() as RawSample
            })
            .collect()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
