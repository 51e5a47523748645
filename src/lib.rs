//! A software modem that transmits a byte stream as a sum-of-sinusoids
//! audio waveform and decodes it back.
//!
//! ## Modules
//!
//! - `domain/` — Pure domain types, no I/O dependencies
//! - `dsp/` — Digital signal processing (the Fourier Correlator)
//! - `modem/` — The Signal Conditioner, Symbol Clock/Synchronizer, and
//!   the encoder/decoder built from them

pub mod domain;
pub mod dsp;
pub mod modem;
