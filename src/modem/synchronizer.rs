//! Symbol Clock / Synchronizer — the decoder's state machine
//!
//! Infers the symbol period from the stream's first half-cycle, gates
//! samples into the Fourier correlator exactly `sample_count` at a time,
//! recognizes the start-of-data marker, tracks clock drift across symbols,
//! and recognizes the terminating zero byte.

use crate::domain::{ConditionedSample, RawSample, SymbolWord, START_MARKER};
use crate::dsp::correlator::{FourierAccumulator, MIN_SAMPLE_COUNT};
use crate::modem::conditioner::{Conditioner, ConditionerOutput};

/// Decoder lifecycle state. `Eof` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Init,
    DetectPolarity,
    DetectWaveFirstHalf,
    DetectWaveSecondHalf,
    DetectCalibrate,
    DecodeData,
    Eof,
}

/// What one call to [`Synchronizer::feed`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// More samples are required before a symbol completes.
    NoData,
    /// Terminal zero byte received in the data phase.
    Eof,
    /// A data byte was decoded (sync bit, if set, already stripped).
    Byte(u8),
}

pub struct Synchronizer {
    state: DecoderState,
    conditioner: Conditioner,
    accumulator: FourierAccumulator,

    /// Samples-per-symbol estimate, seeded during wave detection and
    /// refined by the clock-drift rule thereafter.
    sample_count: usize,

    /// Previous sample seen, used for midpoint-crossing detection.
    prev_sample: RawSample,

    /// Phase history: `phase` is this symbol's correction, `phase2`/
    /// `phase3` the previous two.
    phase: i64,
    phase2: i64,
    phase3: i64,

    /// Countdown of incoming samples to discard before resuming Fourier
    /// accumulation (late-close realignment).
    skip_remaining: usize,

    /// Pending early-close realignment: the last `fsample` fed into the
    /// just-completed symbol, fed again as the first sample of the next.
    pending_resubmit: Option<ConditionedSample>,

    /// The most recent conditioned sample fed into the accumulator —
    /// tracked so `pending_resubmit` can be populated when a symbol
    /// closes early.
    last_fsample: ConditionedSample,
}

impl Synchronizer {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Init,
            conditioner: Conditioner::new(),
            accumulator: FourierAccumulator::new(MIN_SAMPLE_COUNT),
            sample_count: 0,
            prev_sample: 0,
            phase: 0,
            phase2: 0,
            phase3: 0,
            skip_remaining: 0,
            pending_resubmit: None,
            last_fsample: 0.0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Current samples-per-symbol estimate.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Feed one raw sample, advancing the state machine.
    pub fn feed(&mut self, raw: RawSample) -> DecodeOutcome {
        match self.state {
            DecoderState::Eof => DecodeOutcome::Eof,
            DecoderState::Init => {
                self.conditioner.init(raw);
                self.state = DecoderState::DetectPolarity;
                self.sample_count = 0;
                DecodeOutcome::NoData
            }
            DecoderState::DetectPolarity => {
                match self.conditioner.feed(raw) {
                    ConditionerOutput::NotReady => DecodeOutcome::NoData,
                    ConditionerOutput::PolarityCommitted => {
                        log::trace!("polarity committed: positive={}", self.conditioner.polarity());
                        // Fallthrough: this same sample is also the first
                        // sample of first-half-wave tracking.
                        self.state = DecoderState::DetectWaveFirstHalf;
                        self.sample_count = 1;
                        self.prev_sample = raw;
                        DecodeOutcome::NoData
                    }
                    _ => unreachable!("conditioner not yet calibrated"),
                }
            }
            DecoderState::DetectWaveFirstHalf => {
                self.conditioner.feed(raw);
                self.sample_count += 1;

                let extremum = if self.conditioner.polarity() {
                    self.conditioner.signal_max()
                } else {
                    self.conditioner.signal_min()
                };
                let full_range = self.conditioner.signal_max() - self.conditioner.signal_min();
                let distance = (extremum - raw).abs();

                if distance > full_range {
                    self.state = DecoderState::DetectWaveSecondHalf;
                }
                self.prev_sample = raw;
                DecodeOutcome::NoData
            }
            DecoderState::DetectWaveSecondHalf => {
                self.conditioner.feed(raw);
                self.sample_count += 1;

                let midpoint =
                    (self.conditioner.signal_max() + self.conditioner.signal_min()) as f64 / 2.0;
                let crossed = if self.conditioner.polarity() {
                    (self.prev_sample as f64) < midpoint && (raw as f64) >= midpoint
                } else {
                    (self.prev_sample as f64) > midpoint && (raw as f64) <= midpoint
                };
                self.prev_sample = raw;

                if crossed {
                    self.enter_calibrate();
                }
                DecodeOutcome::NoData
            }
            DecoderState::DetectCalibrate | DecoderState::DecodeData => {
                self.feed_calibrated(raw)
            }
        }
    }

    fn enter_calibrate(&mut self) {
        if self.sample_count < MIN_SAMPLE_COUNT {
            self.sample_count = MIN_SAMPLE_COUNT;
        }
        log::debug!("calibration seeded sample_count={}", self.sample_count);
        self.conditioner.commit_calibration();
        self.accumulator = FourierAccumulator::new(self.sample_count);
        self.state = DecoderState::DetectCalibrate;
    }

    fn feed_calibrated(&mut self, raw: RawSample) -> DecodeOutcome {
        let fsample = match self.conditioner.feed(raw) {
            ConditionerOutput::Sample(v) => v,
            _ => unreachable!("conditioner calibrated but didn't normalize"),
        };

        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            return DecodeOutcome::NoData;
        }

        if let Some(old_fsample) = self.pending_resubmit.take() {
            // Early-close realignment: feed the prior symbol's last sample
            // again before the real one. If this duplicate feed itself
            // completes a symbol, that completion is discarded rather than
            // processed — only the accumulator invariant is housekept.
            self.last_fsample = old_fsample;
            if self.accumulator.add_sample(old_fsample) {
                self.accumulator.reset();
            }
        }

        self.last_fsample = fsample;
        if self.accumulator.add_sample(fsample) {
            self.handle_symbol_complete()
        } else {
            DecodeOutcome::NoData
        }
    }

    fn handle_symbol_complete(&mut self) -> DecodeOutcome {
        let word = self.accumulator.decode_word();
        let sw = SymbolWord::new(word);
        let phase_f1 = self.accumulator.phase_f1();
        self.accumulator.reset();

        let mut new_phase = (phase_f1 * self.sample_count as f64).round() as i64;
        if !sw.has_sync() {
            new_phase = 0;
        }

        let outcome = match self.state {
            DecoderState::DetectCalibrate => {
                if sw.is_zero() {
                    log::debug!("false-positive restart during calibration");
                    self.reset_to_init();
                    return DecodeOutcome::NoData;
                } else if sw.has_sync() && sw.data_byte() == START_MARKER {
                    log::debug!("start marker found, entering data phase");
                    self.state = DecoderState::DecodeData;
                    DecodeOutcome::NoData
                } else {
                    DecodeOutcome::NoData
                }
            }
            DecoderState::DecodeData => {
                if sw.is_zero() {
                    log::debug!("terminator byte received, stream complete");
                    self.state = DecoderState::Eof;
                    DecodeOutcome::Eof
                } else {
                    DecodeOutcome::Byte(sw.data_byte())
                }
            }
            _ => DecodeOutcome::NoData,
        };

        // Clock drift rule and intra-symbol realignment setup — skipped
        // if the false-positive path above already reset to Init.
        if self.state != DecoderState::Init {
            self.phase3 = self.phase2;
            self.phase2 = self.phase;
            self.phase = new_phase;

            let same_sign = self.phase != 0
                && self.phase2 != 0
                && self.phase3 != 0
                && self.phase.signum() == self.phase2.signum()
                && self.phase.signum() == self.phase3.signum();

            if same_sign {
                let correction = ((self.phase + self.phase2 + self.phase3) as f64 / 3.0).round() as i64;
                self.sample_count = (self.sample_count as i64 - correction).max(MIN_SAMPLE_COUNT as i64) as usize;
                self.accumulator.set_sample_count(self.sample_count);
                self.phase2 = 0;
                log::debug!("bulk drift correction applied, sample_count={}", self.sample_count);
            }

            if self.phase < 0 {
                self.skip_remaining = (-self.phase) as usize;
            } else if self.phase > 0 {
                self.pending_resubmit = Some(self.last_fsample);
            }
        }

        outcome
    }

    fn reset_to_init(&mut self) {
        *self = Synchronizer::new();
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_init_state() {
        let sync = Synchronizer::new();
        assert_eq!(sync.state(), DecoderState::Init);
    }

    #[test]
    fn first_sample_moves_to_detect_polarity() {
        let mut sync = Synchronizer::new();
        assert_eq!(sync.feed(512), DecodeOutcome::NoData);
        assert_eq!(sync.state(), DecoderState::DetectPolarity);
    }

    #[test]
    fn small_wobble_stays_in_detect_polarity() {
        let mut sync = Synchronizer::new();
        sync.feed(512);
        sync.feed(520); // diff = 8, well under threshold
        assert_eq!(sync.state(), DecoderState::DetectPolarity);
    }

    #[test]
    fn large_excursion_commits_and_falls_through() {
        let mut sync = Synchronizer::new();
        sync.feed(512);
        sync.feed(700); // diff = 188 > 64
        assert_eq!(sync.state(), DecoderState::DetectWaveFirstHalf);
        assert_eq!(sync.sample_count(), 1);
    }

    #[test]
    fn eof_is_sticky() {
        let mut sync = Synchronizer::new();
        // Force into Eof directly by manipulating via the public surface:
        // drive a full, tiny synthetic stream below to reach Eof naturally
        // is covered in decoder-level tests; here we just check the guard.
        sync.state = DecoderState::Eof;
        assert_eq!(sync.feed(0), DecodeOutcome::Eof);
        assert_eq!(sync.feed(12345), DecodeOutcome::Eof);
    }
}
