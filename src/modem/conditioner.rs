//! Signal Conditioner — baseline/polarity/dynamic-range tracking
//!
//! Converts raw samples of unknown DC offset, polarity, and amplitude into
//! a normalized `[0, 1]` float with a known, positive-going first half-wave,
//! once enough signal has been observed to calibrate.

use crate::domain::{ConditionedSample, RawSample};

/// `|diff| > POLARITY_THRESHOLD` commits polarity and ends baseline tracking.
const POLARITY_THRESHOLD: RawSample = 64;

/// Conditioner lifecycle stage. Distinct from (but driven in lockstep with)
/// the synchronizer's `DecoderState` — the conditioner only cares whether
/// it has a committed baseline/polarity/range, not about sync bits or data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TrackingBaseline,
    WaitingForRange,
    Calibrated,
}

/// Tracks DC baseline, polarity, and dynamic range; normalizes raw samples.
pub struct Conditioner {
    stage: Stage,
    baseline: RawSample,
    /// `true` = positive-going first half-wave.
    polarity: bool,
    signal_min: RawSample,
    signal_max: RawSample,
}

impl Conditioner {
    pub fn new() -> Self {
        Self {
            stage: Stage::TrackingBaseline,
            baseline: 0,
            polarity: true,
            signal_min: 0,
            signal_max: 0,
        }
    }

    /// Start tracking from the stream's first sample.
    pub fn init(&mut self, first_sample: RawSample) {
        self.stage = Stage::TrackingBaseline;
        self.baseline = first_sample;
    }

    /// Feed one raw sample. Returns the normalized sample once polarity has
    /// been committed and the wave extremes widened past baseline tracking;
    /// `None` while still tracking baseline.
    ///
    /// The returned [`ConditionerOutput`] tells the caller whether this call
    /// just committed polarity — the synchronizer needs this to fall
    /// through into wave-tracking with the *same* sample.
    pub fn feed(&mut self, s: RawSample) -> ConditionerOutput {
        match self.stage {
            Stage::TrackingBaseline => {
                let diff = s - self.baseline;
                if diff.abs() > POLARITY_THRESHOLD {
                    self.polarity = diff > 0;
                    self.signal_min = self.baseline;
                    self.signal_max = self.baseline;
                    self.stage = Stage::WaitingForRange;
                    self.widen_range(s);
                    ConditionerOutput::PolarityCommitted
                } else {
                    // Integer truncation toward zero, preserved deliberately.
                    self.baseline += diff / 8;
                    ConditionerOutput::NotReady
                }
            }
            Stage::WaitingForRange => {
                self.widen_range(s);
                ConditionerOutput::TrackingRange
            }
            Stage::Calibrated => {
                self.widen_range(s);
                ConditionerOutput::Sample(self.normalize(s))
            }
        }
    }

    /// Mark calibration complete; subsequent `feed` calls normalize.
    pub fn commit_calibration(&mut self) {
        self.stage = Stage::Calibrated;
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn signal_min(&self) -> RawSample {
        self.signal_min
    }

    pub fn signal_max(&self) -> RawSample {
        self.signal_max
    }

    /// Normalize a raw sample using the current (never-narrowing) range.
    pub fn normalize(&self, s: RawSample) -> ConditionedSample {
        let range = self.signal_max - self.signal_min;
        let fsample = if range == 0 {
            0.5
        } else {
            (s - self.signal_min) as f64 / range as f64
        };
        if self.polarity {
            fsample
        } else {
            1.0 - fsample
        }
    }

    fn widen_range(&mut self, s: RawSample) {
        self.signal_max = self.signal_max.max(s);
        self.signal_min = self.signal_min.min(s);
    }
}

impl Default for Conditioner {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of feeding one sample into the conditioner.
pub enum ConditionerOutput {
    /// Still accumulating the baseline estimate.
    NotReady,
    /// This call committed polarity; the caller must reprocess the same
    /// sample as the first sample of wave tracking.
    PolarityCommitted,
    /// Tracking the wave's min/max extent, not yet calibrated.
    TrackingRange,
    /// Calibrated: a normalized `[0, 1]` sample.
    Sample(ConditionedSample),
}
