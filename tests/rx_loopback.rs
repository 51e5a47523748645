//! Integration tests: encoder → decoder loopback over the raw sample
//! stream, covering the documented scenario set end to end.

use d2s2d_lib::domain::RawSample;
use d2s2d_lib::modem::decoder::Decoder;
use d2s2d_lib::modem::encoder::Encoder;
use d2s2d_lib::modem::synchronizer::{DecodeOutcome, DecoderState};

fn decode_all(frame: &[RawSample]) -> (Vec<u8>, DecoderState) {
    let mut dec = Decoder::new();
    let mut out = Vec::new();
    let mut reached_eof = false;
    for &raw in frame {
        match dec.decode(raw) {
            DecodeOutcome::Byte(b) => out.push(b),
            DecodeOutcome::Eof => {
                reached_eof = true;
                break;
            }
            DecodeOutcome::NoData => {}
        }
    }
    let state = if reached_eof {
        DecoderState::Eof
    } else {
        dec.state()
    };
    (out, state)
}

#[test]
fn s1_empty_message_terminates_cleanly() {
    let frame = Encoder::new().encode(b"");
    let (bytes, state) = decode_all(&frame);
    assert!(bytes.is_empty());
    assert_eq!(state, DecoderState::Eof);
}

#[test]
fn s2_short_message_recovers_exact_bytes() {
    let frame = Encoder::new().encode(b"Hi");
    let (bytes, _) = decode_all(&frame);
    assert_eq!(bytes, b"Hi");
}

#[test]
fn s3_truncated_trailer_still_yields_partial_data() {
    let mut frame = Encoder::new().encode(b"A");
    // Drop the trailing zero symbols — decoder should have already
    // emitted 'A' and simply sit waiting for more input, not crash.
    let sample_count = d2s2d_lib::modem::encoder::SAMPLE_COUNT;
    frame.truncate(frame.len() - 2 * sample_count);

    let mut dec = Decoder::new();
    let mut bytes = Vec::new();
    for &raw in &frame {
        if let DecodeOutcome::Byte(b) = dec.decode(raw) {
            bytes.push(b);
        }
    }
    assert_eq!(bytes, b"A");
    assert_eq!(dec.state(), DecoderState::DecodeData);
}

#[test]
fn s4_all_nonzero_byte_values_round_trip() {
    let data: Vec<u8> = (1u16..=255).map(|b| b as u8).collect();
    let frame = Encoder::new().encode(&data);
    let (bytes, _) = decode_all(&frame);
    assert_eq!(bytes, data);
}

#[test]
fn s5_uniform_noise_never_settles_into_data_phase() {
    // A bounded linear-congruential generator stands in for "uniform
    // random samples, no signal" without relying on a random crate.
    let mut state: u64 = 0x1234_5678_9abc_def0;
    let mut dec = Decoder::new();
    let mut max_consecutive_calibrate = 0usize;
    let mut consecutive = 0usize;

    for _ in 0..20_000 {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let raw = ((state >> 40) % 1024) as RawSample;
        dec.decode(raw);

        if dec.state() == DecoderState::DetectCalibrate {
            consecutive += 1;
            max_consecutive_calibrate = max_consecutive_calibrate.max(consecutive);
        } else {
            consecutive = 0;
        }

        assert_ne!(
            dec.state(),
            DecoderState::DecodeData,
            "noise must never be mistaken for a valid start marker"
        );
    }

    // Calibration may be entered spuriously, but the false-positive
    // restart rule must keep kicking it back to Init — it should never
    // wedge in DetectCalibrate for an unbounded number of symbols.
    let sample_count = d2s2d_lib::modem::encoder::SAMPLE_COUNT;
    assert!(
        max_consecutive_calibrate < sample_count * 50,
        "calibration state never restarted: stuck for {max_consecutive_calibrate} samples"
    );
}

#[test]
fn s6_fast_clock_still_decodes_via_drift_correction() {
    // Encoder runs 5% faster than the nominal 20 samples/symbol.
    let frame = Encoder::with_sample_count(21).encode(b"A");
    let (bytes, _) = decode_all(&frame);
    assert_eq!(bytes, b"A");
}
