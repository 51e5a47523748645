//! `encode` — read a byte stream on stdin, write it as a PCM sample
//! stream on stdout, modulated the way [`decode`](../decode) expects.
//!
//! Output: little-endian signed 32-bit PCM samples, one channel. Set
//! `RUST_LOG` to enable logging (e.g. `RUST_LOG=debug`). Tunable
//! parameters can be overridden via `D2S2D_SAMPLES_PER_SYMBOL`,
//! `D2S2D_SYNC_AMPLITUDE`, and `D2S2D_DATA_AMPLITUDE` without recompiling.

use std::io::{self, Read, Write};

use d2s2d_lib::domain::{raw_to_pcm_i32, ModemResult};
use d2s2d_lib::modem::encoder::{Encoder, EncoderConfig};

fn env_override<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> ModemResult<()> {
    env_logger::init();

    let defaults = EncoderConfig::default();
    let config = EncoderConfig {
        samples_per_symbol: env_override("D2S2D_SAMPLES_PER_SYMBOL", defaults.samples_per_symbol),
        sync_amplitude: env_override("D2S2D_SYNC_AMPLITUDE", defaults.sync_amplitude),
        data_amplitude: env_override("D2S2D_DATA_AMPLITUDE", defaults.data_amplitude),
    };

    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    log::info!("encoding {} bytes with config {:?}", data.len(), config);

    let encoder = Encoder::with_config(config);
    let frame = encoder.encode(&data);

    let stdout = io::stdout();
    let mut output = stdout.lock();
    for raw in frame {
        output.write_all(&raw_to_pcm_i32(raw).to_le_bytes())?;
    }
    output.flush()?;
    Ok(())
}
