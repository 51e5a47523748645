//! `decode` — read a raw PCM sample stream on stdin, write decoded bytes
//! to stdout.
//!
//! Input: little-endian signed 32-bit PCM samples, one channel, read until
//! EOF or the modem's own terminator symbol is recognized. Set `RUST_LOG`
//! to enable logging (e.g. `RUST_LOG=debug`).

use std::io::{self, Read, Write};

use d2s2d_lib::domain::ModemResult;
use d2s2d_lib::modem::decoder::Decoder;
use d2s2d_lib::modem::synchronizer::DecodeOutcome;

fn main() -> ModemResult<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let mut decoder = Decoder::new();
    let mut buf = [0u8; 4];

    loop {
        match input.read_exact(&mut buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
        let sample = i32::from_le_bytes(buf);

        match decoder.decode_pcm_i32(sample) {
            DecodeOutcome::Byte(byte) => output.write_all(&[byte])?,
            DecodeOutcome::Eof => break,
            DecodeOutcome::NoData => {}
        }
    }

    output.flush()?;
    Ok(())
}
