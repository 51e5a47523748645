//! Domain error types

use thiserror::Error;

/// Errors that can occur in the modem CLI tools.
///
/// The decoder's internal state machine never raises an error: malformed
/// input degrades to `NoData`, garbage bytes, or an eventual `Eof`. The
/// only fallible boundary in this crate is I/O.
#[derive(Error, Debug)]
pub enum ModemError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for modem CLI operations.
pub type ModemResult<T> = Result<T, ModemError>;
