//! Core domain types
//!
//! Pure types with no I/O dependencies. These represent the core concepts
//! of the modem.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
