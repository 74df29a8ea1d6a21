//! Error types for the content requester
//!
//! Re-exports triviacraft-error so downstream crates need a single import.

pub use triviacraft_error::{Error, ErrorKind, ErrorStatus, Result};
