//! # triviacraft-error
//!
//! Unified error handling for triviacraft.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g. Transport, MalformedPayload)
//! - **ErrorStatus**: Whether the failure is worth another attempt by the user
//! - **Error Context**: Key-value pairs that locate the cause
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use triviacraft_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::Transport, "service unavailable")
//!         .with_operation("gemini::generate_text")
//!         .with_context("status", "503"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, triviacraft_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, callers only append context
//! - No blanket `From<OtherError>` conversions, so raw errors never leak

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the triviacraft Error
pub type Result<T> = std::result::Result<T, Error>;
