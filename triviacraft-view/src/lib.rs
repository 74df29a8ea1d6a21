//! # triviacraft-view
//!
//! The view controller drives one trivia round at a time:
//! 1. The user types a topic and triggers generate (button or Enter)
//! 2. While the request is pending the generate trigger is disabled
//! 3. On success the question is shown and the answer kept back
//! 4. Reveal shows the answer, reset goes back to setup
//!
//! All view state lives in [`ViewState`]; front ends render it by asking
//! which [`Region`]s are visible.

mod controller;
mod state;

pub use controller::{GenerationTicket, Key, Outcome, ViewController, FAILURE_NOTICE};
pub use state::{Phase, Region, ViewState};
