//! # triviacraft-gen
//!
//! The content requester: turns a topic into a [`TriviaItem`] with a single
//! call to a text generation endpoint.
//!
//! ## Core Concepts
//! - **Prompt**: fixed template with one topic slot
//! - **Provider**: trait-based access to the generation endpoint (Gemini)
//! - **Fences**: markdown code fences are stripped before decoding
//! - **Settings**: defaults, optional TOML file, environment overrides

pub mod config;
pub mod error;
pub mod fence;
pub mod prompt;
pub mod provider;
pub mod requester;
pub mod trivia;

pub use config::Settings;
pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use fence::strip_code_fences;
pub use prompt::trivia_prompt;
pub use provider::{AuthMode, GeminiProvider, GenerationProvider, ProviderConfig};
pub use requester::{parse_trivia, TriviaRequester};
pub use trivia::TriviaItem;
