//! # Generation Provider Interface
//!
//! A trait-based abstraction over the text generation endpoint.
//!
//! ## Design
//! - `GenerationProvider` trait: one prompt in, one generated text out
//! - `GeminiProvider`: the HTTP implementation against `generateContent`
//! - `ProviderConfig`: endpoint, model, key and how the key is sent

pub mod gemini;

pub use gemini::GeminiProvider;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// ============================================================================
// Provider Trait
// ============================================================================

/// The generation provider trait
#[allow(async_fn_in_trait)]
pub trait GenerationProvider: Send + Sync {
    /// Get the provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Get the model identifier requests are sent to
    fn model(&self) -> &str;

    /// Send `prompt` and return the generated text.
    ///
    /// Exactly one outbound request per call; no retries.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// How the API key travels with the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// `?key=<api key>` on the endpoint URL
    #[default]
    QueryParam,
    /// `x-goog-api-key: <api key>` request header
    Header,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::QueryParam => "query",
            AuthMode::Header => "header",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" | "query_param" | "query-param" => Ok(AuthMode::QueryParam),
            "header" => Ok(AuthMode::Header),
            other => Err(Error::config_invalid(format!(
                "unknown auth mode '{}', expected 'query' or 'header'",
                other
            ))
            .with_context("auth_mode", other)),
        }
    }
}

/// Configuration for creating providers
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub auth_mode: AuthMode,
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: Some(DEFAULT_BASE_URL.into()),
            model: Some(DEFAULT_MODEL.into()),
            auth_mode: AuthMode::QueryParam,
            timeout_secs: None,
        }
    }

    /// Point at a compatible endpoint, e.g. a local proxy or a test server
    pub fn local(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: Some(base_url.into()),
            model: Some(DEFAULT_MODEL.into()),
            auth_mode: AuthMode::QueryParam,
            timeout_secs: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

// the key never reaches logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("auth_mode", &self.auth_mode)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
