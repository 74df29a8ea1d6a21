//! Gemini provider implementation
//!
//! Talks to `POST {base_url}/models/{model}:generateContent`.

use super::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPERATION: &str = "gemini::generate_text";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            Error::config_invalid("failed to create HTTP client")
                .with_operation("gemini::new")
                .set_source(e)
        })?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), self.model())
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        self.config.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let mut req = self.client.post(self.endpoint()).json(&body);

        if let Some(api_key) = self.api_key() {
            req = match self.config.auth_mode {
                AuthMode::QueryParam => req.query(&[("key", api_key)]),
                AuthMode::Header => req.header(API_KEY_HEADER, api_key),
            };
        }

        tracing::debug!(
            model = self.model(),
            auth_mode = %self.config.auth_mode,
            prompt_len = prompt.len(),
            "sending generateContent request"
        );

        let response = req.send().await.map_err(|e| {
            Error::transport_unreachable(e.to_string())
                .with_operation(OPERATION)
                .with_context("model", self.model())
                .set_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(
                model = self.model(),
                status = status.as_u16(),
                "generation endpoint rejected request"
            );
            return Err(Error::transport_status(status.as_u16(), text)
                .with_operation(OPERATION)
                .with_context("model", self.model()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::transport_unreachable(format!("failed to read response body: {}", e))
                .with_operation(OPERATION)
                .with_context("model", self.model())
                .set_source(e)
        })?;

        let api_response: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            Error::empty_response("response body is not a generateContent response")
                .with_operation(OPERATION)
                .with_context("model", self.model())
                .set_source(e)
        })?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                model = self.model(),
                prompt_tokens = usage.prompt_token_count,
                candidates_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }

        api_response
            .into_text()
            .map_err(|e| e.with_operation(OPERATION).with_context("model", self.model()))
    }
}

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    total_token_count: u64,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    fn into_text(self) -> Result<String> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            let err = Error::empty_response("response has no candidates");
            return Err(match block_reason {
                Some(reason) => err.with_context("block_reason", reason),
                None => err,
            });
        };

        let finish_reason = candidate.finish_reason;
        let text = candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty());

        match text {
            Some(text) => Ok(text),
            None => {
                let err = Error::empty_response("first candidate carries no text");
                Err(match finish_reason {
                    Some(reason) => err.with_context("finish_reason", reason),
                    None => err,
                })
            }
        }
    }
}
