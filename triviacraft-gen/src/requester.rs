//! Topic in, trivia item out.

use crate::error::{Error, Result};
use crate::fence::strip_code_fences;
use crate::prompt::trivia_prompt;
use crate::provider::GenerationProvider;
use crate::trivia::TriviaItem;

/// Longest slice of generated text kept in error context.
const PREVIEW_LEN: usize = 120;

/// Builds the prompt, calls the provider once and decodes the answer.
pub struct TriviaRequester<P> {
    provider: P,
}

impl<P: GenerationProvider> TriviaRequester<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate one trivia item about `topic`.
    ///
    /// Fails with `Transport`, `EmptyResponse` or `MalformedPayload`; never
    /// retries.
    pub async fn generate_trivia(&self, topic: &str) -> Result<TriviaItem> {
        let prompt = trivia_prompt(topic);

        tracing::debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            topic_len = topic.len(),
            "requesting trivia"
        );

        let text = self
            .provider
            .generate_text(&prompt)
            .await
            .map_err(|e| e.with_operation("requester::generate_trivia"))?;

        parse_trivia(&text).map_err(|e| e.with_operation("requester::generate_trivia"))
    }
}

/// Decode generated text into a [`TriviaItem`], stripping code fences first.
///
/// The text must be a JSON object carrying string `question` and `answer`
/// keys; arrays and scalars are rejected even when serde could map them.
pub fn parse_trivia(text: &str) -> Result<TriviaItem> {
    let cleaned = strip_code_fences(text);
    let malformed = |reason: String| {
        Error::malformed_payload(reason)
            .with_operation("requester::parse_trivia")
            .with_context("preview", preview(cleaned))
    };

    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
        malformed(format!("generated text is not JSON: {}", e)).set_source(e)
    })?;
    if !value.is_object() {
        return Err(malformed("generated JSON is not an object".to_string()));
    }

    serde_json::from_value::<TriviaItem>(value).map_err(|e| {
        malformed(format!("generated text is not a trivia item: {}", e)).set_source(e)
    })
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{GeminiProvider, ProviderConfig};
    use crate::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Replies with a fixed result and records every prompt it sees.
    struct ScriptedProvider {
        reply: Mutex<Option<Result<String>>>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> Self {
            Self::with(Ok(text.to_string()))
        }

        fn failing(err: Error) -> Self {
            Self::with(Err(err))
        }

        fn with(reply: Result<String>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl GenerationProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn generate_text(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(Error::unexpected("scripted provider called twice")))
        }
    }

    const ITEM_JSON: &str = r#"{"question":"Q?","answer":"A."}"#;

    #[tokio::test]
    async fn test_generates_item_for_any_topic() {
        for topic in ["video games", "", "   ", "ünïcødé & <tags>"] {
            let requester = TriviaRequester::new(ScriptedProvider::replying(ITEM_JSON));

            let item = requester.generate_trivia(topic).await.expect("item");
            assert_eq!(item, TriviaItem::new("Q?", "A."));
            assert_eq!(requester.provider().calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_topic() {
        let requester = TriviaRequester::new(ScriptedProvider::replying(ITEM_JSON));
        assert_ok!(requester.generate_trivia("volcanoes").await);

        let prompts = requester.provider().prompts.lock().unwrap();
        assert!(prompts[0].contains("volcanoes"));
    }

    #[tokio::test]
    async fn test_fenced_reply_matches_unfenced() {
        let fenced = format!("```json\n{}\n```", ITEM_JSON);
        let plain = TriviaRequester::new(ScriptedProvider::replying(ITEM_JSON));
        let wrapped = TriviaRequester::new(ScriptedProvider::replying(&fenced));

        assert_eq!(
            plain.generate_trivia("x").await.unwrap(),
            wrapped.generate_trivia("x").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_provider_error_passes_through() {
        let requester = TriviaRequester::new(ScriptedProvider::failing(
            Error::transport_status(500, "boom").with_operation("scripted::generate_text"),
        ));

        let err = assert_err!(requester.generate_trivia("x").await);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.operation(), "requester::generate_trivia");
        assert_eq!(err.context_value("called"), Some("scripted::generate_text"));
        assert_eq!(requester.provider().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_trivia("{not valid json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
        assert!(err.source_ref().is_some());
        assert_eq!(err.context_value("preview"), Some("{not valid json"));
    }

    #[test]
    fn test_parse_rejects_missing_or_mistyped_keys() {
        for text in [
            r#"{"question":"Q?"}"#,
            r#"{"answer":"A."}"#,
            r#"{"question":"Q?","answer":42}"#,
            r#"["Q?","A."]"#,
            r#""Q?""#,
            "null",
            "",
        ] {
            let err = parse_trivia(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedPayload, "text: {}", text);
        }
    }

    #[test]
    fn test_parse_rejects_array_in_field_order() {
        let err = parse_trivia(r#"["Q?","A."]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
        assert_eq!(err.operation(), "requester::parse_trivia");
        assert_eq!(err.context_value("preview"), Some(r#"["Q?","A."]"#));

        let fenced = parse_trivia("```json\n[\"Q?\",\"A.\"]\n```").unwrap_err();
        assert_eq!(fenced.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_backticks_inside_values_survive() {
        let inner =
            r#"{"question":"In Markdown, what do ``` lines start?","answer":"A code block."}"#;
        let expected = TriviaItem::new("In Markdown, what do ``` lines start?", "A code block.");

        assert_eq!(parse_trivia(inner).unwrap(), expected);
        assert_eq!(parse_trivia(&format!("```json\n{}\n```", inner)).unwrap(), expected);
        assert_eq!(parse_trivia(&format!("```\n{}\n```", inner)).unwrap(), expected);
    }

    #[test]
    fn test_parse_keeps_content_unchanged() {
        let item = parse_trivia(r#"{"question":"  padded  ","answer":"","extra":true}"#).unwrap();
        assert_eq!(item.question, "  padded  ");
        assert_eq!(item.answer, "");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_LEN + 1);
        assert!(p.ends_with('…'));
    }

    // ------------------------------------------------------------------------
    // Against a mocked generation endpoint
    // ------------------------------------------------------------------------

    mod endpoint {
        use super::*;
        use axum::{extract::State, http::StatusCode, Router};
        use std::sync::Arc;
        use tokio::net::TcpListener;

        #[derive(Clone)]
        struct Reply {
            status: StatusCode,
            body: String,
            hits: Arc<AtomicUsize>,
        }

        async fn reply(State(reply): State<Reply>) -> (StatusCode, String) {
            reply.hits.fetch_add(1, Ordering::SeqCst);
            (reply.status, reply.body.clone())
        }

        async fn requester_against(
            status: StatusCode,
            body: String,
        ) -> (TriviaRequester<GeminiProvider>, Arc<AtomicUsize>) {
            let hits = Arc::new(AtomicUsize::new(0));
            let state = Reply {
                status,
                body,
                hits: hits.clone(),
            };
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let addr = listener.local_addr().expect("addr");
            let app = Router::new().fallback(reply).with_state(state);
            tokio::spawn(async move {
                let _ = axum::serve(listener, app).await;
            });

            let config = ProviderConfig::local(format!("http://{addr}")).with_api_key("test-key");
            let provider = GeminiProvider::new(config).expect("provider");
            (TriviaRequester::new(provider), hits)
        }

        fn with_text(text: &str) -> String {
            serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })
            .to_string()
        }

        #[tokio::test]
        async fn test_well_formed_reply() {
            let (requester, hits) = requester_against(StatusCode::OK, with_text(ITEM_JSON)).await;

            let item = requester.generate_trivia("").await.expect("item");
            assert_eq!(item, TriviaItem::new("Q?", "A."));
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_fenced_reply() {
            let fenced = format!("```json\n{}\n```", ITEM_JSON);
            let (requester, _) = requester_against(StatusCode::OK, with_text(&fenced)).await;

            let item = requester.generate_trivia("history").await.expect("item");
            assert_eq!(item, TriviaItem::new("Q?", "A."));
        }

        #[tokio::test]
        async fn test_status_500_is_not_retried() {
            let (requester, hits) =
                requester_against(StatusCode::INTERNAL_SERVER_ERROR, "oops".into()).await;

            let err = requester.generate_trivia("history").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Transport);
            assert_eq!(err.http_status(), Some(500));
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_no_candidates() {
            let (requester, _) = requester_against(StatusCode::OK, "{}".into()).await;

            let err = requester.generate_trivia("history").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EmptyResponse);
        }

        #[tokio::test]
        async fn test_invalid_generated_json() {
            let (requester, _) =
                requester_against(StatusCode::OK, with_text("{not valid json")).await;

            let err = requester.generate_trivia("history").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedPayload);
        }
    }
}
