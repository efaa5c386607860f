//! Google Gemini generateContent client
//!
//! https://ai.google.dev/api/generate-content

use serde::Serialize;
use serde_json::Value;

use crate::CompletionError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base(api_key, GEMINI_API_BASE)
    }

    /// Same client against a different endpoint base; used by tests and
    /// proxy setups.
    pub fn with_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// One prompt in, one reply out. Response shapes the endpoint is
    /// known to produce are all tolerated; see [`extract_reply`].
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "generateContent returned an error payload");
            return Err(CompletionError::Service { status });
        }

        let body: Value = resp.json().await.map_err(CompletionError::Transport)?;
        Ok(extract_reply(body.pointer("/candidates/0/content")))
    }
}

/// Decodes the `candidates[0].content` field, which varies by model and
/// response kind. Ordered match: plain string, then an object carrying a
/// `parts` sequence, then a serialized fallback for anything else. Shape
/// mismatches never fail the call.
fn extract_reply(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(value) => match value.get("parts").and_then(Value::as_array) {
            Some(parts) => parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
                .trim()
                .to_string(),
            None => value.to_string().trim().to_string(),
        },
        None => String::new(),
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn extract_reply_concatenates_parts_in_order() {
        let body = serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "a"}, {"text": "b"}]}}]
        });
        assert_eq!(extract_reply(body.pointer("/candidates/0/content")), "ab");
    }

    #[test]
    fn extract_reply_uses_plain_string_content() {
        let body = serde_json::json!({"candidates": [{"content": "hello"}]});
        assert_eq!(extract_reply(body.pointer("/candidates/0/content")), "hello");
    }

    #[test]
    fn extract_reply_serializes_unknown_shapes() {
        let body = serde_json::json!({"candidates": [{"content": {"weird": 42}}]});
        assert_eq!(
            extract_reply(body.pointer("/candidates/0/content")),
            r#"{"weird":42}"#
        );

        let numeric = serde_json::json!({"candidates": [{"content": 7}]});
        assert_eq!(extract_reply(numeric.pointer("/candidates/0/content")), "7");
    }

    #[test]
    fn extract_reply_missing_candidates_degrades_to_empty() {
        let body = serde_json::json!({"promptFeedback": {}});
        assert_eq!(extract_reply(body.pointer("/candidates/0/content")), "");
    }

    #[test]
    fn extract_reply_skips_textless_parts() {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "a"}, {"inlineData": {}}, {"text": "b"}]}}]
        });
        assert_eq!(extract_reply(body.pointer("/candidates/0/content")), "ab");
    }

    #[tokio::test]
    async fn complete_posts_prompt_and_returns_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{DEFAULT_MODEL}:generateContent")))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "ping"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "pong"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::with_base("test-key", server.uri());
        let reply = client.complete("ping").await.unwrap();
        assert_eq!(reply, "pong");
    }

    #[tokio::test]
    async fn complete_surfaces_service_errors_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base("test-key", server.uri());
        let err = client.complete("ping").await.unwrap_err();
        match err {
            CompletionError::Service { status } => assert_eq!(status.as_u16(), 500),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_maps_connection_failures_to_transport() {
        // Nothing listens here; the connect fails immediately.
        let client = GeminiClient::with_base("test-key", "http://127.0.0.1:9");
        let err = client.complete("ping").await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
