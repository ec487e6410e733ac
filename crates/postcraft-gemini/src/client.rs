// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! One request per call: no retries, no streaming. Callers decide what a
//! failure means for the conversation.

use std::time::Duration;

use postcraft_core::PostcraftError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a client authenticated with `api_key` against `base_url`
    /// (for example `https://generativelanguage.googleapis.com`).
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, PostcraftError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                PostcraftError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| PostcraftError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Sends one `generateContent` request for `model`.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PostcraftError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code, api_err.error.status, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PostcraftError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| PostcraftError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> PostcraftError {
        if e.is_timeout() {
            PostcraftError::Timeout {
                duration: self.timeout,
            }
        } else {
            PostcraftError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content::text(None, "system")),
            contents: vec![Content::text(Some("user"), "Hello")],
            generation_config: GenerationConfig { temperature: 0.7 },
        }
    }

    fn test_client(server: &MockServer, timeout: Duration) -> GeminiClient {
        GeminiClient::new("test-key", &server.uri(), timeout).unwrap()
    }

    #[tokio::test]
    async fn generate_posts_to_model_endpoint_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
                "generationConfig": {"temperature": 0.7}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "Hi!"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(5));
        let response = client
            .generate("gemini-1.5-flash", &test_request())
            .await
            .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Hi!"));
    }

    #[tokio::test]
    async fn api_errors_are_provider_errors_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(5));
        let err = client
            .generate("gemini-1.5-flash", &test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PostcraftError::Provider { .. }));
        assert!(err.to_string().contains("UNAVAILABLE"), "got: {err}");
    }

    #[tokio::test]
    async fn slow_backend_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidates": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_millis(50));
        let err = client
            .generate("gemini-1.5-flash", &test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PostcraftError::Timeout { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn non_json_success_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = test_client(&server, Duration::from_secs(5));
        let err = client
            .generate("gemini-1.5-flash", &test_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
