use crate::converters::gemini::GeminiRequest;
use crate::request_id::RequestId;
use reqwest::header::HeaderValue;
use std::sync::Arc;
use tracing::{debug, info};

pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Sends `generateContent` calls to the Gemini REST API.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
}

impl LlmClient {
    pub fn new(http_client: Arc<reqwest::Client>, api_base: impl Into<String>) -> Self {
        Self { http_client, api_base: api_base.into() }
    }

    pub fn build_target_url(&self, model: &str) -> String {
        let path = format!("v1beta/models/{}:generateContent", model);
        if self.api_base.ends_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }

    /// The key travels in a header only; a `?key=` query would leak into proxy logs and referrers.
    pub async fn generate_content(
        &self,
        request: &GeminiRequest,
        model: &str,
        api_key: &str,
        request_id: Option<&RequestId>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let target_url = self.build_target_url(model);

        let mut target_request = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, api_key);

        // Propagate request id upstream
        if let Some(val) = request_id.and_then(|id| HeaderValue::from_str(&id.0).ok()) {
            target_request = target_request.header("x-request-id", val);
        }

        info!("Forwarding request to: {}", target_url);
        debug!("generation config: {:?}", request.generation_config);
        target_request.json(request).send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(api_base: &str) -> LlmClient {
        LlmClient::new(Arc::new(reqwest::Client::new()), api_base)
    }

    #[test]
    fn test_build_target_url() {
        assert_eq!(
            client("https://generativelanguage.googleapis.com").build_target_url("gemini-2.5-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
        assert_eq!(
            client("http://localhost:1234/").build_target_url("gemini-2.5-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_content_sends_key_header_and_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1beta/models/gemini-2.5-pro:generateContent")
            .match_header("x-goog-api-key", "secret-key")
            .match_header("x-request-id", "req-1")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": { "responseMimeType": "application/json", "temperature": 0.7 }
            })))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let request_id = RequestId("req-1".to_string());
        let resp = client(&server.url())
            .generate_content(&GeminiRequest::from_prompt("hello"), "gemini-2.5-pro", "secret-key", Some(&request_id))
            .await
            .expect("request failed");

        assert_eq!(resp.status(), 200);
        m.assert_async().await;
    }
}
