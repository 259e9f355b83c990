//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Translate endpoint answering `body` for requests matching every `(key, value)` query pair
    pub async fn mock_translate_audio(&mut self, query: &[(&str, &str)], body: &[u8]) -> Mock {
        self.server
            .mock("GET", "/translate_tts")
            .match_query(query_matcher(query))
            .match_header("accept", "audio/mpeg")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_translate_error(&mut self, status: usize) -> Mock {
        self.mock_translate_status(&[], status).await
    }

    /// Translate endpoint failing with `status` for requests matching `query`
    pub async fn mock_translate_status(&mut self, query: &[(&str, &str)], status: usize) -> Mock {
        self.server
            .mock("GET", "/translate_tts")
            .match_query(query_matcher(query))
            .with_status(status)
            .create_async()
            .await
    }

    /// Cloud endpoint returning `audio` base64-encoded, as the real API does
    pub async fn mock_cloud_audio(&mut self, api_key: &str, body_match: serde_json::Value, audio: &[u8]) -> Mock {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(audio);
        self.server
            .mock("POST", "/v1/text:synthesize")
            .match_header("x-goog-api-key", api_key)
            .match_body(Matcher::PartialJson(body_match))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "audioContent": encoded }).to_string())
            .create_async()
            .await
    }

    /// Cloud endpoint returning a raw JSON body
    pub async fn mock_cloud_response(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/v1/text:synthesize")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

fn query_matcher(query: &[(&str, &str)]) -> Matcher {
    if query.is_empty() {
        return Matcher::Any;
    }
    Matcher::AllOf(
        query
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect(),
    )
}
