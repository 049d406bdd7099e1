use crate::domain::error::DomainError;
use crate::domain::ports::narrative_generator::NarrativeGenerator;
use reqwest::Client;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Thin POST wrapper around the generateContent endpoint. Returns the raw
/// response body; narrative extraction happens upstream so a malformed body
/// never turns into a hard failure here beyond the transport read.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for GeminiClient {
    async fn generate(&self, request: &serde_json::Value) -> Result<String, DomainError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Upstream {
                status: 0,
                body: format!("request failed: {e}"),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Upstream { status, body });
        }

        resp.text()
            .await
            .map_err(|e| DomainError::Parse(format!("response read error: {e}")))
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
