use crate::domain::error::DomainError;
use crate::domain::ports::narrative_generator::NarrativeGenerator;

/// Offline generator used when no API key is configured and in tests. Answers
/// with a canned generateContent-shaped body so the extraction path stays the
/// same as in production.
pub struct NoopGenerator {
    text: String,
}

impl NoopGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for NoopGenerator {
    fn default() -> Self {
        Self::new("Informe AI deshabilitado (sin clave de API configurada).")
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for NoopGenerator {
    async fn generate(&self, _request: &serde_json::Value) -> Result<String, DomainError> {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": self.text }] }
            }]
        });
        Ok(body.to_string())
    }

    fn model_name(&self) -> String {
        "noop".to_string()
    }
}
