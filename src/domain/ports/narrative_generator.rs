use crate::domain::error::DomainError;

/// Generative-AI collaborator. Takes the already-built request body and
/// returns the raw response body text; extraction of the narrative happens in
/// the report use case so a failed upstream never aborts the data portion.
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &serde_json::Value) -> Result<String, DomainError>;

    /// Model identifier echoed in the report response.
    fn model_name(&self) -> String;
}
