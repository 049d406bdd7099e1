use crate::domain::entities::alert::AlertRecord;
use crate::domain::error::DomainError;
use chrono::NaiveDateTime;

/// Dashboard-style quick counters.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AlertStats {
    pub total: u64,
    pub active: u64,
    pub in_progress: u64,
    pub attended: u64,
    pub today: u64,
}

/// Record store collaborator. Report generation only needs the range fetch;
/// the rest supports alert intake, triage and quick stats.
pub trait AlertRepository: Send + Sync {
    fn add(&self, alert: &AlertRecord) -> Result<(), DomainError>;
    fn get_by_id(&self, id: &str) -> Result<Option<AlertRecord>, DomainError>;
    /// Persist state and attention fields of an existing alert.
    fn update(&self, alert: &AlertRecord) -> Result<(), DomainError>;
    /// All alerts with `start <= timestamp <= end`, newest first.
    fn fetch_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<AlertRecord>, DomainError>;
    fn stats(&self) -> Result<AlertStats, DomainError>;
}
