use crate::domain::error::DomainError;
use crate::domain::ports::alert_repository::{AlertRepository, AlertStats};
use std::sync::Arc;

pub struct StatsUseCase {
    repo: Arc<dyn AlertRepository>,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn AlertRepository>) -> Self {
        Self { repo }
    }

    pub fn stats(&self) -> Result<AlertStats, DomainError> {
        self.repo.stats()
    }
}
