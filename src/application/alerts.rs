//! Alert intake, triage and recent-activity listing.

use crate::domain::entities::alert::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_repository::AlertRepository;
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::{Duration, Utc};
use std::sync::Arc;

pub struct AlertsUseCase {
    repo: Arc<dyn AlertRepository>,
}

impl AlertsUseCase {
    pub fn new(repo: Arc<dyn AlertRepository>) -> Self {
        Self { repo }
    }

    /// Create and persist a new alert. Description defaults from the type,
    /// state starts at ACTIVA, timestamp at now.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        user_id: String,
        alert_type: AlertType,
        description: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        address: Option<String>,
        sector: Option<String>,
        comuna: Option<String>,
        city: Option<String>,
        silent: bool,
    ) -> Result<AlertRecord, DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("user_id is required".into()));
        }
        let alert = AlertRecord::new(
            user_id, alert_type, description, latitude, longitude, address, sector, comuna, city,
            silent,
        );
        self.repo.add(&alert)?;
        Ok(alert)
    }

    /// Move an alert through its triage lifecycle. Transitioning to ATENDIDA
    /// stamps who attended, when, and any notes; other transitions leave the
    /// attention fields untouched.
    pub fn change_state(
        &self,
        alert_id: &str,
        new_state: AlertState,
        admin_id: String,
        notes: Option<String>,
    ) -> Result<AlertRecord, DomainError> {
        let mut alert = self
            .repo
            .get_by_id(alert_id)?
            .ok_or_else(|| DomainError::NotFound("Alerta no encontrada".into()))?;

        alert.state = new_state;
        if new_state == AlertState::Attended {
            alert.attended_by = Some(admin_id);
            alert.attended_at = Some(Utc::now().naive_utc());
            if notes.is_some() {
                alert.attention_notes = notes;
            }
        }

        self.repo.update(&alert)?;
        Ok(alert)
    }

    /// Alerts from the last `days` days, newest first.
    pub fn recent(&self, days: i64) -> Result<Vec<AlertRecord>, DomainError> {
        let now = Utc::now().naive_utc();
        self.repo.fetch_between(now - Duration::days(days), now)
    }
}
