pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::alerts::AlertsUseCase;
use crate::application::assemble::Report;
use crate::application::report::{ReportRequest, ReportUseCase};
use crate::application::stats::StatsUseCase;
use crate::domain::entities::alert::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_repository::{AlertRepository, AlertStats};
use crate::domain::ports::narrative_generator::NarrativeGenerator;
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use crate::infrastructure::ai::gemini::GeminiClient;
use crate::infrastructure::ai::noop::NoopGenerator;
use crate::infrastructure::sqlite::alert_repo::SqliteAlertRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct Vigia {
    alerts_uc: AlertsUseCase,
    report_uc: ReportUseCase,
    stats_uc: StatsUseCase,
}

impl Vigia {
    /// Wire up from the environment: `VIGIA_AI_API_KEY` enables the Gemini
    /// client, otherwise reports carry a canned offline narrative.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let api_key = std::env::var("VIGIA_AI_API_KEY").unwrap_or_default();
        let model = std::env::var("VIGIA_AI_MODEL").ok();
        let base_url = std::env::var("VIGIA_AI_BASE_URL").ok();

        let generator: Arc<dyn NarrativeGenerator> = if api_key.is_empty() {
            Arc::new(NoopGenerator::default())
        } else {
            Arc::new(GeminiClient::new(api_key, model, base_url))
        };

        Self::with_providers(db_path, generator)
    }

    pub fn with_providers(
        db_path: &str,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let repo: Arc<dyn AlertRepository> = Arc::new(SqliteAlertRepo::new(conn));

        Ok(Self {
            alerts_uc: AlertsUseCase::new(repo.clone()),
            report_uc: ReportUseCase::new(repo.clone(), generator),
            stats_uc: StatsUseCase::new(repo),
        })
    }

    // Delegating methods
    #[allow(clippy::too_many_arguments)]
    pub fn create_alert(
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
        self.alerts_uc.create(
            user_id, alert_type, description, latitude, longitude, address, sector, comuna, city,
            silent,
        )
    }

    pub fn change_alert_state(
        &self,
        alert_id: &str,
        new_state: AlertState,
        admin_id: String,
        notes: Option<String>,
    ) -> Result<AlertRecord, DomainError> {
        self.alerts_uc.change_state(alert_id, new_state, admin_id, notes)
    }

    pub fn recent_alerts(&self, days: i64) -> Result<Vec<AlertRecord>, DomainError> {
        self.alerts_uc.recent(days)
    }

    pub async fn report(&self, request: &ReportRequest) -> Result<Report, DomainError> {
        self.report_uc.execute(request).await
    }

    pub fn stats(&self) -> Result<AlertStats, DomainError> {
        self.stats_uc.stats()
    }
}
