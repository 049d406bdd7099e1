//! Shared test helpers.
#![allow(dead_code)]

use chrono::NaiveDate;
use vigia::domain::entities::alert::AlertRecord;
use vigia::domain::error::DomainError;
use vigia::domain::ports::alert_repository::AlertRepository;
use vigia::domain::ports::narrative_generator::NarrativeGenerator;
use vigia::domain::values::alert_state::AlertState;
use vigia::domain::values::alert_type::AlertType;
use vigia::infrastructure::ai::noop::NoopGenerator;
use vigia::infrastructure::sqlite::alert_repo::SqliteAlertRepo;
use vigia::infrastructure::sqlite::migrations::run_migrations;
use vigia::Vigia;
use std::sync::Arc;

pub fn setup() -> Vigia {
    Vigia::with_providers(":memory:", Arc::new(NoopGenerator::default())).unwrap()
}

/// An alert on a fixed calendar day in May/June 2025, so report tests can use
/// an explicit date range and stay deterministic.
pub fn make_alert(
    id: &str,
    sector: &str,
    alert_type: AlertType,
    state: AlertState,
    month: u32,
    day: u32,
    hour: u32,
) -> AlertRecord {
    let mut alert = AlertRecord::new(
        "user-1".into(),
        alert_type,
        None,
        Some(-33.45),
        Some(-70.66),
        None,
        Some(sector.to_string()),
        Some("San Bernardo".into()),
        Some("Santiago".into()),
        false,
    );
    alert.id = id.to_string();
    alert.state = state;
    alert.timestamp = NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0);
    alert
}

/// Seed a file-backed store directly so alerts can carry arbitrary timestamps.
pub fn seed(db_path: &str, alerts: &[AlertRecord]) {
    let conn = rusqlite::Connection::open(db_path).unwrap();
    run_migrations(&conn).unwrap();
    let repo = SqliteAlertRepo::new(conn);
    for alert in alerts {
        repo.add(alert).unwrap();
    }
}

/// Generator that always fails upstream, for failure-isolation tests.
pub struct FailingGenerator;

#[async_trait::async_trait]
impl NarrativeGenerator for FailingGenerator {
    async fn generate(&self, _request: &serde_json::Value) -> Result<String, DomainError> {
        Err(DomainError::Upstream {
            status: 500,
            body: "internal error".into(),
        })
    }

    fn model_name(&self) -> String {
        "failing".to_string()
    }
}
