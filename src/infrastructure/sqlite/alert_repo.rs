use crate::domain::entities::alert::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_repository::{AlertRepository, AlertStats};
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Column list used in all SELECT queries.
const SELECT_COLS: &str = "id, user_id, timestamp, alert_type, state, latitude, longitude, \
                           address, description, sector, comuna, city, reporter_villa, \
                           reporter_comuna, silent, attended_by, attended_at, attention_notes";

/// Stored timestamp format; lexicographic order matches chronological order so
/// range queries can compare strings directly.
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub struct SqliteAlertRepo {
    conn: Mutex<Connection>,
}

impl SqliteAlertRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_alert(row: &rusqlite::Row) -> Result<AlertRecord, rusqlite::Error> {
        let ts_str: Option<String> = row.get(2)?;
        let type_str: String = row.get(3)?;
        let state_str: String = row.get(4)?;
        let silent_int: i32 = row.get(14)?;
        let attended_str: Option<String> = row.get(16)?;

        Ok(AlertRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            timestamp: ts_str.as_deref().and_then(parse_ts),
            alert_type: type_str.parse().unwrap_or_else(|_| {
                eprintln!("Warning: invalid alert type '{type_str}' in store, defaulting to PANICO");
                AlertType::Panic
            }),
            state: state_str.parse().unwrap_or_else(|_| {
                eprintln!("Warning: invalid alert state '{state_str}' in store, defaulting to ACTIVA");
                AlertState::Active
            }),
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            address: row.get(7)?,
            description: row.get(8)?,
            sector: row.get(9)?,
            comuna: row.get(10)?,
            city: row.get(11)?,
            reporter_villa: row.get(12)?,
            reporter_comuna: row.get(13)?,
            silent: silent_int != 0,
            attended_by: row.get(15)?,
            attended_at: attended_str.as_deref().and_then(parse_ts),
            attention_notes: row.get(17)?,
        })
    }
}

fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).ok()
}

fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

impl AlertRepository for SqliteAlertRepo {
    fn add(&self, alert: &AlertRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO alerts (id, user_id, timestamp, alert_type, state, latitude, longitude, \
             address, description, sector, comuna, city, reporter_villa, reporter_comuna, silent, \
             attended_by, attended_at, attention_notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                alert.id,
                alert.user_id,
                alert.timestamp.as_ref().map(format_ts),
                alert.alert_type.wire_name(),
                alert.state.wire_name(),
                alert.latitude,
                alert.longitude,
                alert.address,
                alert.description,
                alert.sector,
                alert.comuna,
                alert.city,
                alert.reporter_villa,
                alert.reporter_comuna,
                alert.silent as i32,
                alert.attended_by,
                alert.attended_at.as_ref().map(format_ts),
                alert.attention_notes,
            ],
        )
        .map_err(|e| DomainError::Database(format!("insert failed: {e}")))?;
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<AlertRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            &format!("SELECT {SELECT_COLS} FROM alerts WHERE id = ?1"),
            params![id],
            Self::row_to_alert,
        )
        .optional()
        .map_err(|e| DomainError::Database(format!("lookup failed: {e}")))
    }

    fn update(&self, alert: &AlertRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let changed = conn
            .execute(
                "UPDATE alerts SET state = ?2, attended_by = ?3, attended_at = ?4, \
                 attention_notes = ?5 WHERE id = ?1",
                params![
                    alert.id,
                    alert.state.wire_name(),
                    alert.attended_by,
                    alert.attended_at.as_ref().map(format_ts),
                    alert.attention_notes,
                ],
            )
            .map_err(|e| DomainError::Database(format!("update failed: {e}")))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("alert {} not in store", alert.id)));
        }
        Ok(())
    }

    fn fetch_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<AlertRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLS} FROM alerts \
                 WHERE timestamp IS NOT NULL AND timestamp >= ?1 AND timestamp <= ?2 \
                 ORDER BY timestamp DESC"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![format_ts(&start), format_ts(&end)], Self::row_to_alert)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut alerts = Vec::new();
        for row in rows {
            alerts.push(row.map_err(|e| DomainError::Database(e.to_string()))?);
        }
        Ok(alerts)
    }

    fn stats(&self) -> Result<AlertStats, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let count = |sql: &str| -> Result<u64, DomainError> {
            conn.query_row(sql, [], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
                .map_err(|e| DomainError::Database(e.to_string()))
        };
        Ok(AlertStats {
            total: count("SELECT COUNT(*) FROM alerts")?,
            active: count("SELECT COUNT(*) FROM alerts WHERE state = 'ACTIVA'")?,
            in_progress: count("SELECT COUNT(*) FROM alerts WHERE state = 'EN_PROCESO'")?,
            attended: count("SELECT COUNT(*) FROM alerts WHERE state = 'ATENDIDA'")?,
            today: count("SELECT COUNT(*) FROM alerts WHERE date(timestamp) = date('now')")?,
        })
    }
}
