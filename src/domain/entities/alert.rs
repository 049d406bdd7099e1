use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single incident reported by a resident.
///
/// Geography fields are denormalized at creation time: `sector`/`comuna`/`city`
/// come from the record itself, while `reporter_villa`/`reporter_comuna` carry
/// the reporting user's own scoping as a fallback when the record fields are
/// missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub user_id: String,
    /// Missing timestamps are tolerated on read; time-based groupings skip them.
    pub timestamp: Option<NaiveDateTime>,
    pub alert_type: AlertType,
    pub state: AlertState,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub comuna: Option<String>,
    pub city: Option<String>,
    pub reporter_villa: Option<String>,
    pub reporter_comuna: Option<String>,
    pub silent: bool,
    pub attended_by: Option<String>,
    pub attended_at: Option<NaiveDateTime>,
    pub attention_notes: Option<String>,
}

impl AlertRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
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
    ) -> Self {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| alert_type.default_description().to_string());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            timestamp: Some(Utc::now().naive_utc()),
            alert_type,
            state: AlertState::Active,
            latitude,
            longitude,
            address,
            description: Some(description),
            sector,
            comuna,
            city,
            reporter_villa: None,
            reporter_comuna: None,
            silent,
            attended_by: None,
            attended_at: None,
            attention_notes: None,
        }
    }

    /// Human-readable grouping key: `"Sector (Villa X, Comuna Y)"`.
    ///
    /// Falls back to `"(sin sector)"` and to the reporter's own villa/comuna so
    /// the label is stable even with partial data. Never fails.
    pub fn sector_label(&self) -> String {
        let sector = non_blank(self.sector.as_deref()).unwrap_or("(sin sector)");
        let villa = non_blank(self.reporter_villa.as_deref());
        let comuna =
            non_blank(self.comuna.as_deref()).or_else(|| non_blank(self.reporter_comuna.as_deref()));

        let mut details = Vec::new();
        if let Some(v) = villa {
            details.push(format!("Villa {v}"));
        }
        if let Some(c) = comuna {
            details.push(format!("Comuna {c}"));
        }
        if details.is_empty() {
            sector.to_string()
        } else {
            format!("{} ({})", sector, details.join(", "))
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
