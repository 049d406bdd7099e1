//! Report generation: filter resolution, in-memory aggregation, sampling,
//! one bounded AI call, and final assembly.

use crate::application::aggregate::aggregate;
use crate::application::assemble::{assemble, Report};
use crate::application::prompt::{build_payload, build_prompt, build_request, GenerationConfig};
use crate::application::sample::select_sample;
use crate::domain::entities::alert::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_repository::AlertRepository;
use crate::domain::ports::narrative_generator::NarrativeGenerator;
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::{Duration, NaiveDateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_RANGE_DAYS: i64 = 60;
const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 500;
const AI_TIMEOUT_SECS: u64 = 60;

const BAD_DATE_MSG: &str = "Formato de fecha inválido. Use ISO-8601, ej: 2025-11-29T13:45:00";
pub const FALLBACK_NO_RESPONSE: &str = "No hubo respuesta del modelo.";
pub const FALLBACK_NO_TEXT: &str = "No se pudo extraer el texto de la respuesta del modelo.";

/// Raw inbound filter, as the caller sends it (Spanish field names).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "fechaInicio")]
    pub start: Option<String>,
    #[serde(rename = "fechaFin")]
    pub end: Option<String>,
    pub tipo: Option<String>,
    pub estado: Option<String>,
    pub sector: Option<String>,
    pub limite: Option<i64>,
}

/// Resolved filter with a concrete date range and a safe limit.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub alert_type: Option<AlertType>,
    pub state: Option<AlertState>,
    /// Lowercased substring match against the record's sector field.
    pub sector: Option<String>,
    pub limit: usize,
}

impl ReportFilter {
    /// Resolve a raw request. Unknown tipo/estado names are ignored (no
    /// filter); a malformed date is a client error, while a range with either
    /// end missing falls back to the default window.
    pub fn resolve(req: &ReportRequest) -> Result<Self, DomainError> {
        let (start, end) = match (&req.start, &req.end) {
            (Some(s), Some(e)) => (parse_datetime(s)?, parse_datetime(e)?),
            _ => {
                let now = Utc::now().naive_utc();
                (now - Duration::days(DEFAULT_RANGE_DAYS), now)
            }
        };

        let alert_type = req
            .tipo
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| s.parse::<AlertType>().ok());
        let state = req
            .estado
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| s.parse::<AlertState>().ok());
        let sector = req
            .sector
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let limit = req
            .limite
            .unwrap_or(DEFAULT_LIMIT as i64)
            .clamp(1, MAX_LIMIT as i64) as usize;

        Ok(Self {
            start,
            end,
            alert_type,
            state,
            sector,
            limit,
        })
    }

    fn matches(&self, alert: &AlertRecord) -> bool {
        if let Some(t) = self.alert_type {
            if alert.alert_type != t {
                return false;
            }
        }
        if let Some(s) = self.state {
            if alert.state != s {
                return false;
            }
        }
        if let Some(sector) = &self.sector {
            let alert_sector = alert.sector.as_deref().unwrap_or("").to_lowercase();
            if !alert_sector.contains(sector.as_str()) {
                return false;
            }
        }
        true
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, DomainError> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    Err(DomainError::InvalidInput(BAD_DATE_MSG.to_string()))
}

/// Extract `candidates[0].content.parts[0].text` from a raw generateContent
/// response. Any missing level degrades to a fixed fallback string instead of
/// an error: narrative failure must never abort the data portion.
pub fn extract_model_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return FALLBACK_NO_RESPONSE.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(root) => root["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_NO_TEXT.to_string()),
        Err(e) => format!("Error al parsear respuesta del modelo: {e}"),
    }
}

pub struct ReportUseCase {
    repo: Arc<dyn AlertRepository>,
    generator: Arc<dyn NarrativeGenerator>,
    config: GenerationConfig,
}

impl ReportUseCase {
    pub fn new(repo: Arc<dyn AlertRepository>, generator: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            repo,
            generator,
            config: GenerationConfig::default(),
        }
    }

    pub async fn execute(&self, req: &ReportRequest) -> Result<Report, DomainError> {
        let filter = ReportFilter::resolve(req)?;

        let mut candidates: Vec<AlertRecord> = self
            .repo
            .fetch_between(filter.start, filter.end)?
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect();
        // Newest first; alerts without a timestamp sink to the end.
        candidates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total_found = candidates.len();
        let aggregates = aggregate(&candidates);
        let sample = select_sample(&candidates, &aggregates.top_sectors, filter.limit);

        let payload = build_payload(&filter, total_found, &aggregates, &sample);
        let prompt = build_prompt(&payload);
        let request = build_request(&prompt, &self.config);

        let narrative = self.generate_narrative(&request).await;

        Ok(assemble(
            &filter,
            total_found,
            aggregates,
            &sample,
            narrative,
            self.generator.model_name(),
        ))
    }

    /// One outbound call with a hard deadline. Upstream errors and timeouts
    /// degrade to fallback text; they are never propagated.
    async fn generate_narrative(&self, request: &serde_json::Value) -> String {
        let call = self.generator.generate(request);
        match tokio::time::timeout(std::time::Duration::from_secs(AI_TIMEOUT_SECS), call).await {
            Ok(Ok(raw)) => extract_model_text(&raw),
            Ok(Err(e)) => {
                eprintln!("Warning: AI narrative unavailable: {e}");
                FALLBACK_NO_RESPONSE.to_string()
            }
            Err(_) => {
                eprintln!("Warning: AI narrative timed out after {AI_TIMEOUT_SECS}s");
                FALLBACK_NO_RESPONSE.to_string()
            }
        }
    }
}
