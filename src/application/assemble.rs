//! Final report assembly. Pure merge of filter echo, aggregates, narrative and
//! sample into the externally-visible response shape (Spanish wire keys, kept
//! compatible with the existing admin frontends).

use crate::application::aggregate::Aggregates;
use crate::application::report::ReportFilter;
use crate::domain::entities::alert::AlertRecord;
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Records rendered in full in the response's `muestra` block.
const RESPONSE_SAMPLE: usize = 10;

#[derive(Debug, Serialize)]
pub struct Report {
    pub status: String,
    pub filtros: FilterEcho,
    #[serde(rename = "totalEncontradas")]
    pub total_found: usize,
    #[serde(rename = "totalUsadas")]
    pub total_used: usize,
    pub agregados: AggregatesDto,
    #[serde(rename = "informeAi")]
    pub narrative: String,
    pub modelo: String,
    pub modo: String,
    pub muestra: Vec<AlertDto>,
}

#[derive(Debug, Serialize)]
pub struct FilterEcho {
    #[serde(rename = "fechaInicio")]
    pub start: String,
    #[serde(rename = "fechaFin")]
    pub end: String,
    pub tipo: Option<AlertType>,
    pub estado: Option<AlertState>,
    pub sector: Option<String>,
    pub limite: usize,
}

#[derive(Debug, Serialize)]
pub struct AggregatesDto {
    #[serde(rename = "porTipo")]
    pub by_type: BTreeMap<AlertType, u64>,
    #[serde(rename = "porEstado")]
    pub by_state: BTreeMap<AlertState, u64>,
    #[serde(rename = "porSectorTop10")]
    pub top_sectors: Vec<(String, u64)>,
    #[serde(rename = "porHora")]
    pub by_hour: BTreeMap<u32, u64>,
    #[serde(rename = "porDiaSemana")]
    pub by_weekday: BTreeMap<String, u64>,
    #[serde(rename = "porDia")]
    pub by_day: BTreeMap<NaiveDate, u64>,
    #[serde(rename = "mediaDiaria")]
    pub daily_mean: f64,
    #[serde(rename = "medianaDiaria")]
    pub daily_median: f64,
    pub anomalias: AnomaliesDto,
}

#[derive(Debug, Serialize)]
pub struct AnomaliesDto {
    #[serde(rename = "diasPico")]
    pub peak_days: Vec<(String, u64)>,
    #[serde(rename = "horasPico")]
    pub peak_hours: Vec<(u32, u64)>,
    #[serde(rename = "sectoresZscore")]
    pub sector_zscores: Vec<(String, f64)>,
}

/// Full alert rendering used in responses.
#[derive(Debug, Serialize)]
pub struct AlertDto {
    #[serde(rename = "alertaId")]
    pub id: String,
    #[serde(rename = "usuarioId")]
    pub user_id: String,
    pub tipo: AlertType,
    #[serde(rename = "tipoTitulo")]
    pub type_title: String,
    pub descripcion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub direccion: Option<String>,
    pub sector: Option<String>,
    pub comuna: Option<String>,
    pub ciudad: Option<String>,
    pub estado: AlertState,
    pub silenciosa: bool,
    #[serde(rename = "fechaHora")]
    pub timestamp: Option<String>,
    #[serde(rename = "atendidaPor")]
    pub attended_by: Option<String>,
    #[serde(rename = "fechaAtencion")]
    pub attended_at: Option<String>,
    #[serde(rename = "notasAtencion")]
    pub attention_notes: Option<String>,
}

fn iso(ts: &chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl From<&AlertRecord> for AlertDto {
    fn from(a: &AlertRecord) -> Self {
        Self {
            id: a.id.clone(),
            user_id: a.user_id.clone(),
            tipo: a.alert_type,
            type_title: a.alert_type.title().to_string(),
            descripcion: a.description.clone(),
            latitud: a.latitude,
            longitud: a.longitude,
            direccion: a.address.clone(),
            sector: a.sector.clone(),
            comuna: a.comuna.clone(),
            ciudad: a.city.clone(),
            estado: a.state,
            silenciosa: a.silent,
            timestamp: a.timestamp.as_ref().map(iso),
            attended_by: a.attended_by.clone(),
            attended_at: a.attended_at.as_ref().map(iso),
            attention_notes: a.attention_notes.clone(),
        }
    }
}

/// Merge everything into the response object. Tolerates `narrative` being a
/// fallback string; the data portion always reports success.
pub fn assemble(
    filter: &ReportFilter,
    total_found: usize,
    aggregates: Aggregates,
    sample: &[AlertRecord],
    narrative: String,
    model: String,
) -> Report {
    Report {
        status: "success".to_string(),
        filtros: FilterEcho {
            start: iso(&filter.start),
            end: iso(&filter.end),
            tipo: filter.alert_type,
            estado: filter.state,
            sector: filter.sector.clone(),
            limite: sample.len(),
        },
        total_found,
        total_used: sample.len(),
        agregados: AggregatesDto {
            by_type: aggregates.by_type,
            by_state: aggregates.by_state,
            top_sectors: aggregates.top_sectors,
            by_hour: aggregates.by_hour,
            by_weekday: aggregates.by_weekday,
            by_day: aggregates.by_day,
            daily_mean: aggregates.daily_mean,
            daily_median: aggregates.daily_median,
            anomalias: AnomaliesDto {
                peak_days: aggregates.peak_days,
                peak_hours: aggregates.peak_hours,
                sector_zscores: aggregates.sector_zscores,
            },
        },
        narrative,
        modelo: model,
        modo: "agregado".to_string(),
        muestra: sample.iter().take(RESPONSE_SAMPLE).map(AlertDto::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::aggregate::aggregate;
    use chrono::NaiveDate;

    #[test]
    fn test_response_wire_keys() {
        let records = vec![AlertRecord::new(
            "u1".into(),
            AlertType::Fire,
            None,
            None,
            None,
            None,
            Some("Centro".into()),
            None,
            None,
            false,
        )];
        let agg = aggregate(&records);
        let filter = ReportFilter {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            alert_type: None,
            state: None,
            sector: None,
            limit: 100,
        };
        let report = assemble(&filter, 1, agg, &records, "texto".into(), "gemini-2.0-flash".into());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["totalEncontradas"], 1);
        assert_eq!(value["totalUsadas"], 1);
        assert_eq!(value["agregados"]["porTipo"]["INCENDIO"], 1);
        assert_eq!(value["agregados"]["porEstado"]["ACTIVA"], 1);
        assert_eq!(value["informeAi"], "texto");
        assert_eq!(value["modo"], "agregado");
        assert_eq!(value["muestra"][0]["tipoTitulo"], "Incendio");
    }

    #[test]
    fn test_sample_rendering_capped_at_ten() {
        let records: Vec<AlertRecord> = (0..15)
            .map(|_| {
                AlertRecord::new(
                    "u1".into(),
                    AlertType::Panic,
                    None,
                    None,
                    None,
                    None,
                    Some("A".into()),
                    None,
                    None,
                    false,
                )
            })
            .collect();
        let agg = aggregate(&records);
        let filter = ReportFilter {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            alert_type: None,
            state: None,
            sector: None,
            limit: 100,
        };
        let report = assemble(&filter, 15, agg, &records, "x".into(), "m".into());
        assert_eq!(report.muestra.len(), 10);
        assert_eq!(report.total_used, 15);
    }
}
