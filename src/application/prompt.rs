//! Builds the structured payload and instruction prompt sent to the
//! generative-AI endpoint.

use crate::application::aggregate::Aggregates;
use crate::application::report::ReportFilter;
use crate::domain::entities::alert::AlertRecord;
use serde_json::{json, Value};

/// Records included in the payload's `muestra` block.
const PAYLOAD_SAMPLE: usize = 20;

/// Sampling parameters for the generation call. Tuned for factual, low-variance
/// summaries over the aggregate tables.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.9,
            max_output_tokens: 2500,
        }
    }
}

/// Aggregate payload handed to the model, JSON-serialized inside the prompt.
pub fn build_payload(
    filter: &ReportFilter,
    total_found: usize,
    aggregates: &Aggregates,
    sample: &[AlertRecord],
) -> Value {
    let by_type = count_pairs_desc(
        aggregates
            .by_type
            .iter()
            .map(|(k, v)| (k.to_string(), *v)),
    );
    let by_state = count_pairs_desc(
        aggregates
            .by_state
            .iter()
            .map(|(k, v)| (k.to_string(), *v)),
    );
    let by_hour: Vec<Value> = aggregates
        .by_hour
        .iter()
        .map(|(h, c)| json!([h, c]))
        .collect();
    let by_weekday: Vec<Value> = aggregates
        .by_weekday
        .iter()
        .map(|(d, c)| json!([d, c]))
        .collect();
    let top_sectors: Vec<Value> = aggregates
        .top_sectors
        .iter()
        .map(|(s, c)| json!([s, c]))
        .collect();
    let daily: Vec<Value> = aggregates
        .by_day
        .iter()
        .map(|(d, c)| json!([d.to_string(), c]))
        .collect();

    let sample_block: Vec<Value> = sample
        .iter()
        .take(PAYLOAD_SAMPLE)
        .map(|a| {
            json!({
                "fecha": a.timestamp.as_ref().map(iso),
                "tipo": a.alert_type.wire_name(),
                "estado": a.state.wire_name(),
                "sector": a.sector_label(),
                "detalle": a.description.clone().unwrap_or_default(),
            })
        })
        .collect();

    json!({
        "rango": {
            "inicio": iso(&filter.start),
            "fin": iso(&filter.end),
        },
        "totales": {
            "encontradas": total_found,
            "sectores": aggregates.sector_count,
            "mediaDiaria": aggregates.daily_mean,
            "medianaDiaria": aggregates.daily_median,
        },
        "porTipo": by_type,
        "porEstado": by_state,
        "porHora": by_hour,
        "porDiaSemana": by_weekday,
        "topSectores": top_sectors,
        "tendencias": { "diaria": daily },
        "anomalias": {
            "diasPico": aggregates.peak_days.clone(),
            "horasPico": aggregates.peak_hours.clone(),
            "sectoresZscore": aggregates.sector_zscores.clone(),
        },
        "muestra": sample_block,
    })
}

/// Fixed security-analyst instruction followed by the serialized payload.
pub fn build_prompt(payload: &Value) -> String {
    format!(
        "Eres analista de seguridad. Con base en el siguiente JSON agregado, entrega:\n\
         - Patrones por tipo, sector, hora y día.\n\
         - Tendencias y posibles causas.\n\
         - Sectores/horas con anomalías y recomendaciones accionables.\n\
         - Resumen ejecutivo (máx 8 viñetas) y 3 prioridades tácticas para la próxima semana.\n\
         Responde en minimo 350–400 palabras. El resultado dalo en formato markdown que se vea \
         profesional, que sea facil de leer{payload}"
    )
}

/// Full request body in the generateContent wire shape.
pub fn build_request(prompt: &str, config: &GenerationConfig) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        "generationConfig": {
            "temperature": config.temperature,
            "topK": config.top_k,
            "topP": config.top_p,
            "maxOutputTokens": config.max_output_tokens,
        },
    })
}

fn iso(ts: &chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn count_pairs_desc(entries: impl Iterator<Item = (String, u64)>) -> Vec<Value> {
    let mut pairs: Vec<(String, u64)> = entries.collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.into_iter().map(|(k, v)| json!([k, v])).collect()
}
