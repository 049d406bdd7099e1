//! Multi-dimensional grouping and summary statistics over a set of alerts.
//!
//! Everything here is a pure function of its input: one report request builds
//! one `Aggregates` and throws it away with the response. No caches.

use crate::domain::entities::alert::AlertRecord;
use crate::domain::values::alert_state::AlertState;
use crate::domain::values::alert_type::AlertType;
use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one filtered alert population.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregates {
    pub by_type: BTreeMap<AlertType, u64>,
    pub by_state: BTreeMap<AlertState, u64>,
    /// Keyed by the derived sector label (`"Sector (Villa X, Comuna Y)"`).
    pub by_sector: BTreeMap<String, u64>,
    /// Hour of day 0–23. Records without a timestamp are not counted.
    pub by_hour: BTreeMap<u32, u64>,
    /// Calendar day. Records without a timestamp are not counted.
    pub by_day: BTreeMap<NaiveDate, u64>,
    /// Single-letter Spanish weekday codes (L M X J V S D).
    pub by_weekday: BTreeMap<String, u64>,
    /// Top 10 sector labels by volume, descending.
    pub top_sectors: Vec<(String, u64)>,
    pub sector_count: usize,
    pub daily_mean: f64,
    pub daily_median: f64,
    /// Days whose count exceeds mean + 2σ of the daily series, chronological.
    pub peak_days: Vec<(String, u64)>,
    /// Top 5 hours by count, descending.
    pub peak_hours: Vec<(u32, u64)>,
    /// Top 10 sectors by z-score of their count, descending, rounded to 2 decimals.
    pub sector_zscores: Vec<(String, f64)>,
}

pub fn aggregate(records: &[AlertRecord]) -> Aggregates {
    let mut by_type: BTreeMap<AlertType, u64> = BTreeMap::new();
    let mut by_state: BTreeMap<AlertState, u64> = BTreeMap::new();
    let mut by_sector: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut by_weekday: BTreeMap<String, u64> = BTreeMap::new();

    for alert in records {
        *by_type.entry(alert.alert_type).or_default() += 1;
        *by_state.entry(alert.state).or_default() += 1;
        *by_sector.entry(alert.sector_label()).or_default() += 1;

        if let Some(ts) = alert.timestamp {
            *by_hour.entry(ts.hour()).or_default() += 1;
            *by_day.entry(ts.date()).or_default() += 1;
            *by_weekday
                .entry(weekday_code(ts.weekday()).to_string())
                .or_default() += 1;
        }
    }

    let mut top_sectors: Vec<(String, u64)> = by_sector
        .iter()
        .map(|(s, c)| (s.clone(), *c))
        .collect();
    top_sectors.sort_by(|a, b| b.1.cmp(&a.1));
    top_sectors.truncate(10);

    let daily_counts: Vec<u64> = by_day.values().copied().collect();
    let daily_mean = mean(&daily_counts);
    let daily_median = median(&daily_counts);

    let peak_days = find_peak_days(&by_day);

    let mut peak_hours: Vec<(u32, u64)> = by_hour.iter().map(|(h, c)| (*h, *c)).collect();
    peak_hours.sort_by(|a, b| b.1.cmp(&a.1));
    peak_hours.truncate(5);

    let sector_zscores = sector_zscores(&by_sector);
    let sector_count = by_sector.len();

    Aggregates {
        by_type,
        by_state,
        by_sector,
        by_hour,
        by_day,
        by_weekday,
        top_sectors,
        sector_count,
        daily_mean,
        daily_median,
        peak_days,
        peak_hours,
        sector_zscores,
    }
}

/// Spanish single-letter weekday codes. Wednesday is X to disambiguate from
/// Tuesday (martes/miércoles).
pub fn weekday_code(dow: Weekday) -> &'static str {
    match dow {
        Weekday::Mon => "L",
        Weekday::Tue => "M",
        Weekday::Wed => "X",
        Weekday::Thu => "J",
        Weekday::Fri => "V",
        Weekday::Sat => "S",
        Weekday::Sun => "D",
    }
}

pub fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Middle element of the sorted values, or the average of the two middle
/// elements for even lengths. Empty input yields 0.
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

/// Population standard deviation (denominator N).
fn std_dev(values: &[u64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}

/// Days strictly above mean + 2σ of the daily counts, in date order.
fn find_peak_days(by_day: &BTreeMap<NaiveDate, u64>) -> Vec<(String, u64)> {
    if by_day.is_empty() {
        return Vec::new();
    }
    let counts: Vec<u64> = by_day.values().copied().collect();
    let m = mean(&counts);
    let threshold = m + 2.0 * std_dev(&counts, m);
    by_day
        .iter()
        .filter(|(_, &c)| c as f64 > threshold)
        .map(|(d, &c)| (d.to_string(), c))
        .collect()
}

/// Z-score of each sector's count against the all-sector distribution.
/// When every sector has the same count (σ = 0) the divisor is forced to 1 so
/// the scores come out as 0.00 instead of NaN.
fn sector_zscores(by_sector: &BTreeMap<String, u64>) -> Vec<(String, f64)> {
    if by_sector.is_empty() {
        return Vec::new();
    }
    let counts: Vec<u64> = by_sector.values().copied().collect();
    let m = mean(&counts);
    let sd = std_dev(&counts, m);
    let sd_safe = if sd == 0.0 { 1.0 } else { sd };

    let mut scores: Vec<(String, f64)> = by_sector
        .iter()
        .map(|(s, &c)| (s.clone(), round2((c as f64 - m) / sd_safe)))
        .collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scores.truncate(10);
    scores
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
