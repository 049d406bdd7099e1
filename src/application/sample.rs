//! Representative sampling of alerts for the AI prompt.
//!
//! The payload sent to the model must stay bounded no matter how large the
//! filtered population is, while still over-representing the sectors that
//! dominate the period.

use crate::domain::entities::alert::AlertRecord;
use std::collections::HashSet;

/// How many recent records from the top-3 sectors are always pulled in.
const TOP3_RECENT: usize = 15;

/// Heuristic cap: clamp(round(sqrt(total) * 5), 50, 200).
pub fn heuristic_limit(total: usize) -> usize {
    let raw = ((total.max(1) as f64).sqrt() * 5.0).round() as usize;
    raw.clamp(50, 200)
}

/// Select up to `min(limit, heuristic)` records, favoring the top-10 sectors
/// and guaranteeing recency representation for the top-3. Input order (newest
/// first) is preserved; duplicates keep their first occurrence.
pub fn select_sample(
    records: &[AlertRecord],
    top_sectors: &[(String, u64)],
    limit: usize,
) -> Vec<AlertRecord> {
    if records.is_empty() {
        return Vec::new();
    }
    let effective = limit.min(heuristic_limit(records.len()));

    let top_set: HashSet<&str> = top_sectors.iter().map(|(s, _)| s.as_str()).collect();
    let top3: HashSet<&str> = top_sectors.iter().take(3).map(|(s, _)| s.as_str()).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut sample: Vec<AlertRecord> = Vec::new();

    for alert in records
        .iter()
        .filter(|a| top_set.contains(a.sector_label().as_str()))
        .take(effective)
    {
        if seen.insert(alert.id.as_str()) {
            sample.push(alert.clone());
        }
    }

    // Most recent incidents from the heaviest sectors, even when the primary
    // pool already filled up with older records.
    for alert in records
        .iter()
        .filter(|a| top3.contains(a.sector_label().as_str()))
        .take(TOP3_RECENT)
    {
        if seen.insert(alert.id.as_str()) {
            sample.push(alert.clone());
        }
    }

    sample.truncate(effective);
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::alert_type::AlertType;
    use chrono::NaiveDate;

    fn alert(id: &str, sector: &str, day: u32) -> AlertRecord {
        let mut a = AlertRecord::new(
            "u1".into(),
            AlertType::Panic,
            None,
            None,
            None,
            None,
            Some(sector.to_string()),
            None,
            None,
            false,
        );
        a.id = id.to_string();
        a.timestamp = NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(12, 0, 0);
        a
    }

    #[test]
    fn test_heuristic_bounds() {
        assert_eq!(heuristic_limit(0), 50);
        assert_eq!(heuristic_limit(1), 50);
        assert_eq!(heuristic_limit(100), 50);
        assert_eq!(heuristic_limit(400), 100);
        assert_eq!(heuristic_limit(10_000), 200);
        assert_eq!(heuristic_limit(1_000_000), 200);
    }

    #[test]
    fn test_empty_input_yields_empty_sample() {
        assert!(select_sample(&[], &[("A".into(), 1)], 100).is_empty());
    }

    #[test]
    fn test_sample_never_exceeds_limit_or_population() {
        let records: Vec<AlertRecord> = (0..30)
            .map(|i| alert(&format!("a{i}"), "Centro", 1 + (i % 28) as u32))
            .collect();
        let tops = vec![("Centro".to_string(), 30u64)];
        let sample = select_sample(&records, &tops, 7);
        assert_eq!(sample.len(), 7);
        let sample = select_sample(&records, &tops, 500);
        assert!(sample.len() <= records.len());
    }

    #[test]
    fn test_sample_is_deduplicated_and_order_preserving() {
        let records: Vec<AlertRecord> = (0..20)
            .map(|i| alert(&format!("a{i}"), if i < 10 { "A" } else { "B" }, 1 + i as u32))
            .collect();
        let tops = vec![("A".to_string(), 10u64), ("B".to_string(), 10u64)];
        let sample = select_sample(&records, &tops, 500);

        let ids: Vec<&str> = sample.iter().map(|a| a.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        // First-seen order matches the input order
        assert_eq!(ids[0], "a0");
        assert_eq!(ids[1], "a1");
    }

    #[test]
    fn test_sample_deterministic() {
        let records: Vec<AlertRecord> = (0..40)
            .map(|i| alert(&format!("a{i}"), &format!("S{}", i % 4), 1 + (i % 28) as u32))
            .collect();
        let tops: Vec<(String, u64)> = (0..4).map(|i| (format!("S{i}"), 10u64)).collect();
        let one = select_sample(&records, &tops, 100);
        let two = select_sample(&records, &tops, 100);
        let ids1: Vec<&str> = one.iter().map(|a| a.id.as_str()).collect();
        let ids2: Vec<&str> = two.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids1, ids2);
    }

    #[test]
    fn test_records_outside_top_sectors_excluded() {
        let mut records: Vec<AlertRecord> = (0..10).map(|i| alert(&format!("a{i}"), "A", 1)).collect();
        records.push(alert("other", "Z", 2));
        let tops = vec![("A".to_string(), 10u64)];
        let sample = select_sample(&records, &tops, 500);
        assert!(sample.iter().all(|a| a.sector_label() == "A"));
    }
}
