//! Drives per-record normalization (stages 2 and 3) and the relevance filter.
//!
//! Every stage here is per-record and stateless, so the map runs in parallel
//! and the order of records never matters. Each stage consumes its input
//! collection and produces a fresh one; nothing is mutated after creation.

use crate::normalize::magnitude::decode_amount;
use crate::normalize::temporal::{combine_local_timestamp, resolve_timezone};
use crate::types::normalized_record::NormalizedRecord;
use crate::types::raw_record::RawRecord;
use chrono::Datelike;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

/// Running totals of per-field decode failures.
///
/// Anomalies are counted and logged, never fatal: the affected field carries
/// `None` and the record stays in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldAnomalies {
    /// Damage exponent codes outside the multiplier table.
    pub unrecognized_exponents: u64,
    /// Timezone codes missing from the abbreviation table (fell back to UTC).
    pub unknown_timezones: u64,
    /// Date or time strings that did not parse.
    pub unparseable_timestamps: u64,
}

impl FieldAnomalies {
    pub fn total(&self) -> u64 {
        self.unrecognized_exponents + self.unknown_timezones + self.unparseable_timestamps
    }

    fn merge(mut self, other: Self) -> Self {
        self.unrecognized_exponents += other.unrecognized_exponents;
        self.unknown_timezones += other.unknown_timezones;
        self.unparseable_timestamps += other.unparseable_timestamps;
        self
    }
}

/// Normalizes every raw record: resolves the timezone, assembles the local
/// timestamp, decodes both damage magnitudes and lower-cases the label.
///
/// Returns the derived records (1:1 with the input) together with the anomaly
/// counts observed along the way.
pub fn normalize_records(records: Vec<RawRecord>) -> (Vec<NormalizedRecord>, FieldAnomalies) {
    let (normalized, anomalies): (Vec<_>, Vec<_>) =
        records.into_par_iter().map(normalize_record).unzip();
    let anomalies = anomalies
        .into_iter()
        .fold(FieldAnomalies::default(), FieldAnomalies::merge);
    if anomalies.total() > 0 {
        info!(
            "Field-decode anomalies over {} records: {} exponent codes, {} timezones, {} timestamps",
            normalized.len(),
            anomalies.unrecognized_exponents,
            anomalies.unknown_timezones,
            anomalies.unparseable_timestamps
        );
    }
    (normalized, anomalies)
}

fn normalize_record(record: RawRecord) -> (NormalizedRecord, FieldAnomalies) {
    let mut anomalies = FieldAnomalies::default();

    let timezone = match resolve_timezone(&record.timezone) {
        Some(tz) => tz,
        None => {
            debug!(
                "Unknown timezone code {:?} on record {:?}, falling back to UTC",
                record.timezone, record.refnum
            );
            anomalies.unknown_timezones += 1;
            chrono_tz::UTC
        }
    };

    let timestamp = combine_local_timestamp(&record.begin_date, &record.begin_time, timezone);
    if timestamp.is_none() {
        anomalies.unparseable_timestamps += 1;
    }

    // A zero value with a blank code is the log's way of reporting no loss;
    // only a nonzero value lost to an unrecognized code counts as an anomaly.
    let property_damage = decode_amount(record.property_damage, &record.property_damage_exp);
    if property_damage.is_none() && record.property_damage.is_some_and(|v| v != 0.0) {
        anomalies.unrecognized_exponents += 1;
    }
    let crop_damage = decode_amount(record.crop_damage, &record.crop_damage_exp);
    if crop_damage.is_none() && record.crop_damage.is_some_and(|v| v != 0.0) {
        anomalies.unrecognized_exponents += 1;
    }

    let normalized = NormalizedRecord {
        year: timestamp.map(|t| t.year()),
        timestamp,
        timezone,
        event_label: record.event_type.trim().to_lowercase(),
        property_damage,
        crop_damage,
        injuries: record.injuries,
        fatalities: record.fatalities,
    };
    (normalized, anomalies)
}

/// Relevance filter: keeps records reporting any injury, fatality or positive
/// monetary loss (null damage counts as zero).
pub fn retain_relevant(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let total = records.len();
    let kept: Vec<NormalizedRecord> = records
        .into_iter()
        .filter(NormalizedRecord::has_impact)
        .collect();
    debug!("Relevance filter kept {} of {} records", kept.len(), total);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, time: &str, zone: &str, label: &str) -> RawRecord {
        RawRecord {
            refnum: Some(1),
            begin_date: date.to_string(),
            begin_time: time.to_string(),
            timezone: zone.to_string(),
            event_type: label.to_string(),
            property_damage: Some(10.0),
            property_damage_exp: "K".to_string(),
            crop_damage: None,
            crop_damage_exp: String::new(),
            injuries: 0,
            fatalities: 0,
        }
    }

    #[test]
    fn derives_timestamp_label_and_amounts() {
        let record = raw("4/18/1950 0:00:00", "0130", "CST", "  TSTM Wind ");
        let (normalized, anomalies) = normalize_records(vec![record]);
        assert_eq!(anomalies.total(), 0);

        let n = &normalized[0];
        assert_eq!(n.timezone, chrono_tz::America::Chicago);
        assert_eq!(n.year, Some(1950));
        assert_eq!(n.event_label, "tstm wind");
        assert_eq!(n.property_damage, Some(10_000.0));
        assert_eq!(n.total_damage(), Some(10_000.0));
    }

    #[test]
    fn counts_anomalies_without_dropping_records() {
        let mut record = raw("not a date", "xx", "XYZ", "HAIL");
        record.property_damage_exp = "?".to_string();
        let (normalized, anomalies) = normalize_records(vec![record]);

        assert_eq!(normalized.len(), 1);
        assert_eq!(anomalies.unknown_timezones, 1);
        assert_eq!(anomalies.unparseable_timestamps, 1);
        assert_eq!(anomalies.unrecognized_exponents, 1);

        let n = &normalized[0];
        assert_eq!(n.timezone, chrono_tz::UTC);
        assert_eq!(n.timestamp, None);
        assert_eq!(n.year, None);
        assert_eq!(n.property_damage, None);
    }

    #[test]
    fn filter_keeps_only_records_with_impact() {
        let harmless = {
            let mut r = raw("4/18/1950", "0130", "CST", "dense fog");
            r.property_damage = None;
            r
        };
        let fatal = {
            let mut r = raw("4/18/1950", "0130", "CST", "rip current");
            r.property_damage = None;
            r.fatalities = 1;
            r
        };
        let costly = raw("4/18/1950", "0130", "CST", "hail");

        let (normalized, _) = normalize_records(vec![harmless, fatal, costly]);
        let kept = retain_relevant(normalized);
        let labels: Vec<&str> = kept.iter().map(|r| r.event_label.as_str()).collect();
        assert_eq!(labels, vec!["rip current", "hail"]);
    }

    #[test]
    fn malformed_exponent_with_casualties_is_retained() {
        // Damage 50 with an empty exponent decodes to null; the record stays
        // because of the injury, and its damage contributes zero.
        let mut record = raw("4/18/1950", "0130", "CST", "avalanche");
        record.property_damage = Some(50.0);
        record.property_damage_exp = String::new();
        record.injuries = 2;

        let (normalized, _) = normalize_records(vec![record]);
        let kept = retain_relevant(normalized);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].total_damage(), None);
    }
}
