//! Timestamp assembly and timezone reconciliation.
//!
//! The log carries a date string, a separate military-style time string and a
//! timezone abbreviation whose spelling drifted over the decades. The
//! abbreviation table below is preserved as encountered in the data: entries
//! like `ESY`, `SCT`, `CSC` and `AKS` look like data-entry typos and are
//! mapped onto their nearest standard region, not corrected away.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%I:%M:%S %p"];

/// Resolves a raw timezone abbreviation to an IANA zone.
///
/// Lookup is case-insensitive, which also folds the mixed-case log variants
/// (`CSt`, `ESt`) onto their standard codes. `None` means the code is absent
/// from the table; callers fall back to UTC and count the anomaly.
pub fn resolve_timezone(code: &str) -> Option<Tz> {
    match code.trim().to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "UNK" => Some(chrono_tz::UTC),
        "ADT" | "AST" => Some(chrono_tz::America::Halifax),
        "AKS" => Some(chrono_tz::America::Anchorage),
        // SCT and CSC occur a handful of times and sit in central-zone states.
        "CDT" | "CST" | "SCT" | "CSC" => Some(chrono_tz::America::Chicago),
        // ESY appears alongside EST in the same state's reports.
        "EDT" | "EST" | "ESY" => Some(chrono_tz::America::New_York),
        "GST" => Some(chrono_tz::Pacific::Guam),
        "HST" => Some(chrono_tz::Pacific::Honolulu),
        "MDT" | "MST" => Some(chrono_tz::America::Denver),
        "PDT" | "PST" => Some(chrono_tz::America::Los_Angeles),
        "SST" => Some(chrono_tz::Pacific::Pago_Pago),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if !raw.is_empty() && raw.len() <= 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        // Military "HHMM", sometimes missing leading zeros.
        let padded = format!("{:0>4}", raw);
        let hour: u32 = padded[..2].parse().ok()?;
        let minute: u32 = padded[2..].parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// Combines raw date and time strings into a timestamp localized to `tz`.
///
/// Returns `None` on any parse failure, and for local times that do not exist
/// in the zone (spring-forward gap). Ambiguous fall-back times resolve to the
/// earlier instant.
pub fn combine_local_timestamp(raw_date: &str, raw_time: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let date = parse_date(raw_date)?;
    let time = parse_time(raw_time)?;
    tz.from_local_datetime(&date.and_time(time)).earliest()
}
