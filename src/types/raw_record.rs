/// One reported storm event exactly as it appears in the source log.
///
/// Everything the normalization stages decode later (date, time, timezone
/// code, exponent codes) is kept as the raw string; numeric cells that failed
/// to parse at load time are `None`. A `RawRecord` is the source of truth and
/// is never mutated after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Unique identifier of the report in the source dataset.
    pub refnum: Option<i64>,
    /// Raw begin-date string, e.g. `4/18/1950 0:00:00`.
    pub begin_date: String,
    /// Raw begin-time string, usually military `HHMM`, e.g. `0130`.
    pub begin_time: String,
    /// Raw timezone abbreviation, e.g. `CST` (legacy and typo codes occur).
    pub timezone: String,
    /// Free-text event-type label, open-ended and misspelling-ridden.
    pub event_type: String,
    pub property_damage: Option<f64>,
    /// Exponent code qualifying `property_damage`, e.g. `K`, `M`, `B`.
    pub property_damage_exp: String,
    pub crop_damage: Option<f64>,
    /// Exponent code qualifying `crop_damage`.
    pub crop_damage_exp: String,
    pub injuries: u32,
    pub fatalities: u32,
}
