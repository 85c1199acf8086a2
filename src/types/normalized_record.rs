use chrono::DateTime;
use chrono_tz::Tz;

/// A [`RawRecord`](crate::RawRecord) after temporal normalization and
/// magnitude decoding.
///
/// Missing or undecodable fields are `None`, never a sentinel value; the
/// record itself survives normalization regardless. Downstream sums treat
/// `None` as contributing zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Event begin instant, localized to [`timezone`](Self::timezone).
    /// `None` when the raw date or time string did not parse.
    pub timestamp: Option<DateTime<Tz>>,
    /// Zone the raw timezone code resolved to (UTC when unresolvable).
    pub timezone: Tz,
    /// Lower-cased, trimmed free-text event label.
    pub event_label: String,
    /// Decoded property loss in currency units.
    pub property_damage: Option<f64>,
    /// Decoded crop loss in currency units.
    pub crop_damage: Option<f64>,
    pub injuries: u32,
    pub fatalities: u32,
    /// Calendar year of `timestamp`, for year-based grouping.
    pub year: Option<i32>,
}

impl NormalizedRecord {
    /// Null-safe total loss: present components are summed and `None`
    /// components contribute zero. Returns `None` only when both damage
    /// fields are undecodable. Never negative.
    pub fn total_damage(&self) -> Option<f64> {
        match (self.property_damage, self.crop_damage) {
            (None, None) => None,
            (property, crop) => Some(property.unwrap_or(0.0) + crop.unwrap_or(0.0)),
        }
    }

    /// Relevance predicate: any reported injury, fatality or positive loss.
    pub fn has_impact(&self) -> bool {
        self.injuries > 0 || self.fatalities > 0 || self.total_damage().unwrap_or(0.0) > 0.0
    }
}
