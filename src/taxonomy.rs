//! Ordered, first-match-wins classification of free-text event labels.
//!
//! The source log's event-type field is open-ended: hundreds of distinct raw
//! values, riddled with misspellings and local naming habits. They collapse
//! onto the closed [`EventCategory`] set through one declarative table of
//! (category, pattern-set) pairs scanned in priority order.

use crate::types::event_category::EventCategory;
use regex::{RegexSet, RegexSetBuilder};

/// The ordered classification table.
///
/// Priority runs top to bottom: the first category with any matching pattern
/// claims the label, so a label containing both "storm" and "flood" lands in
/// whichever of the two is listed earlier. The order is authoritative for the
/// reference table but it is policy, not mechanism; it lives in one list so
/// it can be tuned, and callers may supply their own table via
/// [`Taxonomy::new`].
pub struct Taxonomy {
    rules: Vec<(EventCategory, RegexSet)>,
}

impl Taxonomy {
    /// Builds a taxonomy from ordered (category, patterns) pairs.
    ///
    /// Patterns are case-insensitive regexes, in practice plain substrings.
    /// Categories without a listed pattern group (at minimum
    /// [`EventCategory::Other`]) act as fallbacks through the absence of a
    /// match.
    pub fn new(rules: &[(EventCategory, &[&str])]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|(category, patterns)| {
                RegexSetBuilder::new(patterns.iter())
                    .case_insensitive(true)
                    .build()
                    .map(|set| (*category, set))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The reference table, in priority order.
    ///
    /// Misspellings that actually occur in the log are matched explicitly
    /// (`torn*` variants, `avalance`, `ligntning`) or through deliberately
    /// short substrings.
    pub fn reference() -> Self {
        Self::new(&[
            (EventCategory::Hail, &["hail"]),
            (EventCategory::Tornadoes, &["torn", "funnel"]),
            (EventCategory::Tsunamis, &["tsunami"]),
            (
                EventCategory::StormsAndRains,
                &[
                    "storm",
                    "tstm",
                    "thunder",
                    "rain",
                    "hurricane",
                    "typhoon",
                    "waterspout",
                    "precip",
                ],
            ),
            (EventCategory::Lightning, &["lightn", "lighting", "ligntning"]),
            (EventCategory::Floods, &["flood", "fld", "seiche"]),
            (
                EventCategory::WinterWeather,
                &[
                    "cold", "snow", "ice", "icy", "winter", "wintry", "blizzard", "avalanch",
                    "avalance", "freez", "frost", "sleet", "chill", "glaze",
                ],
            ),
            (EventCategory::HeatWaves, &["heat", "hot", "warm"]),
            (EventCategory::Winds, &["wind", "wnd", "burst", "whirl", "gust"]),
            (EventCategory::Fog, &["fog"]),
            (
                EventCategory::MarineIncidents,
                &["marine", "ocean", "tide", "surf", "current", "swell"],
            ),
            (EventCategory::Droughts, &["drought", "dry"]),
            (EventCategory::Fires, &["fire", "smoke"]),
            (EventCategory::Landslides, &["slide", "slump", "mud"]),
        ])
        .expect("reference taxonomy patterns compile")
    }

    /// Maps a label to exactly one canonical category.
    ///
    /// Total and deterministic: every input, however malformed, resolves to a
    /// single category, with [`EventCategory::Other`] catching labels no
    /// pattern claims.
    pub fn classify(&self, label: &str) -> EventCategory {
        for (category, patterns) in &self.rules {
            if patterns.is_match(label) {
                return *category;
            }
        }
        EventCategory::Other
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::reference()
    }
}
