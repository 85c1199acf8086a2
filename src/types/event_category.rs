use serde::Serialize;
use std::fmt;

/// The closed set of canonical event classes that open-ended free-text labels
/// collapse onto.
///
/// Classification always returns one of these variants, so an "unknown
/// category" string can never leak into the output. Variant declaration order
/// matches the priority order of the reference taxonomy and doubles as the
/// tie-break order when sorting the final table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EventCategory {
    Hail,
    Tornadoes,
    Tsunamis,
    StormsAndRains,
    Lightning,
    Floods,
    WinterWeather,
    HeatWaves,
    Winds,
    Fog,
    MarineIncidents,
    Droughts,
    Fires,
    Landslides,
    /// Catch-all for labels matching no pattern group.
    Other,
}

impl EventCategory {
    /// Human-readable name used in the presentation table.
    pub fn name(&self) -> &'static str {
        match self {
            EventCategory::Hail => "Hail",
            EventCategory::Tornadoes => "Tornadoes",
            EventCategory::Tsunamis => "Tsunamis",
            EventCategory::StormsAndRains => "Storms & Rains",
            EventCategory::Lightning => "Lightning",
            EventCategory::Floods => "Floods",
            EventCategory::WinterWeather => "Winter Weather",
            EventCategory::HeatWaves => "Heat Waves",
            EventCategory::Winds => "Winds",
            EventCategory::Fog => "Fog",
            EventCategory::MarineIncidents => "Marine Incidents",
            EventCategory::Droughts => "Droughts",
            EventCategory::Fires => "Fires",
            EventCategory::Landslides => "Landslides",
            EventCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
