use std::fmt;

/// Metric by which the final category table is ordered for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactMetric {
    /// Number of relevant reports.
    Count,
    /// Total monetary loss (property + crop), currency units.
    Damage,
    Injuries,
    Fatalities,
}

impl fmt::Display for ImpactMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImpactMetric::Count => "count",
            ImpactMetric::Damage => "damage",
            ImpactMetric::Injuries => "injuries",
            ImpactMetric::Fatalities => "fatalities",
        };
        write!(f, "{}", name)
    }
}
