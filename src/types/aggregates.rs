use crate::types::event_category::EventCategory;
use serde::Serialize;

/// Totals for one distinct raw event label that survived the relevance
/// filter.
///
/// The four percentile ranks are ordinal: each label's position within the
/// full distinct-label set sorted ascending by the metric, divided by the set
/// size, so every rank lies in `(0, 1]`. Ties receive distinct ranks from a
/// deterministic label-order tie-break, never an averaged rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAggregate {
    pub label: String,
    pub count: u64,
    /// Summed total loss in currency units (null components counted as zero).
    pub damage: f64,
    pub injuries: u64,
    pub fatalities: u64,
    pub count_rank: f64,
    pub damage_rank: f64,
    pub injury_rank: f64,
    pub fatality_rank: f64,
}

/// Final output row: re-summed totals for one canonical category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: EventCategory,
    pub count: u64,
    pub damage: f64,
    pub injuries: u64,
    pub fatalities: u64,
}
