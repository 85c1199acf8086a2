//! Category-level re-aggregation and the presentation table.

use crate::taxonomy::Taxonomy;
use crate::types::aggregates::{CategoryAggregate, LabelAggregate};
use crate::types::event_category::EventCategory;
use crate::types::impact_metric::ImpactMetric;
use ordered_float::OrderedFloat;
use polars::prelude::*;
use std::collections::HashMap;

/// Re-sums the retained label aggregates per canonical category and sorts
/// the result descending by `sort_metric`, with category declaration order
/// breaking ties.
///
/// Cardinality is bounded by the taxonomy, so no ranking logic is needed
/// here.
pub fn aggregate_categories(
    labels: &[LabelAggregate],
    taxonomy: &Taxonomy,
    sort_metric: ImpactMetric,
) -> Vec<CategoryAggregate> {
    let mut totals: HashMap<EventCategory, CategoryAggregate> = HashMap::new();
    for label in labels {
        let category = taxonomy.classify(&label.label);
        let entry = totals.entry(category).or_insert(CategoryAggregate {
            category,
            count: 0,
            damage: 0.0,
            injuries: 0,
            fatalities: 0,
        });
        entry.count += label.count;
        entry.damage += label.damage;
        entry.injuries += label.injuries;
        entry.fatalities += label.fatalities;
    }

    let mut rows: Vec<CategoryAggregate> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        metric_key(b, sort_metric)
            .cmp(&metric_key(a, sort_metric))
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

fn metric_key(row: &CategoryAggregate, metric: ImpactMetric) -> OrderedFloat<f64> {
    OrderedFloat(match metric {
        ImpactMetric::Count => row.count as f64,
        ImpactMetric::Damage => row.damage,
        ImpactMetric::Injuries => row.injuries as f64,
        ImpactMetric::Fatalities => row.fatalities as f64,
    })
}

/// Builds the small presentation table consumed by the charting side.
pub fn category_frame(rows: &[CategoryAggregate]) -> PolarsResult<DataFrame> {
    df!(
        "category" => rows.iter().map(|r| r.category.name()).collect::<Vec<_>>(),
        "count" => rows.iter().map(|r| r.count as i64).collect::<Vec<_>>(),
        "damage" => rows.iter().map(|r| r.damage).collect::<Vec<_>>(),
        "injuries" => rows.iter().map(|r| r.injuries as i64).collect::<Vec<_>>(),
        "fatalities" => rows.iter().map(|r| r.fatalities as i64).collect::<Vec<_>>(),
    )
}

/// Label-level diagnostics as a frame, mirroring [`category_frame`].
pub fn label_frame(rows: &[LabelAggregate]) -> PolarsResult<DataFrame> {
    df!(
        "label" => rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
        "count" => rows.iter().map(|r| r.count as i64).collect::<Vec<_>>(),
        "damage" => rows.iter().map(|r| r.damage).collect::<Vec<_>>(),
        "injuries" => rows.iter().map(|r| r.injuries as i64).collect::<Vec<_>>(),
        "fatalities" => rows.iter().map(|r| r.fatalities as i64).collect::<Vec<_>>(),
        "count_rank" => rows.iter().map(|r| r.count_rank).collect::<Vec<_>>(),
        "damage_rank" => rows.iter().map(|r| r.damage_rank).collect::<Vec<_>>(),
    )
}
