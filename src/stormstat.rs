//! The main entry point for running the storm impact pipeline: load a raw
//! event log, normalize and filter it, aggregate by label, classify into
//! canonical categories and re-aggregate for presentation.

use crate::aggregate::category::{aggregate_categories, category_frame, label_frame};
use crate::aggregate::label::aggregate_labels;
use crate::error::StormStatError;
use crate::loader::record_loader::RecordLoader;
use crate::normalize::normalizer::{normalize_records, retain_relevant, FieldAnomalies};
use crate::taxonomy::Taxonomy;
use crate::types::aggregates::{CategoryAggregate, LabelAggregate};
use crate::types::impact_metric::ImpactMetric;
use crate::types::raw_record::RawRecord;
use bon::bon;
use log::info;
use polars::frame::DataFrame;
use polars::prelude::PolarsResult;
use std::path::Path;

/// Everything a pipeline run produces.
///
/// The category table is the interface for charting; the label table is kept
/// for diagnostics; the anomaly counters record how much of the input needed
/// the null-fallback treatment.
#[derive(Debug, Clone)]
pub struct Report {
    /// Final category table, sorted descending by the configured metric.
    pub categories: Vec<CategoryAggregate>,
    /// Retained label-level aggregates, most frequent first.
    pub labels: Vec<LabelAggregate>,
    /// Field-decode anomaly counts observed during normalization.
    pub anomalies: FieldAnomalies,
}

impl Report {
    /// The category table as a polars frame, ready for charting.
    pub fn category_frame(&self) -> PolarsResult<DataFrame> {
        category_frame(&self.categories)
    }

    /// The label-level diagnostics as a polars frame.
    pub fn label_frame(&self) -> PolarsResult<DataFrame> {
        label_frame(&self.labels)
    }

    /// Highest-ranked category under the configured sort metric, used by the
    /// narrative side of report generation.
    pub fn top_category(&self) -> Option<&CategoryAggregate> {
        self.categories.first()
    }
}

/// The pipeline client: holds the taxonomy and tuning knobs and runs the
/// whole load → normalize → filter → aggregate → classify chain.
///
/// # Examples
///
/// ```no_run
/// use stormstat::{ImpactMetric, StormStat, StormStatError};
///
/// # async fn run() -> Result<(), StormStatError> {
/// let pipeline = StormStat::builder()
///     .sort_metric(ImpactMetric::Fatalities)
///     .build();
/// let report = pipeline.analyze_csv_path("storm_data.csv.gz").await?;
/// if let Some(top) = report.top_category() {
///     println!("{}: {} fatalities", top.category, top.fatalities);
/// }
/// # Ok(())
/// # }
/// ```
pub struct StormStat {
    taxonomy: Taxonomy,
    frequency_threshold: f64,
    sort_metric: ImpactMetric,
}

#[bon]
impl StormStat {
    /// Builds a pipeline client.
    ///
    /// * `taxonomy` — classification table; defaults to
    ///   [`Taxonomy::reference`].
    /// * `frequency_threshold` — count-percentile-rank cutoff for retaining
    ///   labels (default 0.8, i.e. roughly the top 20% most frequent labels).
    /// * `sort_metric` — metric the final category table is sorted by
    ///   (default damage).
    #[builder]
    pub fn new(
        taxonomy: Option<Taxonomy>,
        #[builder(default = 0.8)] frequency_threshold: f64,
        #[builder(default = ImpactMetric::Damage)] sort_metric: ImpactMetric,
    ) -> Self {
        Self {
            taxonomy: taxonomy.unwrap_or_default(),
            frequency_threshold,
            sort_metric,
        }
    }

    /// Runs the full pipeline over a CSV file (plain or gzip-compressed).
    pub async fn analyze_csv_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Report, StormStatError> {
        let records = RecordLoader::load_path(path.as_ref()).await?;
        Ok(self.analyze_records(records))
    }

    /// Runs the full pipeline over an in-memory CSV byte stream.
    pub async fn analyze_csv_bytes(&self, bytes: Vec<u8>) -> Result<Report, StormStatError> {
        let records = RecordLoader::load_bytes(bytes).await?;
        Ok(self.analyze_records(records))
    }

    /// The pure compute stages. Each stage consumes its input collection and
    /// produces a fresh one, so the run either completes in full or not at
    /// all; there is no partial output state.
    pub fn analyze_records(&self, records: Vec<RawRecord>) -> Report {
        let (normalized, anomalies) = normalize_records(records);
        let relevant = retain_relevant(normalized);
        let labels = aggregate_labels(&relevant, self.frequency_threshold);
        let categories = aggregate_categories(&labels, &self.taxonomy, self.sort_metric);
        info!(
            "Pipeline produced {} categories from {} retained labels ({} relevant records)",
            categories.len(),
            labels.len(),
            relevant.len()
        );
        Report {
            categories,
            labels,
            anomalies,
        }
    }
}

impl Default for StormStat {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event_category::EventCategory;

    fn raw(label: &str, damage: f64, exp: &str, injuries: u32, fatalities: u32) -> RawRecord {
        RawRecord {
            refnum: None,
            begin_date: "6/9/1972 0:00:00".to_string(),
            begin_time: "1800".to_string(),
            timezone: "CST".to_string(),
            event_type: label.to_string(),
            property_damage: Some(damage),
            property_damage_exp: exp.to_string(),
            crop_damage: None,
            crop_damage_exp: String::new(),
            injuries,
            fatalities,
        }
    }

    #[test]
    fn end_to_end_three_record_scenario() {
        // Threshold 0 keeps all three single-occurrence labels so the final
        // sums are exact.
        let pipeline = StormStat::builder().frequency_threshold(0.0).build();
        let report = pipeline.analyze_records(vec![
            raw("tstm wind", 10.0, "K", 0, 0),
            raw("river flood", 5.0, "M", 2, 1),
            raw("flash flooding", 1.0, "B", 0, 0),
        ]);

        assert_eq!(report.anomalies.total(), 0);
        assert_eq!(report.categories.len(), 2);

        let floods = &report.categories[0];
        assert_eq!(floods.category, EventCategory::Floods);
        assert_eq!(floods.damage, 1_005_000_000.0);
        assert_eq!(floods.injuries, 2);
        assert_eq!(floods.fatalities, 1);

        let storms = &report.categories[1];
        assert_eq!(storms.category, EventCategory::StormsAndRains);
        assert_eq!(storms.damage, 10_000.0);
        assert_eq!(storms.injuries, 0);

        assert_eq!(report.top_category().unwrap().category, EventCategory::Floods);
    }

    #[test]
    fn malformed_exponent_record_survives_on_casualties_only() {
        let pipeline = StormStat::builder().frequency_threshold(0.0).build();

        // damage 50 with an empty exponent code: null amount, record kept for
        // the injuries, damage contributes zero
        let report = pipeline.analyze_records(vec![raw("heat wave", 50.0, "", 3, 0)]);
        assert_eq!(report.anomalies.unrecognized_exponents, 1);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].category, EventCategory::HeatWaves);
        assert_eq!(report.categories[0].damage, 0.0);
        assert_eq!(report.categories[0].injuries, 3);

        // same field failure without casualties: filtered out entirely
        let report = pipeline.analyze_records(vec![raw("heat wave", 50.0, "", 0, 0)]);
        assert!(report.categories.is_empty());
        assert!(report.labels.is_empty());
    }

    #[tokio::test]
    async fn analyzes_a_csv_stream_end_to_end() -> Result<(), StormStatError> {
        let csv = "\
REFNUM,BGN_DATE,BGN_TIME,TIME_ZONE,EVTYPE,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP,INJURIES,FATALITIES
1,6/9/1972 0:00:00,1800,MST,TSTM WIND,10,K,0,,0,0
2,6/9/1972 0:00:00,1900,MST,RIVER FLOOD,5,M,0,,2,1
3,6/9/1972 0:00:00,2000,MST,FLASH FLOODING,1,B,0,,0,0
";
        let pipeline = StormStat::builder().frequency_threshold(0.0).build();
        let report = pipeline.analyze_csv_bytes(csv.as_bytes().to_vec()).await?;

        let top = report.top_category().unwrap();
        assert_eq!(top.category, EventCategory::Floods);
        assert_eq!(top.damage, 1_005_000_000.0);

        let frame = report.category_frame()?;
        assert_eq!(frame.height(), 2);
        Ok(())
    }
}
