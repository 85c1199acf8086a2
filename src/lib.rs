//! Cleans, classifies and aggregates six decades of storm event reports so
//! event types can be ranked by human and economic impact.
//!
//! The pipeline loads an inconsistently formatted event log, decodes its
//! ad-hoc magnitude and timezone conventions, drops records without any
//! reported impact, aggregates by raw label with ordinal percentile ranks,
//! collapses the surviving labels onto a fixed taxonomy and re-sums per
//! canonical category. See [`StormStat`] for the entry point.
//!
//! ```no_run
//! use stormstat::{StormStat, StormStatError};
//!
//! # async fn run() -> Result<(), StormStatError> {
//! let report = StormStat::default().analyze_csv_path("storm_data.csv.gz").await?;
//! println!("{}", report.category_frame()?);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod error;
mod loader;
mod normalize;
mod stormstat;
mod taxonomy;
mod types;

pub use error::StormStatError;
pub use stormstat::{Report, StormStat};

pub use aggregate::category::{aggregate_categories, category_frame, label_frame};
pub use aggregate::label::aggregate_labels;
pub use loader::error::LoadError;
pub use loader::record_loader::RecordLoader;
pub use normalize::magnitude::{decode_amount, exponent_multiplier};
pub use normalize::normalizer::{normalize_records, retain_relevant, FieldAnomalies};
pub use normalize::temporal::{combine_local_timestamp, resolve_timezone};
pub use taxonomy::Taxonomy;

pub use types::aggregates::{CategoryAggregate, LabelAggregate};
pub use types::event_category::EventCategory;
pub use types::impact_metric::ImpactMetric;
pub use types::normalized_record::NormalizedRecord;
pub use types::raw_record::RawRecord;
