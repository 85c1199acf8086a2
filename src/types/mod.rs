pub mod aggregates;
pub mod event_category;
pub mod impact_metric;
pub mod normalized_record;
pub mod raw_record;
