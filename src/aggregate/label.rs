//! Frequency aggregation over raw event labels.
//!
//! Groups relevant records by their lower-cased label, computes per-label
//! totals and four ordinal percentile ranks over the distinct-label set, and
//! keeps only the labels whose count rank clears the retention threshold. The
//! long tail of rare labels carries almost none of the aggregate impact, so
//! discarding it loses next to nothing (a property the tests pin down).

use crate::types::aggregates::LabelAggregate;
use crate::types::normalized_record::NormalizedRecord;
use log::debug;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct LabelTotals {
    count: u64,
    damage: f64,
    injuries: u64,
    fatalities: u64,
}

impl LabelTotals {
    fn absorb(&mut self, record: &NormalizedRecord) {
        self.count += 1;
        self.damage += record.total_damage().unwrap_or(0.0);
        self.injuries += u64::from(record.injuries);
        self.fatalities += u64::from(record.fatalities);
    }

    // Sum-combination of partial aggregates: associative and commutative, so
    // the parallel reduce order never changes the result.
    fn merge(&mut self, other: &LabelTotals) {
        self.count += other.count;
        self.damage += other.damage;
        self.injuries += other.injuries;
        self.fatalities += other.fatalities;
    }
}

/// Groups records by raw label, computes totals and the four ordinal
/// percentile ranks, then retains only labels with a count rank at or above
/// `retain_threshold`.
///
/// Ranks are computed over the full distinct-label set before anything is
/// discarded, so a retained label's ranks are unaffected by the cut. The
/// result is sorted most-frequent-first with a label tie-break.
pub fn aggregate_labels(
    records: &[NormalizedRecord],
    retain_threshold: f64,
) -> Vec<LabelAggregate> {
    let totals: HashMap<&str, LabelTotals> = records
        .par_iter()
        .fold(HashMap::new, |mut acc: HashMap<&str, LabelTotals>, record| {
            acc.entry(record.event_label.as_str())
                .or_default()
                .absorb(record);
            acc
        })
        .reduce(HashMap::new, |mut left, right| {
            for (label, partial) in right {
                left.entry(label).or_default().merge(&partial);
            }
            left
        });

    let mut rows: Vec<LabelAggregate> = totals
        .into_iter()
        .map(|(label, t)| LabelAggregate {
            label: label.to_string(),
            count: t.count,
            damage: t.damage,
            injuries: t.injuries,
            fatalities: t.fatalities,
            count_rank: 0.0,
            damage_rank: 0.0,
            injury_rank: 0.0,
            fatality_rank: 0.0,
        })
        .collect();

    assign_ranks(&mut rows, |r| r.count, |r, rank| r.count_rank = rank);
    assign_ranks(
        &mut rows,
        |r| OrderedFloat(r.damage),
        |r, rank| r.damage_rank = rank,
    );
    assign_ranks(&mut rows, |r| r.injuries, |r, rank| r.injury_rank = rank);
    assign_ranks(
        &mut rows,
        |r| r.fatalities,
        |r, rank| r.fatality_rank = rank,
    );

    let distinct = rows.len();
    rows.retain(|row| row.count_rank >= retain_threshold);
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    debug!(
        "Retained {} of {} distinct labels at count rank >= {}",
        rows.len(),
        distinct,
        retain_threshold
    );
    rows
}

/// Assigns ordinal percentile ranks for one metric: position in the
/// ascending (metric, label) order divided by the set size, so ranks lie in
/// `(0, 1]` and ties get distinct positions from the label tie-break.
fn assign_ranks<K, M, S>(rows: &mut [LabelAggregate], metric: K, set_rank: S)
where
    K: Fn(&LabelAggregate) -> M,
    M: Ord,
    S: Fn(&mut LabelAggregate, f64),
{
    let n = rows.len();
    if n == 0 {
        return;
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        metric(&rows[a])
            .cmp(&metric(&rows[b]))
            .then_with(|| rows[a].label.cmp(&rows[b].label))
    });
    for (position, idx) in order.into_iter().enumerate() {
        set_rank(&mut rows[idx], (position + 1) as f64 / n as f64);
    }
}
